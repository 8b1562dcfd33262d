use crate::digest::{Encoding, mixed_components};
use crate::pipeline::Outcome;
use crate::request::{Request, Salt, Strategy};
use crate::wordlist::wordlist_size;
use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rpassword::read_password;
use zeroize::Zeroizing;

/// Digest runs shorter than this finish before a bar would be readable.
pub const PROGRESS_THRESHOLD: u64 = 100_000;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
}

impl DisplayOptions {
    pub fn detect() -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
        }
    }
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_tree_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

pub fn prompt_key() -> Result<Zeroizing<String>> {
    let term = Term::stderr();
    term.write_str("Key: ")?;
    term.flush()?;

    let key = read_password().context("Failed to read key from terminal")?;
    Ok(Zeroizing::new(key))
}

/// Bar on stderr for long digest runs; hidden otherwise.
pub fn iteration_progress(iterations: u64, quiet: bool, unicode_support: bool) -> ProgressBar {
    if quiet || iterations < PROGRESS_THRESHOLD {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(Some(iterations), ProgressDrawTarget::stderr());
    let bar_chars = if unicode_support { "█▉▊▋▌▍▎▏ " } else { "#>-" };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(bar_chars),
    );
    pb.set_message("Hashing");
    pb
}

/// The result line: bare output when quiet, labeled otherwise.
pub fn render_result(request: &Request, outcome: &Outcome) -> String {
    if request.quiet {
        outcome.output.to_string()
    } else {
        format!(
            "{} ---> {} ({})",
            request.strategy.label(),
            &**outcome.output,
            outcome.output.chars().count()
        )
    }
}

pub fn render_debug(request: &Request, outcome: &Outcome, options: &DisplayOptions) -> String {
    let (branch, last) = get_tree_symbols(options.unicode_support);
    let label_style = if options.color_support {
        Style::new().cyan()
    } else {
        Style::new()
    };

    let composed = &outcome.composed;
    let mut rows = vec![
        (
            "Message",
            format!("{:?} ({})", composed.message, plural(composed.message.len(), "byte")),
        ),
        (
            "Key",
            format!("{:?} ({})", composed.key.as_str(), plural(composed.key.len(), "byte")),
        ),
        ("Salt", describe_salt(&request.salt, &composed.salt)),
        (
            "Date",
            match &request.date {
                Some(_) => format!("{:?}", composed.date),
                None => "disabled".to_string(),
            },
        ),
        ("Strategy", describe_strategy(&request.strategy, request)),
        ("Filter", request.filter.name().to_string()),
        (
            "Limit",
            match request.limit {
                Some(limit) => plural(limit, "char"),
                None => "unlimited".to_string(),
            },
        ),
        ("Composed", plural(composed.len(), "byte")),
    ];

    if let (
        Strategy::Digest {
            encoding: Encoding::Mixed,
            ..
        },
        Some(digest),
    ) = (&request.strategy, &outcome.digest)
    {
        for (label, text) in mixed_components(digest) {
            rows.push((label, format!("{:?}", text.as_str())));
        }
    }

    rows.extend([
        (
            "Raw",
            format!(
                "{:?} ({})",
                &**outcome.raw,
                plural(outcome.raw.chars().count(), "char")
            ),
        ),
        (
            "Out",
            format!(
                "{:?} ({})",
                &**outcome.output,
                plural(outcome.output.chars().count(), "char")
            ),
        ),
    ]);

    let mut out = String::from("Debug:\n");
    for (i, (label, value)) in rows.iter().enumerate() {
        let prefix = if i == rows.len() - 1 { last } else { branch };
        out.push_str(&format!(
            "  {} {} {}\n",
            prefix,
            label_style.apply_to(format!("{:<10}", label)),
            value
        ));
    }
    out
}

fn describe_salt(salt: &Salt, bytes: &[u8]) -> String {
    match salt {
        Salt::Disabled => "disabled".to_string(),
        Salt::Random => format!(
            "random, {}: {}",
            plural(bytes.len(), "byte"),
            Encoding::Hex.encode(bytes)
        ),
        Salt::Explicit(text) => format!(
            "explicit {:?} ({})",
            text.as_str(),
            plural(bytes.len(), "byte")
        ),
    }
}

fn describe_strategy(strategy: &Strategy, request: &Request) -> String {
    match strategy {
        Strategy::Digest {
            algorithm,
            encoding,
        } => format!(
            "{} ({}-byte digest, {}, {})",
            algorithm,
            algorithm.output_len(),
            encoding.name(),
            plural(request.iterations as usize, "iteration")
        ),
        Strategy::Letters => format!(
            "random letters ({})",
            plural(request.letters_length(), "char")
        ),
        Strategy::Words { count, dictionary } => {
            let source = match dictionary {
                Some(path) => path.display().to_string(),
                None => format!("built-in list, {}", plural(wordlist_size(), "word")),
            };
            format!("random words ({}, {})", plural(*count, "word"), source)
        }
    }
}

fn plural(n: usize, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
