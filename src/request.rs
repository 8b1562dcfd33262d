//! Flag resolution.
//!
//! Every precedence rule between flags lives in [`resolve`]: disabling flags
//! win over enabling ones, random modes win over `--algo`, and the stricter
//! character filter wins over the looser one. The rest of the pipeline only
//! ever sees the resolved [`Request`].

use crate::cli::Cli;
use crate::digest::{Algorithm, Encoding};
use crate::error::{PasswordError, Result};
use crate::filter::CharacterFilter;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::debug;
use zeroize::Zeroizing;

pub const DEFAULT_ALGORITHM: &str = "sha3_384";
pub const DEFAULT_ITERATIONS: u64 = 1;
pub const DEFAULT_WORD_COUNT: usize = 5;
pub const DEFAULT_LETTERS_LENGTH: usize = 64;
pub const SALT_LEN: usize = 64;
/// Upper bound on `--limit` when it sets the random letters length.
pub const MAX_LETTERS_LENGTH: usize = 1 << 20;
/// Upper bound on `--word-count`.
pub const MAX_WORD_COUNT: usize = 1 << 16;
pub const UNLIMITED: i64 = -1;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Salt {
    Disabled,
    /// `SALT_LEN` fresh bytes from the entropy source.
    Random,
    /// Caller-supplied salt text.
    Explicit(Zeroizing<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Digest {
        algorithm: Algorithm,
        encoding: Encoding,
    },
    Letters,
    Words {
        count: usize,
        dictionary: Option<PathBuf>,
    },
}

impl Strategy {
    pub fn label(&self) -> String {
        match self {
            Strategy::Digest { algorithm, .. } => algorithm.to_string(),
            Strategy::Letters => "random letters".to_string(),
            Strategy::Words { .. } => "random words".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub message: Vec<String>,
    pub key: Zeroizing<String>,
    pub salt: Salt,
    pub date: Option<String>,
    pub strategy: Strategy,
    pub filter: CharacterFilter,
    pub limit: Option<usize>,
    pub iterations: u64,
    pub normalize: bool,
    pub quiet: bool,
    pub debug: bool,
}

impl Request {
    /// Length of the letters strategy output.
    pub fn letters_length(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LETTERS_LENGTH)
    }
}

/// Resolves raw flags into a [`Request`]. `today` supplies the default date.
pub fn resolve(cli: &Cli, today: NaiveDate) -> Result<Request> {
    if cli.no_salt && cli.salt.is_some() {
        debug!("--no-salt overrides --salt");
    }
    if cli.no_date && cli.date.is_some() {
        debug!("--no-date overrides --date");
    }
    if (cli.letters || cli.words) && cli.algo != DEFAULT_ALGORITHM {
        debug!(algo = %cli.algo, "random mode overrides --algo");
    }

    let salt = match (&cli.salt, cli.no_salt) {
        (_, true) => Salt::Disabled,
        (Some(text), false) if !text.is_empty() => Salt::Explicit(Zeroizing::new(text.clone())),
        _ => Salt::Random,
    };

    let date = if cli.no_date {
        None
    } else {
        Some(
            cli.date
                .clone()
                .unwrap_or_else(|| today.format(DATE_FORMAT).to_string()),
        )
    };

    let strategy = if cli.words {
        if cli.word_count == 0 || cli.word_count > MAX_WORD_COUNT {
            return Err(PasswordError::InvalidWordCount(cli.word_count));
        }
        Strategy::Words {
            count: cli.word_count,
            dictionary: cli.dictionary.clone(),
        }
    } else if cli.letters {
        Strategy::Letters
    } else {
        Strategy::Digest {
            algorithm: cli.algo.parse()?,
            encoding: cli.encoding,
        }
    };

    let filter = if cli.no_special_characters {
        CharacterFilter::Alphanumeric
    } else if cli.urlsafe {
        CharacterFilter::UrlSafe
    } else {
        CharacterFilter::None
    };

    let limit = match cli.limit {
        UNLIMITED => None,
        n if n >= 1 => Some(usize::try_from(n).map_err(|_| PasswordError::InvalidLimit(n))?),
        n => return Err(PasswordError::InvalidLimit(n)),
    };

    if matches!(strategy, Strategy::Letters) && limit.is_some_and(|n| n > MAX_LETTERS_LENGTH) {
        return Err(PasswordError::LettersTooLong(cli.limit));
    }

    if cli.iterations == 0 {
        return Err(PasswordError::InvalidIterations(cli.iterations));
    }

    Ok(Request {
        message: cli.msg.clone(),
        key: Zeroizing::new(cli.key.clone()),
        salt,
        date,
        strategy,
        filter,
        limit,
        iterations: cli.iterations,
        normalize: cli.normalize,
        quiet: cli.quiet,
        debug: cli.debug,
    })
}
