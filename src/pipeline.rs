use crate::compose::{ComposedInput, compose};
use crate::digest::{self, Digested};
use crate::entropy::EntropySource;
use crate::error::Result;
use crate::filter;
use crate::generator::{generate_letters, generate_words};
use crate::request::{Request, Strategy};
use crate::wordlist::{get_wordlist, load_dictionary};
use tracing::debug;
use zeroize::Zeroizing;

pub struct Outcome {
    pub composed: ComposedInput,
    /// Bytes of the last digest pass; `None` for the random strategies.
    pub digest: Option<Zeroizing<Vec<u8>>>,
    /// Transformer output before filtering and truncation.
    pub raw: Zeroizing<String>,
    pub output: Zeroizing<String>,
}

/// Runs composer, transformer and post-filter. `on_pass` observes digest
/// iterations.
pub fn run<F>(request: &Request, entropy: &mut dyn EntropySource, on_pass: F) -> Result<Outcome>
where
    F: FnMut(u64),
{
    let composed = compose(request, entropy)?;
    let (digest, raw) = match transform(request, &composed, entropy, on_pass)? {
        Transformed::Digest(Digested { bytes, text }) => (Some(bytes), text),
        Transformed::Random(text) => (None, text),
    };
    let output = filter::apply(&raw, request.filter, request.limit);

    debug!(
        strategy = %request.strategy.label(),
        filter = request.filter.name(),
        raw_len = raw.chars().count(),
        out_len = output.chars().count(),
        "pipeline complete"
    );

    Ok(Outcome {
        composed,
        digest,
        raw,
        output,
    })
}

pub enum Transformed {
    Digest(Digested),
    Random(Zeroizing<String>),
}

pub fn transform<F>(
    request: &Request,
    composed: &ComposedInput,
    entropy: &mut dyn EntropySource,
    on_pass: F,
) -> Result<Transformed>
where
    F: FnMut(u64),
{
    let text = match &request.strategy {
        Strategy::Digest {
            algorithm,
            encoding,
        } => {
            return Ok(Transformed::Digest(digest::iterate(
                *algorithm,
                *encoding,
                composed.as_bytes(),
                request.iterations,
                on_pass,
            )));
        }
        Strategy::Letters => generate_letters(entropy, request.letters_length())?,
        Strategy::Words {
            count,
            dictionary: Some(path),
        } => {
            let words = load_dictionary(path)?;
            generate_words(entropy, &words, *count)?
        }
        Strategy::Words {
            count,
            dictionary: None,
        } => generate_words(entropy, get_wordlist(), *count)?,
    };
    Ok(Transformed::Random(text))
}
