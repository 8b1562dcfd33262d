use crate::entropy::EntropySource;
use crate::error::Result;
use crate::request::{Request, SALT_LEN, Salt};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

/// Canonical input bytes: `message ‖ key ‖ salt ‖ " " date`.
///
/// The parts are kept alongside the concatenation for the debug trace.
#[derive(Debug, Clone)]
pub struct ComposedInput {
    pub message: String,
    pub key: Zeroizing<String>,
    pub salt: Zeroizing<Vec<u8>>,
    pub date: String,
    bytes: Zeroizing<Vec<u8>>,
}

impl ComposedInput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub fn normalize(s: &str) -> String {
    s.trim().nfc().collect()
}

/// Draws the salt bytes a request asks for. This is the only step of
/// composition that touches the entropy source.
pub fn salt_bytes(salt: &Salt, entropy: &mut dyn EntropySource) -> Result<Zeroizing<Vec<u8>>> {
    match salt {
        Salt::Disabled => Ok(Zeroizing::new(Vec::new())),
        Salt::Explicit(text) => Ok(Zeroizing::new(text.as_bytes().to_vec())),
        Salt::Random => {
            let mut bytes = Zeroizing::new(vec![0u8; SALT_LEN]);
            entropy.fill_bytes(&mut bytes)?;
            Ok(bytes)
        }
    }
}

pub fn compose(request: &Request, entropy: &mut dyn EntropySource) -> Result<ComposedInput> {
    let salt = salt_bytes(&request.salt, entropy)?;
    Ok(compose_with_salt(request, salt))
}

/// Deterministic part of composition: same request and salt, same bytes.
pub fn compose_with_salt(request: &Request, salt: Zeroizing<Vec<u8>>) -> ComposedInput {
    let (message, key) = if request.normalize {
        let tokens: Vec<String> = request.message.iter().map(|t| normalize(t)).collect();
        (tokens.join(" "), Zeroizing::new(normalize(&request.key)))
    } else {
        (request.message.join(" "), request.key.clone())
    };

    let date = request
        .date
        .as_ref()
        .map(|d| format!(" {}", d))
        .unwrap_or_default();

    let mut bytes =
        Zeroizing::new(Vec::with_capacity(message.len() + key.len() + salt.len() + date.len()));
    bytes.extend_from_slice(message.as_bytes());
    bytes.extend_from_slice(key.as_bytes());
    bytes.extend_from_slice(&salt);
    bytes.extend_from_slice(date.as_bytes());

    debug!(
        message_len = message.len(),
        key_len = key.len(),
        salt_len = salt.len(),
        dated = request.date.is_some(),
        total = bytes.len(),
        "input composed"
    );

    ComposedInput {
        message,
        key,
        salt,
        date,
        bytes,
    }
}
