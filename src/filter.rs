use zeroize::Zeroizing;

/// Punctuation kept by the URL-safe filter, on top of ASCII letters and
/// digits. These are the RFC 3986 unreserved characters.
pub const URL_UNRESERVED: &str = "-._~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterFilter {
    #[default]
    None,
    /// Keeps `[A-Za-z0-9-._~]`.
    UrlSafe,
    /// Keeps `[A-Za-z0-9]`.
    Alphanumeric,
}

impl CharacterFilter {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterFilter::None => "none",
            CharacterFilter::UrlSafe => "urlsafe",
            CharacterFilter::Alphanumeric => "no special characters",
        }
    }

    pub fn allows(&self, c: char) -> bool {
        match self {
            CharacterFilter::None => true,
            CharacterFilter::UrlSafe => c.is_ascii_alphanumeric() || URL_UNRESERVED.contains(c),
            CharacterFilter::Alphanumeric => c.is_ascii_alphanumeric(),
        }
    }
}

/// Filters first, then keeps at most `limit` characters.
pub fn apply(raw: &str, filter: CharacterFilter, limit: Option<usize>) -> Zeroizing<String> {
    let allowed = raw.chars().filter(|&c| filter.allows(c));
    let out: String = match limit {
        Some(limit) => allowed.take(limit).collect(),
        None => allowed.collect(),
    };
    Zeroizing::new(out)
}
