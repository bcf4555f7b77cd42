pub const SEARCH_PHRASE: &str = "hung men turkey faced babies";
pub const SEARCH_BASE_URL: &str = "https://www.google.com/search?q=";

/// The phrase the browser is sent to search for, plus its ready-to-open URL.
/// Computed once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    phrase: String,
    url: String,
}

impl SearchTarget {
    pub fn new(phrase: &str) -> Self {
        Self {
            phrase: phrase.to_string(),
            url: format!("{SEARCH_BASE_URL}{}", percent_encode(phrase)),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for SearchTarget {
    fn default() -> Self {
        Self::new(SEARCH_PHRASE)
    }
}

/// Percent-encodes `input` for use in a URL query. Unreserved characters and
/// `/` pass through; every other UTF-8 byte becomes `%XX`.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-' | b'~' | b'/') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_url_is_stable() {
        let target = SearchTarget::default();
        assert_eq!(target.phrase(), "hung men turkey faced babies");
        assert_eq!(
            target.url(),
            "https://www.google.com/search?q=hung%20men%20turkey%20faced%20babies"
        );
        assert_eq!(target, SearchTarget::default());
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(percent_encode("AZaz09_.-~/"), "AZaz09_.-~/");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(percent_encode("a&b=c?d"), "a%26b%3Dc%3Fd");
        assert_eq!(percent_encode("100%"), "100%25");
        assert_eq!(percent_encode("a+b"), "a%2Bb");
    }

    #[test]
    fn non_ascii_is_encoded_per_utf8_byte() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn empty_phrase_yields_bare_base_url() {
        assert_eq!(SearchTarget::new("").url(), SEARCH_BASE_URL);
    }
}
