//! User-agent classification.

use once_cell::sync::Lazy;
use regex::Regex;

/// Case-insensitive markers of handheld browsers.
static MOBILE_UA: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)Mobi|Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").ok()
});

/// True when `user_agent` looks like a phone or tablet browser.
pub fn is_mobile(user_agent: &str) -> bool {
    MOBILE_UA
        .as_ref()
        .is_some_and(|re| re.is_match(user_agent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_handhelds() {
        assert!(is_mobile(
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile Safari/537.36"
        ));
        assert!(is_mobile(
            "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile("opera mini/36.2"));
    }

    #[test]
    fn desktop_is_not_mobile() {
        assert!(!is_mobile(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
        assert!(!is_mobile(""));
    }
}
