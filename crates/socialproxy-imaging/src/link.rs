use std::sync::LazyLock;

use regex::Regex;

static IMAGE_EXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|bmp)(\?.*)?$").expect("valid image extension regex")
});

/// Returns `true` when `link` ends in a raster image extension, optionally
/// followed by a query string.
#[must_use]
pub fn is_image_link(link: &str) -> bool {
    IMAGE_EXT_RE.is_match(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_extensions_case_insensitively() {
        for link in [
            "https://x/y.jpg",
            "https://x/y.jpeg",
            "https://x/y.PNG",
            "https://x/y.gif",
            "https://x/y.Bmp",
        ] {
            assert!(is_image_link(link), "{link} should match");
        }
    }

    #[test]
    fn allows_query_suffix() {
        assert!(is_image_link("https://cdn.example.com/a/b.png?w=400&h=300"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_image_link("https://x/y.pdf"));
        assert!(!is_image_link("https://x/y.webp"));
        assert!(!is_image_link("https://x/png"));
        assert!(!is_image_link("https://x/y.png/page"));
    }
}
