use url::Url;

/// Destination filename for a URL: its last non-empty path segment, or the host when the path
/// is empty.
pub fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(str::to_string)
        .or_else(|| url.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(url: &str) -> Option<String> {
        filename_from_url(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_filename_from_last_segment() {
        assert_eq!(
            name("https://example.com/pub/debian-12.iso"),
            Some("debian-12.iso".to_string())
        );
    }

    #[test]
    fn test_filename_ignores_query_and_trailing_slash() {
        assert_eq!(
            name("https://example.com/files/report.pdf?token=abc"),
            Some("report.pdf".to_string())
        );
        assert_eq!(
            name("https://example.com/files/dir/"),
            Some("dir".to_string())
        );
    }

    #[test]
    fn test_filename_falls_back_to_host() {
        assert_eq!(name("https://example.com/"), Some("example.com".to_string()));
        assert_eq!(name("https://example.com"), Some("example.com".to_string()));
    }

    #[test]
    fn test_filename_keeps_percent_encoding() {
        assert_eq!(
            name("https://example.com/a%20b.txt"),
            Some("a%20b.txt".to_string())
        );
    }
}
