/// Extract the host segment of a URL: the substring between the first
/// `//` and the next `/`.
///
/// Returns `None` when the URL has no `//host/` pattern. Scripts are
/// trusted input, so the SQL wrapper turns `None` into a plain query
/// error instead of guessing at a host.
pub fn host_of(url: &str) -> Option<&str> {
    let start = url.find("//")? + 2;
    let rest = &url[start..];
    let end = rest.find('/')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_host() {
        assert_eq!(host_of("https://example.com/path"), Some("example.com"));
    }

    #[test]
    fn test_host_with_port() {
        assert_eq!(host_of("http://localhost:8080/q"), Some("localhost:8080"));
    }

    #[test]
    fn test_requires_trailing_slash() {
        assert_eq!(host_of("https://example.com"), None);
    }

    #[test]
    fn test_requires_scheme_separator() {
        assert_eq!(host_of("example.com/path"), None);
    }

    #[test]
    fn test_empty_host() {
        assert_eq!(host_of("file:///etc/hosts"), Some(""));
    }
}
