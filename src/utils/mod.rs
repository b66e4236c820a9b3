//! Utility functions and helpers.

pub mod http;

/// Glue a raw href onto the configured link base.
///
/// This is plain concatenation: an already absolute href ends up
/// prefixed as well, which is how stored baselines were produced.
pub fn join_link(base: &str, href: &str) -> String {
    format!("{base}{href}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_relative_href() {
        assert_eq!(
            join_link("https://www.nu.ac.bd/", "uploads/notice.pdf"),
            "https://www.nu.ac.bd/uploads/notice.pdf"
        );
    }

    #[test]
    fn test_join_absolute_href_is_not_normalized() {
        assert_eq!(
            join_link("https://www.nu.ac.bd/", "https://cdn.nu.ac.bd/x.pdf"),
            "https://www.nu.ac.bd/https://cdn.nu.ac.bd/x.pdf"
        );
    }
}
