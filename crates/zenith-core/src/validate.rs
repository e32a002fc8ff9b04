//! Field checks shared by the submission forms and the post editor.

use crate::error::{Result, ZenithError};
use regex::Regex;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"))
}

/// Letters, digits, `-` and `_`, starting with a letter or digit.
fn slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("slug regex is valid"))
}

pub fn is_valid_slug(s: &str) -> bool {
    slug_re().is_match(s)
}

pub fn is_valid_email(s: &str) -> bool {
    email_re().is_match(s)
}

/// Require at least `min` characters (not bytes) in `value`.
pub fn min_len(field: &str, value: &str, min: usize) -> Result<()> {
    if value.chars().count() < min {
        let unit = if min == 1 { "character" } else { "characters" };
        return Err(ZenithError::Validation(format!(
            "{field} must contain at least {min} {unit}"
        )));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<()> {
    if !is_valid_email(value) {
        return Err(ZenithError::Validation(format!("{field} must be a valid email")));
    }
    Ok(())
}

/// Blank strings count as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Lowercase the title and join whitespace runs with `-`.
pub fn slugify(title: &str) -> String {
    whitespace_re()
        .replace_all(&title.to_lowercase(), "-")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["", "ada", "ada@", "ada@example", "a da@example.com", "@example.com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn min_len_counts_chars() {
        assert!(min_len("name", "Jo", 2).is_ok());
        assert!(min_len("name", "J", 2).is_err());
        assert!(min_len("name", "Žo", 2).is_ok());
    }

    #[test]
    fn min_len_error_names_field() {
        let err = min_len("message", "hi", 5).unwrap_err();
        assert_eq!(err.to_string(), "message must contain at least 5 characters");
    }

    #[test]
    fn slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("AI in  Business"), "ai-in-business");
        assert_eq!(slugify("Tabs\tand\nlines"), "tabs-and-lines");
    }

    #[test]
    fn slugs_are_single_safe_segments() {
        assert!(is_valid_slug("frontend-developer"));
        assert!(is_valid_slug("ml_engineer2"));
        for bad in ["", "../avatars", "a/b", "-lead", "job?x=1", "job#frag", "two words", ".."] {
            assert!(!is_valid_slug(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn present_treats_blank_as_missing() {
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some("x")), Some("x"));
        assert_eq!(present(None), None);
    }
}
