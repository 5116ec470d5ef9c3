//! Load name validation.

use regex::Regex;
use std::sync::OnceLock;

use crate::automation::error::ReviewError;

static LOAD_NAME: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    LOAD_NAME.get_or_init(|| Regex::new(r"^[A-Z]{3}\d{4}[A-Z]$").expect("load name pattern is valid"))
}

/// Trims and uppercases `raw`, then checks it against the load name format.
pub fn normalize_load_name(raw: &str) -> Result<String, ReviewError> {
    let name = raw.trim().to_uppercase();
    if pattern().is_match(&name) {
        Ok(name)
    } else {
        Err(ReviewError::InvalidLoadName(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_name() {
        assert_eq!(normalize_load_name("MAY0712A").unwrap(), "MAY0712A");
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(normalize_load_name("  jan0125b\n").unwrap(), "JAN0125B");
    }

    #[test]
    fn test_rejects_malformed_names() {
        for raw in ["", "MAY712A", "MAY0712", "MAY0712AB", "M4Y0712A", "../MAY0712A"] {
            assert_eq!(
                normalize_load_name(raw),
                Err(ReviewError::InvalidLoadName(raw.to_string())),
                "{:?}",
                raw
            );
        }
    }
}
