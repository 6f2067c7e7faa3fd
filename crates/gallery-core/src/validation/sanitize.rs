//! Text field sanitization

use crate::constants::MAX_FIELD_LENGTH;

/// Clean an optional text field before it is stored.
///
/// Absent or empty input becomes `""`. Otherwise null bytes are removed,
/// surrounding whitespace is trimmed and the result is cut to
/// [`MAX_FIELD_LENGTH`] characters. Applying it twice gives the same result.
pub fn sanitize(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return String::new();
    };

    let without_nulls: String = raw.chars().filter(|c| *c != '\0').collect();
    let trimmed = without_nulls.trim();

    match trimmed.char_indices().nth(MAX_FIELD_LENGTH) {
        // Cutting can expose trailing whitespace; trim again so a second pass is a no-op.
        Some((cut, _)) => trimmed[..cut].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_absent_and_empty() {
        assert_eq!(sanitize(None), "");
        assert_eq!(sanitize(Some("")), "");
        assert_eq!(sanitize(Some("   ")), "");
    }

    #[test]
    fn test_sanitize_strips_nulls_and_whitespace() {
        assert_eq!(sanitize(Some("  x\0y  ")), "xy");
        assert_eq!(sanitize(Some("\0 padded \0")), "padded");
    }

    #[test]
    fn test_sanitize_truncates_to_limit() {
        let long = "a".repeat(MAX_FIELD_LENGTH + 250);
        assert_eq!(sanitize(Some(&long)).chars().count(), MAX_FIELD_LENGTH);

        let multibyte = "ж".repeat(MAX_FIELD_LENGTH + 1);
        assert_eq!(sanitize(Some(&multibyte)).chars().count(), MAX_FIELD_LENGTH);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let mut boundary = "b".repeat(MAX_FIELD_LENGTH - 1);
        boundary.push(' ');
        boundary.push_str("tail");

        let inputs = [
            "plain".to_string(),
            "  x\0y  ".to_string(),
            "c".repeat(MAX_FIELD_LENGTH * 2),
            boundary,
            "\0\0".to_string(),
        ];
        for input in inputs {
            let once = sanitize(Some(&input));
            assert_eq!(sanitize(Some(&once)), once, "input: {:?}", input);
        }
    }
}
