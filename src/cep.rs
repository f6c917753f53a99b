// src/cep.rs
// CEP (Brazilian postal code) handling: 8 digits, displayed as NNNNN-NNN.

/// Strip every non-digit character.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Display mask for the CEP field: digit-only form, with a literal hyphen
/// after the 5th digit once more than 5 digits are present. Never rejects
/// characters, only reformats. The field length cap is the caller's job.
pub fn format_cep(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() > 5 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

/// A CEP is valid iff exactly 8 digits remain after stripping.
/// No checksum, no region whitelist.
pub fn is_valid_cep(s: &str) -> bool {
    digits_only(s).len() == 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_short_input_stays_plain() {
        assert_eq!(format_cep(""), "");
        assert_eq!(format_cep("013"), "013");
        assert_eq!(format_cep("01310"), "01310");
    }

    #[test]
    fn mask_inserts_hyphen_after_fifth_digit() {
        assert_eq!(format_cep("013109"), "01310-9");
        assert_eq!(format_cep("01310930"), "01310-930");
    }

    #[test]
    fn mask_strips_non_digits_first() {
        assert_eq!(format_cep("01310-930"), "01310-930");
        assert_eq!(format_cep("a01.310/930b"), "01310-930");
        assert_eq!(format_cep("abc"), "");
    }

    #[test]
    fn mask_preserves_extra_digits_after_hyphen() {
        assert_eq!(format_cep("0131093055"), "01310-93055");
    }

    #[test]
    fn validation_counts_digits_only() {
        assert!(is_valid_cep("01310930"));
        assert!(is_valid_cep("01310-930"));
        assert!(is_valid_cep(" 01 310 930 "));
        assert!(!is_valid_cep("0131093"));
        assert!(!is_valid_cep("013109301"));
        assert!(!is_valid_cep("01310-93a"));
        assert!(!is_valid_cep(""));
    }
}
