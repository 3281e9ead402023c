use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for Indonesian mobile numbers
    /// Accepts local "08" prefix or international "+62"/"62" prefix followed by 8
    /// - Valid: "08123456789", "+6281234567890", "6281234567890"
    /// - Invalid: "123456", "0212345678", "+1 555 0100"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^(\+62|62|0)8[1-9][0-9]{6,11}$").unwrap();
}

/// Strip the separators people commonly type inside phone numbers
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(&normalize_phone(phone))
}

/// Custom validator hook for `#[validate(custom(function = "validate_phone"))]`
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Nomor HP harus diawali 08 atau +628 dan berisi 10-15 digit".into());
        Err(error)
    }
}

/// Rejects values that are empty once surrounding whitespace is trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Tidak boleh kosong".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Budi").is_ok());
        assert!(not_blank(" Budi ").is_ok());
        assert_eq!(not_blank("   ").unwrap_err().code, "blank");
        assert!(not_blank("\t\n").is_err());
    }

    #[test]
    fn test_phone_regex_valid() {
        assert!(is_valid_phone("08123456789"));
        assert!(is_valid_phone("+6281234567890"));
        assert!(is_valid_phone("6281234567890"));
        assert!(is_valid_phone("0812-3456-789"));
        assert!(is_valid_phone("0812 3456 7890"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!is_valid_phone("123456"));
        assert!(!is_valid_phone("")); // empty
        assert!(!is_valid_phone("0212345678")); // landline
        assert!(!is_valid_phone("0812")); // too short
        assert!(!is_valid_phone("08123456789012345")); // too long
        assert!(!is_valid_phone("08abc456789")); // letters
    }

    #[test]
    fn test_validate_phone_reports_code() {
        let err = validate_phone("123456").unwrap_err();
        assert_eq!(err.code, "phone");
        assert!(validate_phone("08123456789").is_ok());
    }
}
