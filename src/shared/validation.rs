use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::{CATEGORY_OTHER, NEED_CATEGORIES};

lazy_static! {
    /// Permissive phone matcher: digits with common separators, 8-20 chars.
    /// - Valid: "(32) 99999-0000", "+55 32 3229-0000", "32999990000"
    /// - Invalid: "telefone", "99", "32 abc 99"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9(][0-9 ()\-.]{6,18}[0-9]$").unwrap();

    /// Digits-only extraction used when building messaging links
    pub static ref NON_DIGIT_REGEX: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Check membership in the canonical supply-need category list.
pub fn validate_need_category(category: &str) -> Result<(), ValidationError> {
    if NEED_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        let mut err = ValidationError::new("need_category");
        err.message = Some("Categoria de necessidade desconhecida.".into());
        Err(err)
    }
}

/// "Outros" needs a label; the fixed categories must not carry one.
pub fn validate_custom_label(category: &str, custom_label: Option<&str>) -> Result<(), String> {
    let has_label = custom_label.map(|l| !l.trim().is_empty()).unwrap_or(false);

    if category == CATEGORY_OTHER && !has_label {
        return Err("Informe um rótulo para a categoria Outros.".to_string());
    }
    if category != CATEGORY_OTHER && has_label {
        return Err("Rótulo personalizado só é permitido na categoria Outros.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("(32) 99999-0000"));
        assert!(PHONE_REGEX.is_match("+55 32 3229-0000"));
        assert!(PHONE_REGEX.is_match("32999990000"));
        assert!(PHONE_REGEX.is_match("3229-0000"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("telefone"));
        assert!(!PHONE_REGEX.is_match("99"));
        assert!(!PHONE_REGEX.is_match("32 abc 99"));
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_need_category_membership() {
        assert!(validate_need_category("Água").is_ok());
        assert!(validate_need_category("Outros").is_ok());
        assert!(validate_need_category("Leite em pó/Fórmula").is_ok());
        assert!(validate_need_category("Carros").is_err());
        assert!(validate_need_category("agua").is_err());
    }

    #[test]
    fn test_custom_label_rules() {
        assert!(validate_custom_label("Outros", Some("Pilhas")).is_ok());
        assert!(validate_custom_label("Outros", None).is_err());
        assert!(validate_custom_label("Outros", Some("  ")).is_err());
        assert!(validate_custom_label("Água", None).is_ok());
        assert!(validate_custom_label("Água", Some("Galões")).is_err());
    }
}
