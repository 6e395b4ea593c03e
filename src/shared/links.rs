//! Outbound contact link builders.
//!
//! Pure string helpers for the links the front-end renders next to a
//! collection point: phone dialer, WhatsApp conversation and a map search.

use crate::shared::validation::NON_DIGIT_REGEX;

/// Brazil country calling code, prefixed when the number lacks one
const COUNTRY_CODE: &str = "55";

/// Phone dialer link from a raw phone string.
pub fn tel_link(phone: &str) -> String {
    format!("tel:{}", phone.trim())
}

/// WhatsApp deep link keyed by a normalized, digits-only phone number.
///
/// Separators are stripped and the country code is prefixed when absent.
pub fn whatsapp_link(phone: &str) -> String {
    let digits = NON_DIGIT_REGEX.replace_all(phone, "");

    let normalized = if digits.starts_with(COUNTRY_CODE) && digits.len() >= 12 {
        digits.into_owned()
    } else {
        format!("{}{}", COUNTRY_CODE, digits)
    };

    format!("https://wa.me/{}", normalized)
}

/// Map search link for a free-text address.
pub fn maps_search_link(address: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(address)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tel_link_trims() {
        assert_eq!(tel_link(" (32) 99999-0000 "), "tel:(32) 99999-0000");
    }

    #[test]
    fn test_whatsapp_link_strips_separators_and_prefixes_country() {
        assert_eq!(
            whatsapp_link("(32) 99999-0000"),
            "https://wa.me/5532999990000"
        );
    }

    #[test]
    fn test_whatsapp_link_keeps_existing_country_code() {
        assert_eq!(
            whatsapp_link("+55 32 99999-0000"),
            "https://wa.me/5532999990000"
        );
    }

    #[test]
    fn test_maps_search_link_is_url_encoded() {
        assert_eq!(
            maps_search_link("Rua A, 100, Centro"),
            "https://www.google.com/maps/search/?api=1&query=Rua%20A%2C%20100%2C%20Centro"
        );
    }
}
