//! Phone number utilities

/// Strip the leading `+` of an E.164 number.
///
/// Local gateways expect the MSISDN as bare digits (`255712345678`).
pub fn to_msisdn(phone: &str) -> String {
    phone.trim_start_matches('+').to_string()
}

/// Mask a phone number for logging, keeping only the last 4 digits.
///
/// ```
/// use mt_shared::phone::mask_phone_number;
///
/// assert_eq!(mask_phone_number("+255712345678"), "+********5678");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let len = phone.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }

    let visible_digits = 4;
    let masked_count = len - visible_digits;
    let last_digits: String = phone.chars().skip(masked_count).collect();

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_msisdn() {
        assert_eq!(to_msisdn("+255712345678"), "255712345678");
        assert_eq!(to_msisdn("255712345678"), "255712345678");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+255712345678"), "+********5678");
        assert_eq!(mask_phone_number("0712345678"), "******5678");
        assert_eq!(mask_phone_number("123"), "***");
        assert_eq!(mask_phone_number("1234"), "****");
        assert_eq!(mask_phone_number(""), "");
    }
}
