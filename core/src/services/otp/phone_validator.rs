//! Recipient validation against a regional numbering plan

use once_cell::sync::Lazy;
use regex::Regex;

use mt_shared::config::NumberingPlanConfig;

use crate::errors::{DomainError, DomainResult};

/// Tanzanian mobile numbers: +255 followed by 9 digits starting with 6 or 7
static TANZANIA_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+255[67][0-9]{8}$").expect("Invalid Tanzania phone regex"));

/// Validates E.164 recipients against an accepted numbering plan
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    pattern: Regex,
    format_hint: String,
}

impl PhoneValidator {
    /// Build a validator for `plan`.
    ///
    /// The plan must use digits only for the calling code and prefixes and
    /// have a non-zero subscriber length.
    pub fn new(plan: &NumberingPlanConfig) -> DomainResult<Self> {
        let digits_only = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !digits_only(&plan.calling_code)
            || !digits_only(&plan.mobile_prefixes)
            || plan.subscriber_digits == 0
        {
            return Err(DomainError::internal(format!(
                "Invalid numbering plan: +{} / {} digits / prefixes {}",
                plan.calling_code, plan.subscriber_digits, plan.mobile_prefixes
            )));
        }

        let pattern = format!(
            r"^\+{}[{}][0-9]{{{}}}$",
            plan.calling_code,
            plan.mobile_prefixes,
            plan.subscriber_digits - 1
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| DomainError::internal(format!("Invalid numbering plan pattern: {}", e)))?;

        Ok(Self {
            pattern,
            format_hint: Self::hint_for(plan),
        })
    }

    /// Validator for the default Tanzanian mobile plan
    pub fn tanzania() -> Self {
        Self {
            pattern: TANZANIA_MOBILE_REGEX.clone(),
            format_hint: Self::hint_for(&NumberingPlanConfig::default()),
        }
    }

    pub fn validate(&self, phone: &str) -> bool {
        self.pattern.is_match(phone)
    }

    /// Caller-facing message for a rejected number
    pub fn rejection_message(&self) -> &str {
        &self.format_hint
    }

    fn hint_for(plan: &NumberingPlanConfig) -> String {
        format!(
            "Invalid {} phone number format. Use +{}{}",
            plan.region_name,
            plan.calling_code,
            "X".repeat(plan.subscriber_digits)
        )
    }
}

impl Default for PhoneValidator {
    fn default() -> Self {
        Self::tanzania()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tanzania_numbers() {
        let validator = PhoneValidator::tanzania();
        assert!(validator.validate("+255712345678"));
        assert!(validator.validate("+255612345678"));
        assert!(validator.validate("+255799999999"));
    }

    #[test]
    fn test_invalid_tanzania_numbers() {
        let validator = PhoneValidator::tanzania();
        assert!(!validator.validate("+255512345678")); // prefix outside plan
        assert!(!validator.validate("0712345678")); // missing + and code
        assert!(!validator.validate("255712345678")); // missing +
        assert!(!validator.validate("+2557123456789")); // too long
        assert!(!validator.validate("+25571234567")); // too short
        assert!(!validator.validate("+254712345678")); // wrong country
        assert!(!validator.validate("+25571234567a"));
        assert!(!validator.validate(" +255712345678"));
        assert!(!validator.validate("+2557\u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}"));
        assert!(!validator.validate("+255712345\u{0666}\u{0667}\u{0668}"));
        assert!(!validator.validate(""));
    }

    #[test]
    fn test_configured_plan_matches_builtin() {
        let configured = PhoneValidator::new(&NumberingPlanConfig::default()).unwrap();
        let builtin = PhoneValidator::tanzania();
        for phone in ["+255712345678", "+255612345678", "+255512345678", "+2557123456789"] {
            assert_eq!(configured.validate(phone), builtin.validate(phone), "{}", phone);
        }
        assert_eq!(
            configured.rejection_message(),
            "Invalid Tanzania phone number format. Use +255XXXXXXXXX"
        );
    }

    #[test]
    fn test_custom_plan() {
        let plan = NumberingPlanConfig {
            region_name: "Kenya".to_string(),
            calling_code: "254".to_string(),
            subscriber_digits: 9,
            mobile_prefixes: "17".to_string(),
        };
        let validator = PhoneValidator::new(&plan).unwrap();
        assert!(validator.validate("+254712345678"));
        assert!(validator.validate("+254112345678"));
        assert!(!validator.validate("+255712345678"));
        assert!(!validator.validate("+254612345678"));
        // Devanagari digits are Unicode decimal digits but not E.164
        assert!(!validator.validate("+2547\u{0967}\u{0968}\u{0969}\u{096A}\u{096B}\u{096C}\u{096D}\u{096E}"));
    }

    #[test]
    fn test_rejects_malformed_plan() {
        let plan = NumberingPlanConfig {
            mobile_prefixes: "6-7".to_string(),
            ..NumberingPlanConfig::default()
        };
        assert!(PhoneValidator::new(&plan).is_err());

        let plan = NumberingPlanConfig {
            subscriber_digits: 0,
            ..NumberingPlanConfig::default()
        };
        assert!(PhoneValidator::new(&plan).is_err());
    }
}
