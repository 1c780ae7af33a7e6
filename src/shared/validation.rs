use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Regex for validating mechanic phone numbers
    /// Optional leading `+`, then digits with spaces, dashes, dots or parentheses
    /// - Valid: "+62 812-3456-7890", "(555) 123-4567", "5551234"
    /// - Invalid: "call me", "12ab34", "+", "--"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9(][0-9 ().-]*[0-9]$").unwrap();
}

/// Rejects values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Must not be blank".into());
        return Err(error);
    }
    Ok(())
}

pub const PHONE_MESSAGE: &str =
    "Phone may only contain digits, spaces, dashes, dots, parentheses and a leading +";

/// Rejects a malformed phone; an empty value is accepted and means "clear it"
pub fn validate_phone_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() > 20 || !PHONE_REGEX.is_match(value) {
        let mut error = ValidationError::new("phone");
        error.message = Some(PHONE_MESSAGE.into());
        return Err(error);
    }
    Ok(())
}

/// Serde hook trimming a string field before it reaches validation
pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Same as [`trim_string`] for optional fields; `null` stays `None`
pub fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()))
}

/// Flattens validator output into `field: message` lines, sorted by field name
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let detail = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                format!("{}: {}", field, detail)
            })
        })
        .collect();
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+62 812-3456-7890"));
        assert!(PHONE_REGEX.is_match("(555) 123-4567"));
        assert!(PHONE_REGEX.is_match("5551234"));
        assert!(PHONE_REGEX.is_match("555.123.4567"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("12ab34"));
        assert!(!PHONE_REGEX.is_match("+"));
        assert!(!PHONE_REGEX.is_match("--"));
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Sam").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_phone_or_empty() {
        assert!(validate_phone_or_empty("").is_ok());
        assert!(validate_phone_or_empty("+1 555-0100").is_ok());
        assert!(validate_phone_or_empty("call me").is_err());
        assert!(validate_phone_or_empty(&"5".repeat(21)).is_err());
    }

    #[derive(Deserialize)]
    struct Padded {
        #[serde(deserialize_with = "trim_string")]
        name: String,
        #[serde(default, deserialize_with = "trim_optional_string")]
        phone: Option<String>,
    }

    #[test]
    fn test_trim_hooks() {
        let padded: Padded =
            serde_json::from_str(r#"{"name":"  Sam ","phone":" 555 0100 "}"#).unwrap();
        assert_eq!(padded.name, "Sam");
        assert_eq!(padded.phone.as_deref(), Some("555 0100"));

        let absent: Padded = serde_json::from_str(r#"{"name":"Sam","phone":null}"#).unwrap();
        assert_eq!(absent.phone, None);
    }

    #[test]
    fn test_field_messages_sorted_with_fallback_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));
        let mut email = ValidationError::new("email");
        email.message = Some("Invalid email format".into());
        errors.add("email", email);

        assert_eq!(
            field_messages(&errors),
            vec!["email: Invalid email format", "name: length"]
        );
    }
}
