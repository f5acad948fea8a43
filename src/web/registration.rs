//! Signup form validation.
//!
//! Every field is checked independently and all problems are reported together,
//! so the form can highlight each invalid input in one round trip.

use crate::web::form::FormValue;
use regex::Regex;
use secrecy::SecretString;
use serde::Serialize;
use std::collections::HashMap;

pub const USERNAME_TOO_SHORT: &str = "Username must be 8 characters long";
pub const USERNAME_TOO_LONG: &str = "Username must be 20 characters long";
pub const PASSWORD_TOO_WEAK: &str =
    "Password must be at least 8 characters long and contain an uppercase letter, lowercase letter, and number";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const REQUIRED: &str = "Required";
pub const EXPECTED_STRING: &str = "Expected string, received object";

const USERNAME_MIN_LEN: usize = 8;
const USERNAME_MAX_LEN: usize = 20;
const PASSWORD_MIN_LEN: usize = 8;

/// A validated signup submission. Values are trimmed.
#[derive(Debug)]
pub struct RegistrationInput {
    pub username: String,
    pub password: SecretString,
    pub email: String,
}

/// One rejected field.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate submitted form fields, collecting every issue in field order.
///
/// # Errors
/// Returns all validation issues when any field is invalid.
pub fn validate(fields: &HashMap<String, FormValue>) -> Result<RegistrationInput, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let username = check(&mut issues, fields, "username", valid_username);
    let password = check(&mut issues, fields, "password", valid_password);
    let email = check(&mut issues, fields, "email", valid_email);

    match (username, password, email) {
        (Some(username), Some(password), Some(email)) => Ok(RegistrationInput {
            username,
            password: SecretString::from(password),
            email,
        }),
        _ => Err(issues),
    }
}

fn check(
    issues: &mut Vec<ValidationIssue>,
    fields: &HashMap<String, FormValue>,
    name: &str,
    rule: fn(&str) -> Result<(), &'static str>,
) -> Option<String> {
    let value = match fields.get(name) {
        Some(FormValue::Text(value)) => trim(value),
        Some(FormValue::File) => {
            issues.push(ValidationIssue::new(name, EXPECTED_STRING));
            return None;
        }
        None => {
            issues.push(ValidationIssue::new(name, REQUIRED));
            return None;
        }
    };

    match rule(value) {
        Ok(()) => Some(value.to_string()),
        Err(message) => {
            issues.push(ValidationIssue::new(name, message));
            None
        }
    }
}

// Browser `trim()`: ECMAScript WhiteSpace and LineTerminator, which differs
// from `char::is_whitespace` on U+FEFF and U+0085.
fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn trim(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}

// Lengths are counted in UTF-16 code units, the unit browsers use for
// `minlength`/`maxlength`, so both sides agree on the limits.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn valid_username(username: &str) -> Result<(), &'static str> {
    let len = utf16_len(username);
    if len < USERNAME_MIN_LEN {
        Err(USERNAME_TOO_SHORT)
    } else if len > USERNAME_MAX_LEN {
        Err(USERNAME_TOO_LONG)
    } else {
        Ok(())
    }
}

fn valid_password(password: &str) -> Result<(), &'static str> {
    let no_line_breaks = !password
        .chars()
        .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'));

    if no_line_breaks
        && utf16_len(password) >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(PASSWORD_TOO_WEAK)
    }
}

fn valid_email(email: &str) -> Result<(), &'static str> {
    let well_formed = Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .is_ok_and(|re| re.is_match(email));

    if well_formed && !email.starts_with('.') && !email.contains("..") {
        Ok(())
    } else {
        Err(INVALID_EMAIL)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn text(value: &str) -> FormValue {
        FormValue::Text(value.to_string())
    }

    fn form(username: &str, password: &str, email: &str) -> HashMap<String, FormValue> {
        HashMap::from([
            ("username".to_string(), text(username)),
            ("password".to_string(), text(password)),
            ("email".to_string(), text(email)),
        ])
    }

    fn issues(fields: &HashMap<String, FormValue>) -> Vec<ValidationIssue> {
        validate(fields).err().unwrap_or_default()
    }

    #[test]
    fn accepts_valid_submission() {
        let input = validate(&form("validuser", "Valid123", "user@example.com")).unwrap();
        assert_eq!(input.username, "validuser");
        assert_eq!(input.password.expose_secret(), "Valid123");
        assert_eq!(input.email, "user@example.com");
    }

    #[test]
    fn trims_values_before_validation() {
        let input =
            validate(&form("  validuser\t", " Valid123 ", "\nuser@example.com ")).unwrap();
        assert_eq!(input.username, "validuser");
        assert_eq!(input.password.expose_secret(), "Valid123");
        assert_eq!(input.email, "user@example.com");
    }

    #[test]
    fn short_username() {
        assert_eq!(
            issues(&form("short", "Valid123", "user@example.com")),
            vec![ValidationIssue::new("username", USERNAME_TOO_SHORT)]
        );
    }

    #[test]
    fn padding_does_not_count_towards_username_length() {
        assert_eq!(
            issues(&form("   short   ", "Valid123", "user@example.com")),
            vec![ValidationIssue::new("username", USERNAME_TOO_SHORT)]
        );
    }

    #[test]
    fn long_username() {
        assert_eq!(
            issues(&form(&"u".repeat(21), "Valid123", "user@example.com")),
            vec![ValidationIssue::new("username", USERNAME_TOO_LONG)]
        );
    }

    #[test]
    fn username_length_bounds_are_inclusive() {
        assert!(validate(&form(&"u".repeat(8), "Valid123", "user@example.com")).is_ok());
        assert!(validate(&form(&"u".repeat(20), "Valid123", "user@example.com")).is_ok());
    }

    #[test]
    fn password_without_uppercase() {
        assert_eq!(
            issues(&form("validuser", "password1", "user@example.com")),
            vec![ValidationIssue::new("password", PASSWORD_TOO_WEAK)]
        );
        assert!(validate(&form("validuser", "Password1", "user@example.com")).is_ok());
    }

    #[test]
    fn password_rules() {
        for weak in ["PASSWORD1", "Password", "Pass1", "Pass\nword1"] {
            assert_eq!(
                issues(&form("validuser", weak, "user@example.com")),
                vec![ValidationIssue::new("password", PASSWORD_TOO_WEAK)],
                "{weak:?} should be rejected"
            );
        }
        assert!(validate(&form("validuser", "Pässword 1", "user@example.com")).is_ok());
    }

    #[test]
    fn email_syntax() {
        assert_eq!(
            issues(&form("validuser", "Valid123", "not-an-email")),
            vec![ValidationIssue::new("email", INVALID_EMAIL)]
        );
        for bad in [
            "user@example",
            "user@example.c",
            ".user@example.com",
            "us..er@example.com",
            "user.@example.com",
            "user@-example.com",
            "user name@example.com",
            "@example.com",
            "u\u{17F}er@example.com",
            "user@example.\u{212A}om",
        ] {
            assert_eq!(valid_email(bad), Err(INVALID_EMAIL), "{bad:?} should be rejected");
        }
        for good in [
            "user@example.com",
            "First.Last+tag@mail.Example.ORG",
            "o'brien@example.co.uk",
        ] {
            assert_eq!(valid_email(good), Ok(()), "{good:?} should be accepted");
        }
    }

    #[test]
    fn collects_every_issue_in_field_order() {
        assert_eq!(
            issues(&form("short", "x", "bad")),
            vec![
                ValidationIssue::new("username", USERNAME_TOO_SHORT),
                ValidationIssue::new("password", PASSWORD_TOO_WEAK),
                ValidationIssue::new("email", INVALID_EMAIL),
            ]
        );
    }

    #[test]
    fn missing_fields_are_required() {
        let fields = HashMap::from([("username".to_string(), text("validuser"))]);
        assert_eq!(
            issues(&fields),
            vec![
                ValidationIssue::new("password", REQUIRED),
                ValidationIssue::new("email", REQUIRED),
            ]
        );
    }

    #[test]
    fn file_upload_is_not_a_string() {
        let mut fields = form("validuser", "Valid123", "user@example.com");
        fields.insert("username".to_string(), FormValue::File);
        assert_eq!(
            issues(&fields),
            vec![ValidationIssue::new("username", EXPECTED_STRING)]
        );
    }

    #[test]
    fn trims_like_the_browser() {
        let input = validate(&form(
            "\u{FEFF}validuser\u{3000}",
            "Valid123",
            "user@example.com",
        ))
        .unwrap();
        assert_eq!(input.username, "validuser");

        // U+0085 is not whitespace for the browser, so it stays and counts.
        let input = validate(&form("validuser\u{85}", "Valid123", "user@example.com")).unwrap();
        assert_eq!(input.username, "validuser\u{85}");
        assert_eq!(
            issues(&form("validus\u{85}", "Valid123", "user@example.com")),
            vec![]
        );
        assert_eq!(
            issues(&form("\u{FEFF}short\u{FEFF}", "Valid123", "user@example.com")),
            vec![ValidationIssue::new("username", USERNAME_TOO_SHORT)]
        );
    }

    #[test]
    fn issues_serialize_as_path_and_message() {
        let json = serde_json::to_value(ValidationIssue::new("email", INVALID_EMAIL)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"path": "email", "message": "Invalid email address"})
        );
    }
}
