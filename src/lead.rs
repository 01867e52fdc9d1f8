use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

// E.164: leading '+', country code without a zero, at most 15 digits. Eight
// digits minimum so a bare country prefix like "+31" never passes.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").unwrap());

/// The three fields the visitor types into the lead form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadInput {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl LeadInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        LeadInput {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Copy of the input as it is sent: trimmed, phone stripped of separators.
    pub fn normalized(&self) -> LeadInput {
        LeadInput {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: normalize_phone(&self.phone),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let input = self.normalized();
        if input.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !is_valid_email(&input.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(&input.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(())
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
        .collect()
}

/// Whether the submit button is enabled.
pub fn can_submit(input: &LeadInput, submitting: bool) -> bool {
    !submitting && input.is_submittable()
}
