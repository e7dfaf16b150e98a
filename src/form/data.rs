use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::FormError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// One contact request, captured fresh from the form on every submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub project_type: String,
    pub timing: String,
    pub description: String,
    pub site_visit: bool,
    pub timestamp: DateTime<Utc>,
}

impl FormData {
    /// Builds a request from the required fields, trimming them the way the
    /// form reader does. Optional fields start empty.
    pub fn new(name: &str, email: &str, phone: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            address: String::new(),
            project_type: String::new(),
            timing: String::new(),
            description: description.trim().to_string(),
            site_visit: false,
            timestamp: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let required = [&self.name, &self.email, &self.phone, &self.description];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(FormError::MissingRequired);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
