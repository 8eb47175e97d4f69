//! Request-body validation on top of `validator`'s derive.
//!
//! Bodies keep every field optional so a missing field is reported as a field
//! error instead of a deserialization failure. String fields go through
//! [`trimmed`], so length rules apply to the trimmed value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::application::error::{AppError, FieldError};

pub static WEBSITE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([a-zA-Z0-9_-]+\.)+[a-zA-Z0-9_-]+(/[a-zA-Z0-9_-]+)*/?$")
        .expect("valid website url regex")
});

pub static LOGIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]*$").expect("valid login regex"));

pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("valid email regex")
});

pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()))
}

pub fn uuid_text(value: &str) -> Result<(), ValidationError> {
    match Uuid::parse_str(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("uuid")),
    }
}

/// A body validated through `#[derive(Validate)]`.
///
/// `FIELDS` holds the JSON names in declaration order; errors are reported in
/// that order with at most one message per field.
pub trait ValidatedBody: Validate {
    const FIELDS: &'static [&'static str];

    fn check(&self) -> Result<(), AppError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(AppError::Validation(field_errors(&errors, Self::FIELDS))),
        }
    }
}

fn field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut out: Vec<(usize, FieldError)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(name, errs)| {
            let first = errs.first()?;
            let field = camel_case(name);
            let position = order.iter().position(|f| *f == field).unwrap_or(order.len());
            let message = describe(&field, first);
            Some((position, FieldError::new(field, message)))
        })
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.field.cmp(&b.1.field)));
    out.into_iter().map(|(_, e)| e).collect()
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "required" => format!("{field} is required"),
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("{field} length must be between {min} and {max}"),
            _ => format!("{field} has an invalid length"),
        },
        "regex" => format!("{field} has an invalid format"),
        "uuid" => format!("{field} is not a valid id"),
        _ => format!("{field} is invalid"),
    }
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        #[serde(default, deserialize_with = "trimmed")]
        #[validate(required, length(min = 1, max = 15))]
        name: Option<String>,
        #[serde(default, deserialize_with = "trimmed")]
        #[validate(required, length(min = 1, max = 500))]
        description: Option<String>,
        #[serde(default, deserialize_with = "trimmed")]
        #[validate(required, length(min = 1, max = 100), regex = "WEBSITE_URL_RE")]
        website_url: Option<String>,
        #[serde(default, deserialize_with = "trimmed")]
        #[validate(required, length(min = 3, max = 10), regex = "LOGIN_RE")]
        login: Option<String>,
    }

    impl ValidatedBody for Sample {
        const FIELDS: &'static [&'static str] = &["name", "description", "websiteUrl", "login"];
    }

    #[test]
    fn website_url_requires_https_host() {
        assert!(WEBSITE_URL_RE.is_match("https://example.com"));
        assert!(WEBSITE_URL_RE.is_match("https://my-blog.example.co/path_1/"));
        assert!(!WEBSITE_URL_RE.is_match("http://example.com"));
        assert!(!WEBSITE_URL_RE.is_match("https://localhost"));
    }

    #[test]
    fn login_and_email_patterns() {
        assert!(LOGIN_RE.is_match("user_01-x"));
        assert!(!LOGIN_RE.is_match("bad login"));
        assert!(EMAIL_RE.is_match("first.last@mail.example.com"));
        assert!(!EMAIL_RE.is_match("no-at-sign.com"));
    }

    #[test]
    fn values_are_trimmed_while_deserializing() {
        let body: Sample = serde_json::from_value(serde_json::json!({
            "name": "  ok  ",
            "description": "about",
            "websiteUrl": " https://example.com ",
            "login": "alice"
        }))
        .unwrap();
        assert_eq!(body.name.as_deref(), Some("ok"));
        assert_eq!(body.website_url.as_deref(), Some("https://example.com"));
        assert!(body.check().is_ok());
    }

    #[test]
    fn collects_one_error_per_field_in_declaration_order() {
        let body: Sample = serde_json::from_value(serde_json::json!({
            "name": "ok",
            "description": "   ",
            "login": "bad login"
        }))
        .unwrap();
        let Err(AppError::Validation(errors)) = body.check() else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["description", "websiteUrl", "login"]);
        assert_eq!(errors[0].message, "description length must be between 1 and 500");
        assert_eq!(errors[1].message, "websiteUrl is required");
        assert_eq!(errors[2].message, "login has an invalid format");
    }

    #[test]
    fn snake_case_names_become_json_names() {
        assert_eq!(camel_case("short_description"), "shortDescription");
        assert_eq!(camel_case("login_or_email"), "loginOrEmail");
        assert_eq!(camel_case("content"), "content");
    }
}
