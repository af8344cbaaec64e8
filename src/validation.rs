use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// The three inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Picks the rule set from an input's `type` attribute. Anything that is
    /// neither `email` nor `text` (a textarea reports `textarea`) is treated as
    /// the message body.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type {
            "email" => Field::Email,
            "text" => Field::Name,
            _ => Field::Message,
        }
    }

    /// Value of the `name` attribute in the markup.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{}", required_message(.0))]
    Required(Field),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Required(field) => *field,
            FieldError::InvalidEmail => Field::Email,
        }
    }
}

fn required_message(field: &Field) -> &'static str {
    match field {
        Field::Name => "Please enter your name",
        Field::Email => "Please enter your email address",
        Field::Message => "Please enter a message",
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validates a single raw value. Surrounding whitespace is ignored.
pub fn validate(field: Field, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required(field));
    }
    if field == Field::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}
