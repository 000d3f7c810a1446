use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooMany {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        actual: u64,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidUrl {
        field: &'static str,
        input: String,
    },
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
    Conflict {
        first: &'static str,
        second: &'static str,
    },
    MissingOneOf {
        first: &'static str,
        second: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooMany { field, max, actual } => {
                write!(f, "too many {field}: {actual} (max {max})")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} out of range: {actual} (expected {min}..={max})"
            ),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
            Self::InvalidFormat { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::Conflict { first, second } => {
                write!(f, "{first} and {second} cannot be set together")
            }
            Self::MissingOneOf { first, second } => {
                write!(f, "one of {first} or {second} is required")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub(crate) fn non_empty(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn in_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<u32, ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: min.into(),
            max: max.into(),
            actual: value.into(),
        });
    }
    Ok(value)
}

/// Parse an absolute `http`/`https` URL and return it in canonical form.
pub(crate) fn http_url(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = non_empty(field, value)?;
    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(parsed.into()),
        _ => Err(ValidationError::InvalidUrl {
            field,
            input: value,
        }),
    }
}
