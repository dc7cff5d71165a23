use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingOneOf { fields: &'static [&'static str] },
    MissingAction,
    InvalidAmount { field: &'static str, input: String },
    InvalidMsisdn { input: String },
    InvalidCountryCode { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingOneOf { fields } => {
                write!(f, "at least one of {} must be provided", fields.join(", "))
            }
            Self::MissingAction => write!(f, "can not execute without an action defined"),
            Self::InvalidAmount { field, input } => {
                write!(f, "{field} must be a non-negative finite amount: {input}")
            }
            Self::InvalidMsisdn { input } => write!(f, "invalid msisdn: {input}"),
            Self::InvalidCountryCode { input } => write!(f, "invalid country code: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
