use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuyoutFinanceError {
    #[error("Invalid argument: {field} — {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BuyoutFinanceError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BuyoutFinanceError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Field that failed validation, if this is an argument error.
    pub fn field(&self) -> Option<&str> {
        match self {
            BuyoutFinanceError::InvalidArgument { field, .. } => Some(field),
            BuyoutFinanceError::Serialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for BuyoutFinanceError {
    fn from(e: serde_json::Error) -> Self {
        BuyoutFinanceError::Serialization(e.to_string())
    }
}
