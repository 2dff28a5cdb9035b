use serde_json::{json, Value};
use thiserror::Error;

use crate::critique::ParseFailure;
use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Critique is not text: {0}")]
    NotText(#[from] ParseFailure),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::NotText(_) => "NOT_TEXT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Error body printed on stdout in place of a report.
    pub fn to_json(&self) -> Value {
        let message = match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Extraction(e) => e.to_string(),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                "An AI processing error occurred".to_string()
            }
            AppError::NotText(e) => e.to_string(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        };

        json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body() {
        let body = AppError::Validation("resume text cannot be empty".to_string()).to_json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "resume text cannot be empty");
    }

    #[test]
    fn test_llm_details_are_not_leaked() {
        let err = AppError::from(LlmError::Api {
            status: 401,
            message: "invalid key sk-123".to_string(),
        });
        let body = err.to_json();
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().contains("sk-123"));
    }

    #[test]
    fn test_extraction_error_converts() {
        let err: AppError = ExtractError::Empty.into();
        assert_eq!(err.code(), "EXTRACTION_ERROR");
    }
}
