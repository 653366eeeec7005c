//! API key submission.

use crate::api::FinanceBackend;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your API key before submitting.")]
    MissingApiKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style message shown after a settings action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Notice::error("Missing API Key", err.to_string())
    }
}

pub fn validate_api_key(input: &str) -> Result<&str, ValidationError> {
    let key = input.trim();
    if key.is_empty() {
        Err(ValidationError::MissingApiKey)
    } else {
        Ok(key)
    }
}

/// Send a validated key to the backend and describe the outcome.
///
/// On success the caller should clear the input field.
pub async fn submit_api_key(backend: &dyn FinanceBackend, key: &str) -> Notice {
    match backend.load_api_key(key).await {
        Ok(response) => {
            tracing::info!("api key loaded");
            let description = response
                .status_text()
                .unwrap_or("API key loaded successfully!")
                .to_string();
            Notice::success("API Key Loaded", description)
        }
        Err(err) => {
            tracing::warn!(error = %err, "api key rejected");
            let description = err
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| "Could not connect to backend.".to_string());
            Notice::error("Failed to Load API Key", description)
        }
    }
}
