use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::domain::SubscriptionRequestError;
use crate::provider::ProviderError;
use crate::utils::error_chain_fmt;

/// Subscription failure, as reported to the caller
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error(transparent)]
    InvalidRequest(#[from] SubscriptionRequestError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SubscribeError {
    /// Client-facing message; internals stay in the logs
    const fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest(SubscriptionRequestError::InvalidJson(_)) => {
                "Invalid JSON in request body."
            }
            Self::InvalidRequest(SubscriptionRequestError::MissingEmail) => "Email is required.",
            Self::Provider(ProviderError::MissingCredentials) => {
                "Server configuration error: Missing Mailchimp credentials."
            }
            Self::Provider(ProviderError::MalformedApiKey) => {
                "Server configuration error: Invalid Mailchimp API Key format."
            }
            Self::Provider(ProviderError::AlreadySubscribed) => "This email is already subscribed.",
            Self::Provider(ProviderError::EmailRejected) => {
                "Please provide a valid email address."
            }
            Self::Provider(ProviderError::Rejected { .. }) => {
                "Subscription failed. Please try again later."
            }
            Self::Provider(ProviderError::MalformedResponse(_)) => {
                "Failed to process response from Mailchimp."
            }
            Self::Provider(ProviderError::Transport(_)) => {
                "Internal server error. Please try again later."
            }
        }
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Provider(ProviderError::EmailRejected) => {
                StatusCode::BAD_REQUEST
            }
            Self::Provider(ProviderError::AlreadySubscribed) => StatusCode::CONFLICT,
            // Unmapped provider rejections keep their original status
            Self::Provider(ProviderError::Rejected { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Provider(
                ProviderError::MissingCredentials
                | ProviderError::MalformedApiKey
                | ProviderError::MalformedResponse(_)
                | ProviderError::Transport(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.client_message() }))
    }
}
