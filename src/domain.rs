use serde::Deserialize;

/// Validated newsletter signup payload
#[derive(Debug)]
pub struct SubscriptionRequest {
    email: String,
}

/// Raw JSON shape of a signup payload
///
/// Extra fields (names, merge tags and the like) are accepted and ignored.
#[derive(Deserialize)]
struct RawSubscription {
    email: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SubscriptionRequestError {
    #[error("the request body is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("the request body does not contain an email address")]
    MissingEmail,
}

impl SubscriptionRequest {
    /// Parse a raw JSON request body into a subscription request
    ///
    /// The only local requirement is a non-empty `email` field; address format
    /// validation is left to the provider.
    pub fn parse(body: &[u8]) -> Result<Self, SubscriptionRequestError> {
        let raw: RawSubscription =
            serde_json::from_slice(body).map_err(SubscriptionRequestError::InvalidJson)?;
        match raw.email {
            Some(email) if !email.is_empty() => Ok(Self { email }),
            _ => Err(SubscriptionRequestError::MissingEmail),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
