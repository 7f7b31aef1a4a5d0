//! Email-marketing provider capability
//!
//! The provider is selected by configuration and constructed once per
//! process; request handlers only see its `subscribe` operation.

pub mod mailchimp;

use std::fmt;

use crate::configuration::MailchimpSettings;
use crate::utils::error_chain_fmt;
use mailchimp::MailchimpClient;

/// Supported email-marketing providers
#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mailchimp,
}

/// Provider selected by configuration
pub enum NewsletterProvider {
    Mailchimp {
        settings: MailchimpSettings,
        client: MailchimpClient,
    },
}

impl NewsletterProvider {
    /// Build the provider named by `kind`
    pub fn new(kind: ProviderKind, mailchimp: MailchimpSettings, client: MailchimpClient) -> Self {
        match kind {
            ProviderKind::Mailchimp => Self::Mailchimp {
                settings: mailchimp,
                client,
            },
        }
    }

    /// Provider name, for log fields
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mailchimp { .. } => "mailchimp",
        }
    }

    /// Register `email` with the provider's subscriber list
    #[tracing::instrument(
        name = "Registering email address with provider",
        skip(self),
        fields(provider = self.name())
    )]
    pub async fn subscribe(&self, email: &str) -> Result<(), ProviderError> {
        match self {
            Self::Mailchimp { settings, client } => {
                let credentials = settings.credentials()?;
                client.add_list_member(&credentials, email).await?;
                Ok(())
            }
        }
    }
}

/// Faults a provider subscription can produce
#[derive(thiserror::Error)]
pub enum ProviderError {
    #[error("provider credentials are not configured")]
    MissingCredentials,
    #[error("provider API key does not contain a datacenter suffix")]
    MalformedApiKey,
    #[error("the email address is already on the list")]
    AlreadySubscribed,
    #[error("the provider rejected the email address as invalid")]
    EmailRejected,
    #[error("the provider rejected the subscription with HTTP {status} ({title:?})")]
    Rejected { status: u16, title: Option<String> },
    #[error("failed to deserialize the provider response")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("request to the provider failed")]
    Transport(#[source] reqwest::Error),
}

impl fmt::Debug for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}
