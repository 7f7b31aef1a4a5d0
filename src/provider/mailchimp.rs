use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use super::ProviderError;

/// Mailchimp Marketing API credentials
///
/// Presence is checked when the credentials are resolved from settings; the
/// datacenter suffix is only parsed on use.
pub struct MailchimpCredentials {
    api_key: SecretString,
    audience_id: String,
}

impl MailchimpCredentials {
    pub const fn new(api_key: SecretString, audience_id: String) -> Self {
        Self {
            api_key,
            audience_id,
        }
    }

    /// Datacenter suffix encoded in the API key
    ///
    /// Keys follow the `<key>-<datacenter>` convention; the token after the
    /// first hyphen names the API host (e.g. `...c38a-us21` -> `us21`).
    pub fn datacenter(&self) -> Result<&str, ProviderError> {
        self.api_key
            .expose_secret()
            .split('-')
            .nth(1)
            .filter(|datacenter| !datacenter.is_empty())
            .ok_or(ProviderError::MalformedApiKey)
    }

    pub fn audience_id(&self) -> &str {
        &self.audience_id
    }
}

/// Client for the Mailchimp Marketing API
#[derive(Clone)]
pub struct MailchimpClient {
    http_client: Client,
    api_base: Option<Url>,
}

/// Body of an "add member to list" call
#[derive(Serialize)]
struct AddMemberRequest<'a> {
    email_address: &'a str,
    status: &'a str,
}

/// Audience member entry returned on success
#[derive(Deserialize, Debug)]
pub struct MemberRecord {
    pub id: String,
    pub email_address: String,
    pub status: String,
}

/// Problem document returned by the Mailchimp API on failure
///
/// All fields are optional: anything json-shaped the API sends back is
/// accepted and mapped by `title` alone.
#[derive(Deserialize, Debug)]
struct ProblemDetail {
    title: Option<String>,
    detail: Option<String>,
}

impl ProblemDetail {
    /// Map a problem document onto the provider error taxonomy
    fn into_error(self, status: StatusCode) -> ProviderError {
        match self.title.as_deref() {
            Some("Member Exists") => ProviderError::AlreadySubscribed,
            Some("Invalid Resource") => ProviderError::EmailRejected,
            _ => ProviderError::Rejected {
                status: status.as_u16(),
                title: self.title,
            },
        }
    }
}

impl MailchimpClient {
    /// Build the API client
    ///
    /// `api_base` replaces the datacenter-derived `https://<dc>.api.mailchimp.com`
    /// origin; `timeout` bounds every outbound call.
    pub fn new(api_base: Option<Url>, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the HTTP client");
        Self {
            http_client,
            api_base,
        }
    }

    /// Add `email` to the configured audience
    ///
    /// <https://mailchimp.com/developer/marketing/api/list-members/add-member-to-list/>
    #[tracing::instrument(name = "Adding list member via Mailchimp API", skip(self, credentials))]
    pub async fn add_list_member(
        &self,
        credentials: &MailchimpCredentials,
        email: &str,
    ) -> Result<MemberRecord, ProviderError> {
        let url = self.member_endpoint(credentials)?;
        let response = self
            .http_client
            .post(url)
            .basic_auth("anystring", Some(credentials.api_key.expose_secret()))
            .json(&AddMemberRequest {
                email_address: email,
                status: "subscribed",
            })
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ProviderError::Transport)?;
        if status.is_success() {
            let member: MemberRecord =
                serde_json::from_slice(&body).map_err(ProviderError::MalformedResponse)?;
            tracing::info!(
                member_id = %member.id,
                member_status = %member.status,
                "member added to the audience"
            );
            Ok(member)
        } else {
            let problem: ProblemDetail =
                serde_json::from_slice(&body).map_err(ProviderError::MalformedResponse)?;
            tracing::warn!(
                status = %status,
                title = ?problem.title,
                detail = ?problem.detail,
                "Mailchimp rejected the subscription"
            );
            Err(problem.into_error(status))
        }
    }

    /// Endpoint of the audience's member collection
    fn member_endpoint(&self, credentials: &MailchimpCredentials) -> Result<Url, ProviderError> {
        let datacenter = credentials.datacenter()?;
        let base = match &self.api_base {
            Some(base) => base.as_str().trim_end_matches('/').to_owned(),
            None => format!("https://{datacenter}.api.mailchimp.com"),
        };
        Url::parse(&format!(
            "{base}/3.0/lists/{}/members",
            credentials.audience_id()
        ))
        .map_err(|_| ProviderError::MalformedApiKey)
    }
}
