use std::{env, time};

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use url::{ParseError, Url};

use crate::provider::mailchimp::{MailchimpClient, MailchimpCredentials};
use crate::provider::{ProviderError, ProviderKind};

/// Settings
#[derive(Clone, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub newsletter: NewsletterSettings,
    pub mailchimp: MailchimpSettings,
}

impl Settings {
    /// Get settings from configuration files and environment variables
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().expect("Failed to determine the current directory");
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT");

        // Read the configuration from files and environment variables
        let mut settings: Self = Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(env.as_str())).required(true))
            // Environment variables (e.g., `NEWSLETTER_RELAY__APPLICATION__APP_PORT=8888`
            // would set Settings.application.app_port to 8888)
            .add_source(Environment::with_prefix("NEWSLETTER_RELAY").separator("__"))
            .build()?
            .try_deserialize()?;

        // The flat `MAILCHIMP_*` variables take precedence over any file-sourced value
        if let Ok(api_key) = env::var("MAILCHIMP_API_KEY") {
            settings.mailchimp.api_key = Some(SecretString::from(api_key));
        }
        if let Ok(audience_id) = env::var("MAILCHIMP_AUDIENCE_ID") {
            settings.mailchimp.audience_id = Some(audience_id);
        }

        Ok(settings)
    }
}

/// Application settings
#[derive(Clone, serde::Deserialize)]
pub struct ApplicationSettings {
    pub app_host: String,
    pub app_port: u16,
}

/// Newsletter relay settings
#[derive(Clone, serde::Deserialize)]
pub struct NewsletterSettings {
    pub provider: ProviderKind,
}

/// Mailchimp settings
///
/// Credentials are optional at startup; their absence only surfaces when a
/// subscription is attempted.
#[derive(Clone, serde::Deserialize)]
pub struct MailchimpSettings {
    pub api_key: Option<SecretString>,
    pub audience_id: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout_millis: u64,
}

impl MailchimpSettings {
    /// Build the Mailchimp API client
    pub fn client(&self) -> Result<MailchimpClient, ParseError> {
        let api_base = self.api_base_url.as_deref().map(Url::parse).transpose()?;
        Ok(MailchimpClient::new(api_base, self.timeout()))
    }

    /// Resolve the credentials, requiring both parts to be present
    pub fn credentials(&self) -> Result<MailchimpCredentials, ProviderError> {
        match (&self.api_key, &self.audience_id) {
            (Some(api_key), Some(audience_id)) => Ok(MailchimpCredentials::new(
                api_key.clone(),
                audience_id.clone(),
            )),
            _ => Err(ProviderError::MissingCredentials),
        }
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_millis)
    }
}

/// Available runtime environments
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
