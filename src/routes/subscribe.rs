use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::configuration::MailchimpSettings;
use crate::domain::SubscriptionRequest;
use crate::provider::mailchimp::MailchimpClient;
use crate::routes::SubscribeError;

/// Mailchimp subscription handler
///
/// Checks run in a fixed order: missing credentials are reported even when
/// the body is also malformed.
#[tracing::instrument(name = "Subscribing email address via Mailchimp", skip_all)]
pub async fn subscribe(
    body: web::Bytes,
    settings: web::Data<MailchimpSettings>,
    client: web::Data<MailchimpClient>,
) -> Result<HttpResponse, SubscribeError> {
    // Resolve credentials before looking at the request
    let credentials = settings.credentials().map_err(|e| {
        tracing::error!("Mailchimp credentials are not configured");
        e
    })?;

    // Parse subscriber data
    let request = SubscriptionRequest::parse(&body)?;

    // Register the address with the configured audience
    client.add_list_member(&credentials, request.email()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Thank you for subscribing!" })))
}

/// Usage hint for `GET` requests to the subscription endpoint
pub async fn subscribe_usage() -> HttpResponse {
    HttpResponse::Ok()
        .json(json!({ "message": "Use POST method to subscribe to the newsletter." }))
}
