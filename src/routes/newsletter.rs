use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::domain::SubscriptionRequest;
use crate::provider::NewsletterProvider;
use crate::routes::SubscribeError;

/// Generic newsletter signup handler
///
/// Registered for both `GET` and `POST`; the same provider delegate serves
/// every method and owns all subscription logic.
#[tracing::instrument(
    name = "Forwarding newsletter signup to provider",
    skip_all,
    fields(provider = provider.name())
)]
pub async fn newsletter(
    body: web::Bytes,
    provider: web::Data<NewsletterProvider>,
) -> Result<HttpResponse, SubscribeError> {
    let request = SubscriptionRequest::parse(&body)?;
    provider.subscribe(request.email()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Thank you for subscribing!" })))
}
