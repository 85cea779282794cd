//! Newsletter and contact form handlers.
//!
//! Both only record the submission; delivering email is handled elsewhere.

use actix_web::{HttpResponse, web};

use lookbook_core::domain::{NewContactSubmission, NewSubscriber, Subscriber};
use lookbook_shared::ApiResponse;
use lookbook_shared::dto::ContactReceipt;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/newsletter
///
/// Signing up twice with the same address returns the existing subscription.
pub async fn subscribe(
    state: web::Data<AppState>,
    body: web::Json<NewSubscriber>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    draft.validate()?;

    let email = draft.email.trim().to_lowercase();
    let lookup = email.clone();
    let existing = state
        .subscribers
        .list_where(&move |s: &Subscriber| s.email == lookup)
        .await?;
    if let Some(subscriber) = existing.into_iter().next() {
        return Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
            subscriber,
            "Already subscribed",
        )));
    }

    let subscriber = state.subscribers.create(NewSubscriber { email }).await?;
    tracing::info!(subscriber_id = subscriber.id, "Newsletter signup");
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        subscriber,
        "Subscribed",
    )))
}

/// POST /api/contact
pub async fn submit_contact(
    state: web::Data<AppState>,
    body: web::Json<NewContactSubmission>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    draft.validate()?;

    let submission = state.contacts.create(draft).await?;
    tracing::info!(submission_id = submission.id, "Contact form received");
    Ok(HttpResponse::Created().json(ApiResponse::ok(ContactReceipt::from(&submission))))
}
