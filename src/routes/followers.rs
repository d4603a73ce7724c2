use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use anyhow::Context;

use crate::{
    domain::EmailAddress,
    email_client::{EmailClient, TemplatedEmail},
    startup::Community,
};

use super::helpers::error_chain_fmt;

#[derive(serde::Deserialize)]
pub struct FollowerData {
    pub email: String,
}

#[derive(thiserror::Error)]
pub enum FollowerError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for FollowerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for FollowerError {
    fn status_code(&self) -> StatusCode {
        match self {
            FollowerError::ValidationError(_) => StatusCode::BAD_REQUEST,
            FollowerError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Registering a new follower",
    skip(payload, email_client, community),
    fields(follower_email = %payload.email)
)]
pub async fn register_follower(
    payload: web::Json<FollowerData>,
    email_client: web::Data<EmailClient>,
    community: web::Data<Community>,
) -> Result<HttpResponse, FollowerError> {
    let email = EmailAddress::parse(payload.0.email).map_err(FollowerError::ValidationError)?;

    let contact_list = email_client
        .contact_list_by_name(Some(&community.contact_list_name))
        .await
        .context("Failed to query the community contact list.")?
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Contact list {} is not provisioned.",
                community.contact_list_name
            )
        })?;

    email_client
        .add_email_to_contact_list(&email, contact_list.id)
        .await
        .context("Failed to add the follower to the contact list.")?;

    let welcome = TemplatedEmail::new(email, community.welcome_template.clone());
    email_client
        .send_templated_email(&welcome)
        .await
        .context("Failed to send the welcome email.")?;

    Ok(HttpResponse::Created().finish())
}
