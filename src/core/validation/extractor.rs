//! Axum extractor for customer request bodies
//!
//! `CustomerPayload` reads the JSON body into a [`CustomerDraft`]. A body
//! that is not JSON, or has a non-string value where a field is expected,
//! is rejected as a whole; the field rules themselves are applied by the
//! service so that every violation is reported together.

use crate::core::customer::CustomerDraft;
use crate::core::error::{RegistryError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};

/// Parsed, not yet validated, customer body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_customer(
///     State(state): State<AppState>,
///     CustomerPayload(draft): CustomerPayload,
/// ) -> Result<(StatusCode, Json<CustomerRecord>), RegistryError> {
///     let record = state.service.create(draft).await?;
///     Ok((StatusCode::CREATED, Json(record)))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CustomerPayload(pub CustomerDraft);

impl CustomerPayload {
    pub fn into_inner(self) -> CustomerDraft {
        self.0
    }
}

impl std::ops::Deref for CustomerPayload {
    type Target = CustomerDraft;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for CustomerPayload
where
    S: Send + Sync,
{
    type Rejection = RegistryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<CustomerDraft>::from_request(req, state).await {
            Ok(Json(draft)) => Ok(CustomerPayload(draft)),
            Err(rejection) => Err(RegistryError::Validation(ValidationError::InvalidBody {
                message: rejection.body_text(),
            })),
        }
    }
}
