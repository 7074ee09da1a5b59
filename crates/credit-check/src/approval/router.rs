use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApprovalStatus, CreditApplication};
use super::repository::CreditStore;
use super::service::{CreditCheckError, CreditCheckService};

/// Body returned for a structurally valid application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditApprovalResponse {
    pub credit_approval: ApprovalStatus,
}

/// Router builder exposing the credit check endpoint.
pub fn approval_router<S>(service: Arc<CreditCheckService<S>>) -> Router
where
    S: CreditStore + 'static,
{
    Router::new()
        .route("/check_credit", post(check_credit_handler::<S>))
        .with_state(service)
}

/// Accepts the application as either a urlencoded form or a JSON body.
pub struct ApplicationPayload(pub CreditApplication);

#[async_trait]
impl<St> FromRequest<St> for ApplicationPayload
where
    St: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(application) = Form::<CreditApplication>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(application))
        } else {
            let Json(application) = Json::<CreditApplication>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(application))
        }
    }
}

pub(crate) async fn check_credit_handler<S>(
    State(service): State<Arc<CreditCheckService<S>>>,
    ApplicationPayload(application): ApplicationPayload,
) -> Response
where
    S: CreditStore + 'static,
{
    match service.process(application) {
        Ok(decision) => {
            let body = CreditApprovalResponse {
                credit_approval: decision.status(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(CreditCheckError::ValidationFailed { detail, .. }) => {
            let payload = json!({ "detail": detail });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}
