//! Session gate for console routes.
//!
//! Wraps every console route except landing, login and signup. The gate
//! settles once per request from the session snapshot; it never asks the
//! backend whether the token is still valid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use storebuilder_core::{Credential, GateState, SessionGate};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::SessionCredential;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Neutral page shown while the gate has not settled.
#[derive(Template, WebTemplate)]
#[template(path = "console/checking.html")]
pub struct CheckingTemplate;

/// Response for a visitor the gate turned away.
pub enum GateRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl GateRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with("/api/") {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Middleware running the session gate in front of a console route.
///
/// On success the operator's [`Credential`] is added to the request
/// extensions for the [`Operator`] extractor.
pub async fn session_gate(session: Session, mut request: Request, next: Next) -> Response {
    let snapshot = match SessionCredential::load(&session).await {
        Ok(snapshot) => snapshot,
        Err(e) => return AppError::from(e).into_response(),
    };

    let mut gate = SessionGate::new();
    match gate.check(&snapshot) {
        GateState::Authenticated(credential) => {
            tracing::debug!(user_id = %credential.user_id, "Session gate open");
            request.extensions_mut().insert(credential.clone());
            next.run(request).await
        }
        GateState::Unauthenticated => {
            tracing::debug!(path = %request.uri().path(), "Session gate closed");
            GateRejection::for_path(request.uri().path()).into_response()
        }
        GateState::Checking => CheckingTemplate.into_response(),
    }
}

/// Extractor for the credential admitted by [`session_gate`].
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(Operator(credential): Operator) -> impl IntoResponse {
///     format!("Hello, {}!", credential.user_id)
/// }
/// ```
pub struct Operator(pub Credential);

impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Credential>()
            .cloned()
            .map(Self)
            .ok_or_else(|| GateRejection::for_path(parts.uri.path()))
    }
}
