//! Console authentication route handlers.
//!
//! Login exchanges email and password for a backend bearer token and keeps
//! it in the session; logout flushes the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use storebuilder_core::Credential;
use tower_sessions::Session;

use crate::backend::{BackendError, SignupRequest};
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::gate::LOGIN_PATH;
use crate::models::SessionCredential;
use crate::state::AppState;

/// Minimum password length accepted by signup.
pub const MIN_PASSWORD_LEN: usize = 6;

const SERVER_ERROR: &str = "Server error. Please try again later.";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub website_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl SignupForm {
    /// Check the form the way the signup page promises.
    ///
    /// # Errors
    ///
    /// Returns the message to show next to the form.
    pub fn validate(&self) -> Result<(), &'static str> {
        let required = [
            &self.website_name,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err("Please fill out all fields.");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters long.");
        }
        Ok(())
    }
}

/// Query parameters for message display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "console/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "console/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
    pub website_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl SignupTemplate {
    fn refill(form: &SignupForm, error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            website_name: form.website_name.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> LoginTemplate {
    let success = query
        .success
        .filter(|code| code == "signup")
        .map(|_| "Account created successfully! Please sign in.".to_string());

    LoginTemplate {
        error: None,
        success,
        email: String::new(),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_string();
    let password = SecretString::from(form.password);

    if email.is_empty() || password.expose_secret().is_empty() {
        return Ok(login_error(StatusCode::BAD_REQUEST, "All fields are required.", email));
    }

    let login = match state.backend().login(&email, &password).await {
        Ok(login) => login,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            let (status, message) = match &e {
                BackendError::Rejected(message) => (StatusCode::UNAUTHORIZED, message.as_str()),
                BackendError::MissingField(_) => (StatusCode::UNAUTHORIZED, "Invalid credentials."),
                _ => (StatusCode::BAD_GATEWAY, SERVER_ERROR),
            };
            return Ok(login_error(status, message, email));
        }
    };

    let credential = Credential {
        token: login.token.expose_secret().to_string(),
        user_id: login.user_id,
        display_name: login.first_name,
    };
    SessionCredential::store(&session, &credential).await?;
    set_sentry_user(&credential.user_id);

    tracing::info!(user_id = %credential.user_id, "Operator logged in");
    Ok(Redirect::to("/dashboard").into_response())
}

fn login_error(status: StatusCode, message: &str, email: String) -> Response {
    let template = LoginTemplate {
        error: Some(message.to_string()),
        success: None,
        email,
    };
    (status, template).into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    SessionCredential::clear(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to(LOGIN_PATH))
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page() -> SignupTemplate {
    SignupTemplate {
        error: None,
        website_name: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
    }
}

/// Handle signup form submission.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    if let Err(message) = form.validate() {
        return (StatusCode::BAD_REQUEST, SignupTemplate::refill(&form, message)).into_response();
    }

    let request = SignupRequest {
        website_name: form.website_name.trim().to_string(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: SecretString::from(form.password.clone()),
    };

    match state.backend().signup(&request).await {
        Ok(()) => {
            tracing::info!(email = %request.email, "Operator signed up");
            Redirect::to("/login?success=signup").into_response()
        }
        Err(BackendError::Rejected(message)) => {
            tracing::warn!(message = %message, "Signup rejected");
            (StatusCode::BAD_REQUEST, SignupTemplate::refill(&form, &message)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Signup failed");
            (StatusCode::BAD_GATEWAY, SignupTemplate::refill(&form, SERVER_ERROR)).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            website_name: "Acme Toys".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Shah".to_string(),
            email: "priya@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert_eq!(form("secret1", "secret1").validate(), Ok(()));
        assert_eq!(
            form("secret1", "secret2").validate(),
            Err("Passwords do not match.")
        );
        assert_eq!(
            form("abc", "abc").validate(),
            Err("Password must be at least 6 characters long.")
        );

        let mut missing = form("secret1", "secret1");
        missing.last_name = "  ".to_string();
        assert_eq!(missing.validate(), Err("Please fill out all fields."));
    }

    #[test]
    fn test_signup_refill_keeps_fields_but_not_password() {
        let html = SignupTemplate::refill(&form("hunter22", "hunter22"), "Email taken")
            .render()
            .unwrap();
        assert!(html.contains("Email taken"));
        assert!(html.contains("priya@example.com"));
        assert!(!html.contains("hunter22"));
    }

    #[test]
    fn test_login_page_success_message() {
        let html = LoginTemplate {
            error: None,
            success: Some("Account created successfully! Please sign in.".to_string()),
            email: String::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Account created successfully"));
    }
}
