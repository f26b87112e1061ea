//! Store creation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use storebuilder_core::suggest_domain;

use crate::backend::{BackendError, NewStore};
use crate::middleware::Operator;
use crate::state::AppState;

/// Create store form data.
#[derive(Debug, Default, Deserialize)]
pub struct CreateStoreForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub logo_url: String,
}

impl CreateStoreForm {
    /// The store to create, deriving the domain from the name when blank.
    ///
    /// # Errors
    ///
    /// Returns the message to show when the name is missing.
    pub fn to_new_store(&self) -> Result<NewStore, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Store name is required!");
        }

        let domain = match self.domain.trim() {
            "" => suggest_domain(name),
            domain => domain.to_string(),
        };

        Ok(NewStore {
            name: name.to_string(),
            domain,
            logo_url: self.logo_url.trim().to_string(),
        })
    }
}

/// Create store page template.
#[derive(Template, WebTemplate)]
#[template(path = "console/create_store.html")]
pub struct CreateStoreTemplate {
    pub error: Option<String>,
    pub name: String,
    pub domain: String,
    pub logo_url: String,
}

impl CreateStoreTemplate {
    fn refill(form: &CreateStoreForm, error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            name: form.name.clone(),
            domain: form.domain.clone(),
            logo_url: form.logo_url.clone(),
        }
    }
}

/// Display the create store page.
pub async fn create_page() -> CreateStoreTemplate {
    CreateStoreTemplate {
        error: None,
        name: String::new(),
        domain: String::new(),
        logo_url: String::new(),
    }
}

/// Handle create store form submission.
pub async fn create(
    State(state): State<AppState>,
    Operator(credential): Operator,
    Form(form): Form<CreateStoreForm>,
) -> Response {
    let store = match form.to_new_store() {
        Ok(store) => store,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, CreateStoreTemplate::refill(&form, message))
                .into_response();
        }
    };

    let token = SecretString::from(credential.token);
    match state.backend().create_store(&token, &store).await {
        Ok(()) => {
            tracing::info!(
                user_id = %credential.user_id,
                domain = %store.domain,
                "Store created"
            );
            Redirect::to("/dashboard").into_response()
        }
        Err(BackendError::Rejected(message)) => {
            (StatusCode::BAD_REQUEST, CreateStoreTemplate::refill(&form, &message)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store creation failed");
            (
                StatusCode::BAD_GATEWAY,
                CreateStoreTemplate::refill(&form, "Failed to create store."),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_derived_from_name() {
        let form = CreateStoreForm {
            name: " Acme Toys ".to_string(),
            ..CreateStoreForm::default()
        };
        let store = form.to_new_store().unwrap();
        assert_eq!(store.name, "Acme Toys");
        assert_eq!(store.domain, "acmetoys");
    }

    #[test]
    fn test_explicit_domain_kept() {
        let form = CreateStoreForm {
            name: "Acme Toys".to_string(),
            domain: "acme.com".to_string(),
            logo_url: "https://cdn.example.com/logo.png".to_string(),
        };
        let store = form.to_new_store().unwrap();
        assert_eq!(store.domain, "acme.com");
        assert_eq!(store.logo_url, "https://cdn.example.com/logo.png");
    }

    #[test]
    fn test_name_required() {
        let form = CreateStoreForm {
            name: "   ".to_string(),
            domain: "acme".to_string(),
            ..CreateStoreForm::default()
        };
        assert_eq!(form.to_new_store().unwrap_err(), "Store name is required!");
    }
}
