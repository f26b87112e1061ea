//! Console dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use storebuilder_core::{Plan, StoreIdentity, TrialStatus, canonical_storefront_url, clean_domain};

use crate::middleware::Operator;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "console/dashboard.html")]
pub struct DashboardTemplate {
    pub greeting_name: String,
    pub store_name: String,
    /// Whether the operator has a store at all.
    pub has_store: bool,
    pub trial: TrialStatus,
    /// Canonical URL of the operator's live storefront.
    pub live_url: String,
    /// Short label for the live store link.
    pub live_label: String,
}

impl DashboardTemplate {
    #[must_use]
    pub const fn on_trial(&self) -> bool {
        matches!(self.trial.plan, Plan::Trial)
    }

    #[must_use]
    pub const fn on_premium(&self) -> bool {
        matches!(self.trial.plan, Plan::Premium)
    }

    #[must_use]
    pub fn days_left(&self) -> i64 {
        self.trial.days_left.unwrap_or_default()
    }
}

/// Display the dashboard.
///
/// Trial status and store lookup run concurrently. An expired plan sends the
/// operator to `/upgrade`; other lookup failures degrade the page.
pub async fn show(State(state): State<AppState>, Operator(credential): Operator) -> Response {
    let backend = state.backend();
    let (trial, store) = tokio::join!(
        backend.trial_status(&credential.user_id),
        backend.store_by_user(&credential.user_id),
    );

    let trial = trial.unwrap_or_else(|e| {
        tracing::warn!(user_id = %credential.user_id, error = %e, "Trial status unavailable");
        TrialStatus::default()
    });

    if trial.is_expired() {
        return Redirect::to("/upgrade").into_response();
    }

    let store = store
        .inspect_err(|e| {
            tracing::warn!(user_id = %credential.user_id, error = %e, "Store lookup failed");
        })
        .ok();

    let env = state.storefront_env();
    let domain = store.as_ref().map(|store| store.domain.as_str());
    let live_url = canonical_storefront_url(domain, env);
    let live_label = clean_domain(domain, env).unwrap_or_else(|| "Website".to_string());

    let has_store = store.is_some();
    let store = store.map_or_else(
        || StoreIdentity::fallback(&state.config().console_fallback_name),
        |store| store.or_fallback_name(&state.config().console_fallback_name),
    );

    DashboardTemplate {
        greeting_name: credential
            .display_name
            .unwrap_or_else(|| "User".to_string()),
        store_name: store.name,
        has_store,
        trial,
        live_url,
        live_label,
    }
    .into_response()
}
