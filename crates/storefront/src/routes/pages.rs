//! Static page popovers and the contact form.
//!
//! Terms and contact are anchored popover fragments rather than full
//! pages. The contact form is validated server-side; sending is
//! simulated, so a valid submission just yields a success toast.

use std::sync::LazyLock;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse, response::Redirect, response::Response};
use regex::Regex;
use serde::Deserialize;
use tracing::instrument;

use crate::routes::cart::ToastTemplate;
use crate::state::AppState;

/// Minimal email shape check: something, an `@`, something, a dot,
/// something. Deliverability is not our problem.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

const MIN_MESSAGE_LEN: usize = 5;

/// Terms & conditions popover fragment.
#[derive(Template, WebTemplate)]
#[template(path = "pages/terms.html")]
pub struct TermsTemplate;

/// Contact form field values, echoed back on validation failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Per-field validation errors.
#[derive(Debug, Clone, Default)]
pub struct ContactErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactErrors {
    /// Whether every field passed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Validate a contact submission.
#[must_use]
pub fn validate_contact(form: &ContactForm) -> ContactErrors {
    let mut errors = ContactErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name required".to_owned());
    }
    if !EMAIL_RE.is_match(form.email.trim()) {
        errors.email = Some("Valid email required".to_owned());
    }
    if form.message.trim().len() < MIN_MESSAGE_LEN {
        errors.message = Some("Message too short".to_owned());
    }

    errors
}

/// Contact popover fragment.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub values: ContactForm,
    pub errors: ContactErrors,
}

/// Display the terms popover.
#[instrument]
pub async fn terms() -> impl IntoResponse {
    TermsTemplate
}

/// Display the contact popover.
#[instrument]
pub async fn contact_form() -> impl IntoResponse {
    ContactTemplate {
        values: ContactForm::default(),
        errors: ContactErrors::default(),
    }
}

/// Handle a contact submission.
#[instrument(skip(form))]
pub async fn contact_submit(Form(form): Form<ContactForm>) -> Response {
    let errors = validate_contact(&form);
    if !errors.is_clean() {
        return ContactTemplate {
            values: form,
            errors,
        }
        .into_response();
    }

    tracing::info!(name = %form.name.trim(), "Contact message received");
    ToastTemplate {
        level: "success",
        message: "Message sent!".to_owned(),
    }
    .into_response()
}

/// Toggle and persist the glass/normal UI mode, then reload the page.
#[instrument(skip(state))]
pub async fn toggle_mode(State(state): State<AppState>) -> Redirect {
    let mode = state.set_ui_mode(state.ui_mode().toggled());
    state.session().persist_ui_mode(mode);
    Redirect::to("/")
}
