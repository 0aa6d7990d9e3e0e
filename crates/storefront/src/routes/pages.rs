//! Markdown-backed static pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::content::Page;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub page: Page,
}

/// Display the about page.
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> Response {
    match state.content().get_page("about") {
        Some(page) => ContentPageTemplate { page: page.clone() }.into_response(),
        None => AppError::NotFound("about".to_string()).into_response(),
    }
}
