//! Price-column chooser.

use axum::{Form, response::Redirect};
use fraghead_core::SizeTier;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session;

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleColumnForm {
    pub size: SizeTier,
}

/// Show or hide one price column, then go back to the table.
#[instrument(skip(session))]
pub async fn toggle(session: Session, Form(form): Form<ToggleColumnForm>) -> Result<Redirect> {
    let mut columns = session::columns(&session).await?;
    let visible = columns.toggle(form.size);
    session::set_columns(&session, &columns).await?;

    tracing::debug!(size = %form.size, visible, "Column toggled");
    Ok(Redirect::to("/"))
}
