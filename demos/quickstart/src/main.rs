//! # formsmith quickstart
//!
//! Builds a small contact form as an admin, fills it in, and submits it to
//! the configured endpoint:
//!
//! - **Settings**: `quickstart.toml` if present, otherwise defaults, with
//!   `FORMSMITH_*` environment overrides either way
//! - **Builder**: fields are dropped from the palette and configured through
//!   edit sessions
//! - **Submission**: values are posted as JSON with the reqwest transport
//!
//! ## Running
//!
//! ```bash
//! FORMSMITH_SUBMIT_URL=http://localhost:8080/submit cargo run --package formsmith-quickstart
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use formsmith::core::{logging, settings_loader};
use formsmith::prelude::*;

const SETTINGS_FILE: &str = "quickstart.toml";

fn load_settings() -> anyhow::Result<Settings> {
    let settings = if Path::new(SETTINGS_FILE).exists() {
        settings_loader::from_toml_file_with_env(SETTINGS_FILE)
            .with_context(|| format!("loading {SETTINGS_FILE}"))?
    } else {
        settings_loader::from_env()
    };
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn drop_field(view: &mut FormBuilderView, field_type: FieldType, to: usize) -> anyhow::Result<()> {
    let palette_index = view
        .palette()
        .position(field_type)
        .with_context(|| format!("{field_type} is not on the palette"))?;
    view.on_drop(DropEvent::FromPalette { palette_index, to })?;
    Ok(())
}

fn build_contact_form(view: &mut FormBuilderView) -> anyhow::Result<()> {
    drop_field(view, FieldType::Text, 0)?;
    view.select_field(0)?;
    {
        let draft = view.draft_mut()?;
        draft.label = "Name".into();
        draft.required = true;
        draft.max_length = Some(80);
    }
    view.save_edit()?;

    drop_field(view, FieldType::Text, 1)?;
    view.select_field(1)?;
    {
        let draft = view.draft_mut()?;
        draft.label = "Postcode".into();
        draft.pattern = Some("[0-9]{5}".into());
        draft.help_text = Some("Five digits".into());
    }
    view.save_edit()?;

    drop_field(view, FieldType::Checkbox, 2)?;
    view.select_field(2)?;
    view.update_options("Email, Phone, Post")?;
    view.draft_mut()?.label = "Contact me by".into();
    view.save_edit()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    logging::setup_logging(&settings);
    tracing::info!(endpoint = %settings.submit_url, "quickstart configured");

    let transport = HttpTransport::from_settings(&settings)?;
    let mut view = FormBuilderView::open(
        SessionContext::with_role(Role::Admin),
        Arc::new(transport),
        Arc::new(TracingNotifier),
        &settings,
    )?;

    build_contact_form(&mut view)?;

    view.set_value(0, "Ada Lovelace")?;
    view.set_value(1, "1815")?;
    if let Err(err) = view.submit().await {
        tracing::info!(error = %err, "first attempt refused as expected");
    }

    view.set_value(1, "18151")?;
    view.toggle_checkbox(2, "Email", true)?;
    view.toggle_checkbox(2, "Post", true)?;

    match view.submit().await {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Err(err) => {
            tracing::warn!(error = %err, "submission did not go through");
        }
    }

    let snapshot = formsmith::views::field_views_to_json(view.fields())?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    view.logout();
    Ok(())
}
