#![warn(
    missing_docs,
    clippy::pedantic,
    clippy::allow_attributes,
    clippy::absolute_paths,
    clippy::alloc_instead_of_core,
    clippy::decimal_literal_representation,
    clippy::missing_docs_in_private_items
)]
#![allow(clippy::must_use_candidate)]

//! Browser interface for the dashboard, compiled to WASM. Assets load as soon
//! as the module starts, so include it after the page body (or as a module
//! script, which is deferred). The sign-up page also calls
//! `bind_registration_form`.

#[expect(clippy::missing_docs_in_private_items)]
mod utils;

/// The asset loader's view of the live document
mod dom;

/// The imperative shell around the registration controller
mod form;

use dashboard_core::{loader, Page};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

/// Set up panic and log reporting, then load the page's assets. Runs once,
/// when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
    tracing_wasm::set_as_global_default();

    match load_assets() {
        Ok(count) => tracing::debug!(count, "appended page assets"),
        Err(err) => tracing::error!(?err, "could not load page assets"),
    }
}

/// Append the scripts and stylesheets this page needs to its `<head>`.
/// Returns how many tags were added.
fn load_assets() -> Result<usize, JsValue> {
    let (window, document) = window_and_document()?;

    let page = Page::from_path(&window.location().pathname()?);
    let mut dom = dom::DocumentDom::new(document)?;

    Ok(loader::load(&page, &mut dom))
}

/// Wire up the registration form on this page, if there is one.
///
/// # Errors
///
/// Fails if there is no window or document, or if the listeners can't be
/// attached.
#[wasm_bindgen]
pub fn bind_registration_form() -> Result<(), JsValue> {
    let (window, document) = window_and_document()?;

    form::bind(window, document)
}

/// The globals every entry point needs
fn window_and_document() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    Ok((window, document))
}
