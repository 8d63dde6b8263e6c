//! Common code for the dashboard clients (WASM in the browser, the CLI)

/// Which page of the dashboard we're on.
pub mod page;
pub use page::Page;

/// The static table of optional scripts and stylesheets, and which markers
/// pull them in.
pub mod assets;
pub use assets::{AssetRule, Marker, Resource};

/// Append matching assets to a document.
pub mod loader;
pub use loader::Dom;

/// Talk to the registration endpoint.
pub mod registration;

/// The registration form's state and the transitions between states.
pub mod controller;
pub use controller::Controller;
