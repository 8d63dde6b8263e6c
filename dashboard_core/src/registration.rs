/// Things that can go wrong while registering
pub mod error;
pub use error::Error;

/// The anti-forgery token echoed back to the server
pub mod csrf;
pub use csrf::CsrfToken;

/// Form fields, in the order they appear on the page
pub mod form;
pub use form::{Control, FormData, Passwords};

/// The registration endpoint's request and response
pub mod register;

/// Client for the registration endpoint
pub mod client;
pub use client::Client;
