//! The "functional core" of the registration form. Shells (the browser, the
//! CLI) turn what the user does into `Action`s, render the `View`, and run the
//! `Effect`s that come back.

/// Things that can happen to the form
pub mod action;
pub use action::Action;

/// Side effects the shell has to carry out
pub mod effect;
pub use effect::{Effect, EffectContext, Navigator};

use crate::registration::{register, Client};

/// Text shown to the user. The mismatch message is localized by the server, so
/// shells may replace the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown while the password and its confirmation differ
    pub password_mismatch: String,

    /// Shown for any failure we don't have a specific message for
    pub generic_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            password_mismatch: "Passwords do not match".to_owned(),
            generic_error: "Error!".to_owned(),
        }
    }
}

/// What the form should look like right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Contents of `#globalError`. `None` means empty and hidden.
    pub global_error: Option<String>,

    /// Whether `#existingAccountError` is visible
    pub existing_account: bool,

    /// Whether a request is in flight. Shells render this as the submit button
    /// being disabled.
    pub submitting: bool,

    /// How many times the form has been submitted. Every time this changes,
    /// shells empty the server-rendered `.alert` and `.error-list` regions (and
    /// hide the alerts) before applying the fields above, since our own regions
    /// may also be alerts.
    pub submissions: u32,
}

/// Remembers which submission the server-rendered alerts were last cleared
/// for, so shells clear them once per submit rather than on every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertClearing {
    /// `View::submissions` as of the last clear
    cleared_for: u32,
}

impl AlertClearing {
    /// Returns `true` the first time it's shown a view with a new submission,
    /// and `false` until the next one.
    pub fn should_clear(&mut self, view: &View) -> bool {
        if view.submissions == self.cleared_for {
            return false;
        }

        self.cleared_for = view.submissions;
        true
    }
}

/// Mediates one registration attempt at a time.
#[derive(Debug)]
pub struct Controller {
    /// Where to send registrations
    client: Client,

    /// What to say when things go wrong
    messages: Messages,

    /// Current state of the form
    view: View,
}

impl Controller {
    /// Create a controller for a fresh page
    pub fn new(client: Client, messages: Messages) -> Self {
        Self {
            client,
            messages,
            view: View::default(),
        }
    }

    /// The state shells should render
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Handle an `Action`, updating the form's state and producing any side
    /// effects.
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::PasswordsEdited(passwords) => {
                self.view.global_error = if passwords.matches() {
                    None
                } else {
                    Some(self.messages.password_mismatch.clone())
                };

                vec![]
            }

            Action::Submit {
                passwords,
                form,
                csrf,
            } => {
                if self.view.submitting {
                    tracing::debug!("ignoring submit while a registration is in flight");
                    return vec![];
                }

                self.view.submitting = true;
                self.view.submissions = self.view.submissions.wrapping_add(1);
                self.view.global_error = None;
                self.view.existing_account = false;

                if !passwords.matches() {
                    self.view.global_error = Some(self.messages.password_mismatch.clone());
                    self.view.submitting = false;

                    return vec![];
                }

                tracing::info!(fields = form.len(), "submitting registration");
                vec![Effect::Register(
                    self.client.clone(),
                    register::Req { form, csrf },
                )]
            }

            Action::Registered(Ok(resp)) => {
                if let Some(url) = resp.accepted_redirect() {
                    tracing::info!(url, "registration accepted");
                    return vec![Effect::Navigate(url.to_owned())];
                }

                tracing::warn!(?resp, "2xx response but success = false");
                self.view.global_error = Some(self.messages.generic_error.clone());
                self.view.submitting = false;

                vec![]
            }

            Action::Registered(Err(err)) => {
                tracing::warn!(%err, messages = ?err.messages(), "registration failed");

                if err.is_account_exists() {
                    self.view.existing_account = true;
                } else {
                    self.view.global_error = Some(self.messages.generic_error.clone());
                }
                self.view.submitting = false;

                vec![]
            }
        }
    }
}
