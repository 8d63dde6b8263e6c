use super::Action;
use crate::registration::{register, Client};

/// Connections to external services that effects use. We keep these around to
/// share connections across effects.
#[derive(Debug, Clone, Default)]
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing HTTP client (e.g. one with custom timeouts)
    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }
}

/// Sends the user somewhere else. In the browser this replaces the page; other
/// shells can do whatever "going there" means for them.
pub trait Navigator {
    /// Go to `url`
    fn navigate(&self, url: &str);
}

/// Things that have to happen outside the controller. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Send the registration to the server
    Register(Client, register::Req),

    /// Registration worked; go where the server told us
    Navigate(String),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the controller needs to handle
    pub async fn run<N: Navigator>(self, ctx: &EffectContext, navigator: &N) -> Option<Action> {
        match self {
            Self::Register(client, req) => {
                tracing::info!(server = %client.server, "registering");

                let result = client.register(&ctx.http, &req).await;

                Some(Action::Registered(result))
            }

            Self::Navigate(url) => {
                tracing::info!(%url, "navigating");

                navigator.navigate(&url);

                None
            }
        }
    }
}
