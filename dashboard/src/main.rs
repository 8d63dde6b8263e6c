//! Drive the dashboard's client behavior from a terminal

/// Configuration and argument parsing
mod config;

/// Preview which assets a page would load
mod preview;

use clap::Parser;
use config::{Command, Config, RegisterArgs};
use core::cell::RefCell;
use dashboard_core::controller::{Action, Controller, EffectContext, Messages, Navigator, View};
use dashboard_core::registration::{Client, Passwords};
use std::{collections::VecDeque, process::ExitCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Things that stop us from even trying
#[derive(Debug, thiserror::Error)]
enum Problem {
    #[error("could not set up the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// How a registration attempt ended
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// The server accepted us and said where to go next
    Redirected(String),

    /// The form ended up showing an error
    Failed(View),
}

/// Remembers where the controller told us to go instead of going there.
#[derive(Debug, Default)]
struct Destination(RefCell<Option<String>>);

impl Navigator for Destination {
    fn navigate(&self, url: &str) {
        *self.0.borrow_mut() = Some(url.to_owned());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // stdout is for results, so logs go to stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match config.command {
        Command::Register(args) => match register(&args).await {
            Ok(Outcome::Redirected(url)) => {
                println!("{url}");
                ExitCode::SUCCESS
            }
            Ok(Outcome::Failed(view)) => {
                report(&view);
                ExitCode::FAILURE
            }
            Err(problem) => {
                eprintln!("{problem}");
                ExitCode::FAILURE
            }
        },
        Command::Assets(args) => preview::run(&args),
    }
}

/// Submit the form once, feeding every effect's result back into the
/// controller until it has nothing left to do.
async fn register(args: &RegisterArgs) -> Result<Outcome, Problem> {
    let mut http = reqwest::Client::builder();
    if let Some(timeout) = args.timeout {
        http = http.timeout(timeout);
    }
    let ctx = EffectContext::with_http(http.build()?);

    let mut controller = Controller::new(Client::new(&args.server), Messages::default());
    let destination = Destination::default();

    let form = args.form();
    let mut queue = VecDeque::from([Action::Submit {
        passwords: Passwords::from_form(&form),
        form,
        csrf: args.csrf(),
    }]);

    while let Some(action) = queue.pop_front() {
        for effect in controller.handle(action) {
            if let Some(next) = effect.run(&ctx, &destination).await {
                queue.push_back(next);
            }
        }
    }

    Ok(match destination.0.into_inner() {
        Some(url) => Outcome::Redirected(url),
        None => Outcome::Failed(controller.view().clone()),
    })
}

/// Say what the form would have shown.
fn report(view: &View) {
    if view.existing_account {
        eprintln!("An account with that email already exists");
    }

    match &view.global_error {
        Some(message) => eprintln!("{message}"),
        None if !view.existing_account => eprintln!("registration did not go through"),
        None => {}
    }
}
