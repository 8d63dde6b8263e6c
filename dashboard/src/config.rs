use clap::{Args, Parser, Subcommand};
use core::time::Duration;
use dashboard_core::registration::{self, CsrfToken, FormData};

/// Talk to the dashboard from the command line
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// What to do
    #[clap(subcommand)]
    pub command: Command,
}

/// Things the CLI can do
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a registration the same way the sign-up page does
    Register(RegisterArgs),

    /// Show which scripts and stylesheets a page would load
    Assets(AssetsArgs),
}

/// Options for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Where the dashboard is served from (protocol and domain only)
    #[clap(long, env = "DASHBOARD_SERVER", default_value = "http://localhost:8080")]
    pub server: String,

    /// A form field, as NAME=VALUE. Repeat for each field, in page order.
    #[clap(long = "field", value_name = "NAME=VALUE", value_parser = field_parser)]
    pub fields: Vec<(String, String)>,

    /// The new account's password
    #[clap(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// The password confirmation. Defaults to `--password`.
    #[clap(long)]
    pub match_password: Option<String>,

    /// Header the server expects the CSRF token in
    #[clap(long, env = "DASHBOARD_CSRF_HEADER", requires = "csrf_token")]
    pub csrf_header: Option<String>,

    /// The CSRF token from the sign-up page
    #[clap(
        long,
        env = "DASHBOARD_CSRF_TOKEN",
        hide_env_values = true,
        requires = "csrf_header"
    )]
    pub csrf_token: Option<String>,

    /// Give up on the server after this many seconds. Waits indefinitely if
    /// unset.
    #[clap(long, env = "DASHBOARD_TIMEOUT", value_parser = duration_parser)]
    pub timeout: Option<Duration>,
}

impl RegisterArgs {
    /// The form as the sign-up page would submit it: the extra fields in
    /// order, then the password and its confirmation.
    pub fn form(&self) -> FormData {
        let mut form: FormData = self.fields.iter().cloned().collect();

        form.push(registration::form::PASSWORD_FIELD, &self.password);
        form.push(
            registration::form::MATCHING_PASSWORD_FIELD,
            self.match_password.as_ref().unwrap_or(&self.password),
        );

        form
    }

    /// The CSRF token, if both halves were given
    pub fn csrf(&self) -> Option<CsrfToken> {
        CsrfToken::from_meta(|name| match name {
            registration::csrf::HEADER_META => self.csrf_header.clone(),
            registration::csrf::TOKEN_META => self.csrf_token.clone(),
            _ => None,
        })
    }
}

/// Options for `assets`
#[derive(Debug, Args)]
pub struct AssetsArgs {
    /// The URL path the page is served from
    #[clap(long, default_value = "/")]
    pub path: String,

    /// A selector that matches something on the page. Repeat for each one.
    #[clap(long = "marker", value_name = "SELECTOR")]
    pub markers: Vec<String>,
}

/// Parse `NAME=VALUE`. The value may contain `=`; the name may not be empty.
fn field_parser(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("expected NAME=VALUE, got `{s}`")),
    }
}

/// Parse a number of seconds
fn duration_parser(s: &str) -> Result<Duration, core::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}
