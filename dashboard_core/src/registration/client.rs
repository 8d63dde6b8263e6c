use super::error::{self, Error, FailureBody};
use super::register;
use serde::de::DeserializeOwned;
use url::Url;

/// Client for the registration endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://dashboard.example.com`. In the browser, this is the page's
    /// origin.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }

    /// Submit a registration. This sends exactly one request; nothing is
    /// retried.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`, plus `Error::UrlParse` if the
    /// server address is not a valid base URL.
    pub async fn register(
        &self,
        http: &reqwest::Client,
        req: &register::Req,
    ) -> error::Result<register::Resp> {
        let url = Url::parse(&self.server)?.join(register::PATH)?;

        let (requested_with, script) = register::REQUESTED_WITH;
        let mut builder = http
            .post(url)
            .header(requested_with, script)
            .form(&req.form);

        match &req.csrf {
            Some(csrf) => builder = builder.header(csrf.header.as_str(), csrf.token.as_str()),
            None => tracing::warn!("no CSRF token on the page; the server will probably refuse"),
        }

        Self::handle_response(builder).await
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx) with a JSON body
    /// - `Error::Rejected` for any other status. The body is included if it
    ///   parsed as a `FailureBody`.
    /// - `Error::Http` if the request couldn't be sent or a 2xx body couldn't
    ///   be read.
    async fn handle_response<T>(req: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;

        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let body = match resp.json::<FailureBody>().await {
                Ok(body) => Some(body),
                Err(err) => {
                    tracing::debug!(?err, %status, "failure body was not JSON");
                    None
                }
            };

            Err(Error::Rejected { status, body })
        }
    }
}
