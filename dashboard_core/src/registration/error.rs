use reqwest::StatusCode;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// The code the server uses when an account with the submitted email already
/// exists.
pub const ACCOUNT_EXISTS: i64 = 2;

/// The body the server sends along with a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody {
    /// What went wrong, as a machine-readable code
    #[serde(default)]
    pub code: Option<i64>,

    /// What went wrong, for humans
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Vec<String>,
}

/// Read `messages` from a response body without letting its shape decide
/// whether the rest of the body parses. Accepts a list of strings, a single
/// string, or `null`; anything else reads as no messages.
pub(crate) fn lenient_messages<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Messages {
        Many(Vec<String>),
        One(String),
        Other(IgnoredAny),
    }

    Ok(match Messages::deserialize(deserializer)? {
        Messages::Many(messages) => messages,
        Messages::One(message) => vec![message],
        Messages::Other(_) => Vec::new(),
    })
}

/// Errors that can happen while registering
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't talk to the server at all, or couldn't read its response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. If the body was JSON in the
    /// shape we expect, it's here.
    #[error("server rejected registration ({status})")]
    Rejected {
        /// The status the server returned
        status: StatusCode,

        /// The parsed body, if any
        body: Option<FailureBody>,
    },
}

impl Error {
    /// The structured code the server sent with a rejection, if there was one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rejected {
                body: Some(FailureBody { code, .. }),
                ..
            } => *code,
            _ => None,
        }
    }

    /// Human-readable messages the server sent with a rejection.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Rejected {
                body: Some(FailureBody { messages, .. }),
                ..
            } => messages,
            _ => &[],
        }
    }

    /// Did the server say the account already exists?
    pub fn is_account_exists(&self) -> bool {
        self.code() == Some(ACCOUNT_EXISTS)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rejected(body: Option<FailureBody>) -> Error {
        Error::Rejected {
            status: StatusCode::CONFLICT,
            body,
        }
    }

    #[test]
    fn code_two_means_account_exists() {
        let err = rejected(Some(FailureBody {
            code: Some(2),
            messages: vec!["An account already exists for the email address".into()],
        }));

        assert!(err.is_account_exists());
        assert_eq!(err.messages().len(), 1);
    }

    #[test]
    fn other_codes_do_not() {
        assert!(!rejected(Some(FailureBody {
            code: Some(1),
            messages: vec![],
        }))
        .is_account_exists());
    }

    #[test]
    fn missing_body_has_no_code() {
        let err = rejected(None);

        assert_eq!(err.code(), None);
        assert!(err.messages().is_empty());
    }

    #[test]
    fn failure_body_tolerates_missing_fields() {
        let body: FailureBody = serde_json::from_str(r#"{"code": 5}"#).unwrap();

        assert_eq!(body.code, Some(5));
        assert!(body.messages.is_empty());
    }

    mod messages_shape {
        use super::*;

        fn parse(raw: &str) -> FailureBody {
            serde_json::from_str(raw).unwrap()
        }

        #[test]
        fn null_keeps_the_code() {
            let body = parse(r#"{"code": 2, "messages": null}"#);

            assert_eq!(body.code, Some(2));
            assert!(body.messages.is_empty());
        }

        #[test]
        fn single_string_keeps_the_code() {
            let body = parse(r#"{"code": 2, "messages": "An account already exists"}"#);

            assert_eq!(body.code, Some(2));
            assert_eq!(body.messages, vec!["An account already exists".to_string()]);
        }

        #[test]
        fn unexpected_shape_keeps_the_code() {
            let body = parse(r#"{"code": 2, "messages": {"email": "taken"}}"#);

            assert!(rejected(Some(body)).is_account_exists());
        }
    }
}
