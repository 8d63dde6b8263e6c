use super::{CsrfToken, FormData};
use serde::{Deserialize, Serialize};

/// The request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Req {
    /// Every field on the registration form, sent URL-encoded.
    pub form: FormData,

    /// Anti-forgery token, if the page had one.
    pub csrf: Option<CsrfToken>,
}

/// What the server says after a 2xx response. `success` can still be false!
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resp {
    /// Whether the account was created
    #[serde(default)]
    pub success: bool,

    /// Where to send the browser next
    #[serde(default)]
    pub redirect_url: Option<String>,

    /// A machine-readable result code, if the server sent one
    #[serde(default)]
    pub code: Option<i64>,

    /// Messages for humans
    #[serde(default, deserialize_with = "super::error::lenient_messages")]
    pub messages: Vec<String>,
}

impl Resp {
    /// Where to go next, if the registration was accepted. A success without
    /// a redirect doesn't count.
    pub fn accepted_redirect(&self) -> Option<&str> {
        if self.success {
            self.redirect_url.as_deref()
        } else {
            None
        }
    }
}

/// Where the registration endpoint lives.
pub const PATH: &str = "/user/registration";

/// Header that marks the request as coming from script rather than a plain
/// form post.
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

#[cfg(test)]
mod test {
    use super::*;

    mod resp {
        use super::*;

        #[test]
        fn parses_successful_registration() {
            let resp: Resp = serde_json::from_str(
                r#"{
                    "success": true,
                    "code": 0,
                    "redirectUrl": "/user/registration-pending-verification.html",
                    "messages": ["Registration Successful!"]
                }"#,
            )
            .unwrap();

            assert_eq!(
                resp.accepted_redirect(),
                Some("/user/registration-pending-verification.html")
            );
        }

        #[test]
        fn missing_success_is_false() {
            let resp: Resp = serde_json::from_str(r#"{"redirectUrl": "/home"}"#).unwrap();

            assert!(!resp.success);
            assert_eq!(resp.accepted_redirect(), None);
        }

        #[test]
        fn odd_messages_do_not_block_the_redirect() {
            let resp: Resp = serde_json::from_str(
                r#"{"success": true, "redirectUrl": "/home", "messages": null}"#,
            )
            .unwrap();

            assert_eq!(resp.accepted_redirect(), Some("/home"));
        }

        #[test]
        fn success_without_redirect_is_not_accepted() {
            let resp: Resp = serde_json::from_str(r#"{"success": true}"#).unwrap();

            assert_eq!(resp.accepted_redirect(), None);
        }
    }
}
