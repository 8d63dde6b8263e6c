/// The `<meta>` tag holding the token value.
pub const TOKEN_META: &str = "_csrf";

/// The `<meta>` tag holding the name of the header the token goes in.
pub const HEADER_META: &str = "_csrf_header";

/// An anti-forgery token and the header the server expects it in. The server
/// renders both into the page; we read them right before sending a request.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken {
    /// Header name, e.g. `X-CSRF-TOKEN`
    pub header: String,

    /// Token value
    pub token: String,
}

impl CsrfToken {
    /// Read the token from page metadata. `meta` should return the `content` of
    /// the `<meta>` tag with the given name. We need both tags; if either is
    /// missing or empty there is no token.
    pub fn from_meta<F>(meta: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let header = meta(HEADER_META).filter(|header| !header.is_empty())?;
        let token = meta(TOKEN_META).filter(|token| !token.is_empty())?;

        Some(Self { header, token })
    }
}

// Never print the token value.
impl core::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CsrfToken")
            .field("header", &self.header)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn page(tags: &[(&str, &str)]) -> HashMap<String, String> {
        tags.iter()
            .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
            .collect()
    }

    mod from_meta {
        use super::*;

        #[test]
        fn reads_both_tags() {
            let metas = page(&[("_csrf", "abc123"), ("_csrf_header", "X-CSRF-TOKEN")]);

            let token = CsrfToken::from_meta(|name| metas.get(name).cloned()).unwrap();

            assert_eq!(token.header, "X-CSRF-TOKEN");
            assert_eq!(token.token, "abc123");
        }

        #[test]
        fn missing_header_means_no_token() {
            let metas = page(&[("_csrf", "abc123")]);

            assert_eq!(CsrfToken::from_meta(|name| metas.get(name).cloned()), None);
        }

        #[test]
        fn empty_token_means_no_token() {
            let metas = page(&[("_csrf", ""), ("_csrf_header", "X-CSRF-TOKEN")]);

            assert_eq!(CsrfToken::from_meta(|name| metas.get(name).cloned()), None);
        }
    }

    #[test]
    fn debug_hides_token() {
        let token = CsrfToken {
            header: "X-CSRF-TOKEN".into(),
            token: "secret".into(),
        };

        assert!(!format!("{token:?}").contains("secret"));
    }
}
