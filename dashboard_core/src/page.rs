use core::fmt::{self, Display};

/// Pages outside of the `pages` directory are all the dashboard.
pub const DEFAULT_PAGE: &str = "dashboard";

/// The directory that holds every page except the dashboard.
const PAGES_SEGMENT: &str = "pages";

/// Identifies a page of the dashboard, derived from the URL path it was served
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page(String);

impl Page {
    /// Figure out which page a path points to. For paths under `pages`, this is
    /// the file name without its extension (`/pages/tables.html` is `tables`.)
    /// Anything else is the dashboard.
    pub fn from_path(path: &str) -> Self {
        let mut segments = path.split('/');

        if !segments.any(|segment| segment == PAGES_SEGMENT) {
            return Self(DEFAULT_PAGE.to_owned());
        }

        let file = path.rsplit('/').next().unwrap_or_default();
        let stem = file.split('.').next().unwrap_or_default();

        Self(stem.to_owned())
    }

    /// The page identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
