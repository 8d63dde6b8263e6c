use core::fmt::{self, Display};

/// A script or stylesheet that can be appended to the document head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A `<script>` tag
    Script {
        /// Where the script lives
        src: &'static str,

        /// Whether the browser may run the script as soon as it's loaded
        /// instead of in document order.
        is_async: bool,
    },

    /// A `<link rel="stylesheet">` tag
    Stylesheet {
        /// Where the stylesheet lives
        href: &'static str,
    },
}

impl Resource {
    /// An async script. Every script in the table is loaded this way.
    const fn script(src: &'static str) -> Self {
        Self::Script {
            src,
            is_async: true,
        }
    }

    /// A stylesheet
    const fn stylesheet(href: &'static str) -> Self {
        Self::Stylesheet { href }
    }

    /// The URL this resource loads from
    pub fn url(&self) -> &'static str {
        match self {
            Self::Script { src, .. } => *src,
            Self::Stylesheet { href } => *href,
        }
    }

    /// The tag name to create in the DOM
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Script { .. } => "script",
            Self::Stylesheet { .. } => "link",
        }
    }

    /// Attributes to set on the created element, in the order they're set.
    pub fn attributes(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::Script { src, is_async } => vec![
                ("src", *src),
                ("type", "text/javascript"),
                ("async", if *is_async { "true" } else { "false" }),
            ],
            Self::Stylesheet { href } => vec![
                ("href", *href),
                ("type", "text/css"),
                ("rel", "stylesheet"),
            ],
        }
    }

    /// Render the element as HTML, for example to preview what a page will
    /// load.
    pub fn to_html(&self) -> String {
        let attributes: String = self
            .attributes()
            .into_iter()
            .map(|(name, value)| format!(" {name}=\"{value}\""))
            .collect();

        match self {
            Self::Script { .. } => format!("<script{attributes}></script>"),
            Self::Stylesheet { .. } => format!("<link{attributes}>"),
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// What has to be on the page for a rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The rule applies to every page.
    Always,

    /// The rule applies when this CSS selector matches at least one element.
    Selector(&'static str),
}

/// Associates a marker with the resources to load when it's present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetRule {
    /// When to load the resources
    pub marker: Marker,

    /// What to load, in order
    pub resources: &'static [Resource],
}

/// Every optional bundle the dashboard knows about. Rules are evaluated in
/// order and resources are appended in the order listed here.
pub static RULES: &[AssetRule] = &[
    AssetRule {
        marker: Marker::Always,
        resources: &[
            Resource::stylesheet("/css/perfect-scrollbar.css"),
            Resource::script("/js/perfect-scrollbar.js"),
        ],
    },
    AssetRule {
        marker: Marker::Selector("nav [navbar-trigger]"),
        resources: &[Resource::script("/js/navbar-collapse.js")],
    },
    AssetRule {
        marker: Marker::Selector("[data-target='tooltip']"),
        resources: &[
            Resource::script("/js/tooltips.js"),
            Resource::stylesheet("/css/tooltips.css"),
        ],
    },
    AssetRule {
        marker: Marker::Selector("[nav-pills]"),
        resources: &[Resource::script("/js/nav-pills.js")],
    },
    AssetRule {
        marker: Marker::Selector("[dropdown-trigger]"),
        resources: &[Resource::script("/js/dropdown.js")],
    },
    AssetRule {
        marker: Marker::Selector("[fixed-plugin]"),
        resources: &[Resource::script("/js/fixed-plugin.js")],
    },
    AssetRule {
        marker: Marker::Selector("[navbar-main]"),
        resources: &[
            Resource::script("/js/sidenav-burger.js"),
            Resource::script("/js/navbar-sticky.js"),
        ],
    },
    AssetRule {
        marker: Marker::Selector("canvas"),
        resources: &[
            Resource::script("/js/chart-1.js"),
            Resource::script("/js/chart-2.js"),
        ],
    },
];
