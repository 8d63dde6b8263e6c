use crate::assets::{AssetRule, Marker, Resource, RULES};
use crate::page::Page;
use core::fmt::Debug;

/// The parts of a document the loader needs: checking for markers and adding
/// tags to the head.
pub trait Dom {
    /// What can go wrong when appending an element
    type Error: Debug;

    /// Does at least one element match this CSS selector?
    fn contains(&self, selector: &str) -> bool;

    /// Create the element for this resource and append it to the head.
    ///
    /// ## Errors
    ///
    /// Whatever the document reports when creating or appending fails.
    fn append(&mut self, resource: &Resource) -> Result<(), Self::Error>;
}

impl AssetRule {
    /// Does this rule apply to the given document?
    pub fn applies_to<D: Dom>(&self, dom: &D) -> bool {
        match self.marker {
            Marker::Always => true,
            Marker::Selector(selector) => dom.contains(selector),
        }
    }
}

/// Which resources the page needs, in the order they'll be appended.
pub fn plan<D: Dom>(dom: &D) -> Vec<&'static Resource> {
    RULES
        .iter()
        .filter(|rule| rule.applies_to(dom))
        .flat_map(|rule| rule.resources.iter())
        .collect()
}

/// Append every resource the page needs to its head. This does not check
/// whether a tag is already present, so calling it twice appends everything
/// twice. A failed append is logged and skipped.
///
/// Returns how many tags were appended.
pub fn load<D: Dom>(page: &Page, dom: &mut D) -> usize {
    let planned = plan(dom);
    tracing::debug!(%page, count = planned.len(), "loading page assets");

    let mut appended = 0;
    for resource in planned {
        match dom.append(resource) {
            Ok(()) => appended += 1,
            Err(err) => tracing::warn!(?err, url = resource.url(), "could not append asset"),
        }
    }

    appended
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    /// A document with some markers and a head we can inspect.
    #[derive(Debug, Default)]
    struct FakeDom {
        markers: HashSet<&'static str>,
        head: Vec<Resource>,
        fail_on: Option<&'static str>,
    }

    impl FakeDom {
        fn with_markers(markers: &[&'static str]) -> Self {
            Self {
                markers: markers.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn urls(&self) -> Vec<&'static str> {
            self.head.iter().map(Resource::url).collect()
        }
    }

    impl Dom for FakeDom {
        type Error = String;

        fn contains(&self, selector: &str) -> bool {
            self.markers.contains(selector)
        }

        fn append(&mut self, resource: &Resource) -> Result<(), Self::Error> {
            if self.fail_on == Some(resource.url()) {
                return Err(format!("refusing {}", resource.url()));
            }

            self.head.push(*resource);
            Ok(())
        }
    }

    fn dashboard() -> Page {
        Page::from_path("/")
    }

    mod plan {
        use super::*;

        #[test]
        fn bare_page_gets_only_the_scrollbar() {
            let dom = FakeDom::default();

            let urls: Vec<_> = plan(&dom).into_iter().map(Resource::url).collect();

            assert_eq!(urls, vec!["/css/perfect-scrollbar.css", "/js/perfect-scrollbar.js"]);
        }

        #[test]
        fn tooltip_brings_its_stylesheet() {
            let dom = FakeDom::with_markers(&["[data-target='tooltip']"]);

            let planned = plan(&dom);

            assert!(planned.contains(&&Resource::Stylesheet {
                href: "/css/tooltips.css"
            }));
        }

        #[test]
        fn every_marker_present_loads_every_rule_in_order() {
            let selectors: Vec<&'static str> = RULES
                .iter()
                .filter_map(|rule| match rule.marker {
                    Marker::Selector(selector) => Some(selector),
                    Marker::Always => None,
                })
                .collect();
            let dom = FakeDom::with_markers(&selectors);

            let expected: Vec<_> = RULES.iter().flat_map(|rule| rule.resources.iter()).collect();

            assert_eq!(plan(&dom), expected);
        }
    }

    mod load {
        use super::*;

        #[test]
        fn canvas_only_page_gets_four_tags() {
            let mut dom = FakeDom::with_markers(&["canvas"]);

            let appended = load(&dashboard(), &mut dom);

            assert_eq!(appended, 4);
            assert_eq!(
                dom.urls(),
                vec![
                    "/css/perfect-scrollbar.css",
                    "/js/perfect-scrollbar.js",
                    "/js/chart-1.js",
                    "/js/chart-2.js",
                ]
            );

            let stylesheets = dom
                .head
                .iter()
                .filter(|res| matches!(res, Resource::Stylesheet { .. }))
                .count();
            assert_eq!(stylesheets, 1);
        }

        #[test]
        fn navbar_main_loads_both_scripts() {
            let mut dom = FakeDom::with_markers(&["[navbar-main]"]);

            load(&dashboard(), &mut dom);

            assert_eq!(
                &dom.urls()[2..],
                &["/js/sidenav-burger.js", "/js/navbar-sticky.js"]
            );
        }

        #[test]
        fn loading_twice_duplicates_tags() {
            let mut dom = FakeDom::default();

            load(&dashboard(), &mut dom);
            load(&dashboard(), &mut dom);

            assert_eq!(dom.head.len(), 4);
        }

        #[test_log::test]
        fn failed_append_is_skipped() {
            let mut dom = FakeDom {
                fail_on: Some("/css/perfect-scrollbar.css"),
                ..FakeDom::with_markers(&["[fixed-plugin]"])
            };

            let appended = load(&dashboard(), &mut dom);

            assert_eq!(appended, 2);
            assert_eq!(
                dom.urls(),
                vec!["/js/perfect-scrollbar.js", "/js/fixed-plugin.js"]
            );
        }
    }
}
