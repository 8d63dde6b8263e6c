use crate::config::AssetsArgs;
use core::convert::Infallible;
use dashboard_core::{assets::RULES, loader, Dom, Marker, Page, Resource};
use std::{collections::BTreeSet, process::ExitCode};

/// A pretend document: markers are matched by exact selector text, and
/// appended tags are kept in a list.
#[derive(Debug, Default)]
struct Preview {
    markers: BTreeSet<String>,
    head: Vec<Resource>,
}

impl Preview {
    fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
            head: Vec::new(),
        }
    }

    /// Markers we were given that no rule looks for
    fn unknown_markers(&self) -> Vec<&str> {
        self.markers
            .iter()
            .map(String::as_str)
            .filter(|marker| {
                !RULES.iter().any(|rule| {
                    matches!(rule.marker, Marker::Selector(selector) if selector == *marker)
                })
            })
            .collect()
    }
}

impl Dom for Preview {
    type Error = Infallible;

    fn contains(&self, selector: &str) -> bool {
        self.markers.contains(selector)
    }

    fn append(&mut self, resource: &Resource) -> Result<(), Self::Error> {
        self.head.push(*resource);
        Ok(())
    }
}

/// Print the page identifier and every tag the loader would append.
pub fn run(args: &AssetsArgs) -> ExitCode {
    let page = Page::from_path(&args.path);
    let mut preview = Preview::new(args.markers.iter().cloned());

    for marker in preview.unknown_markers() {
        tracing::warn!(marker, "no asset rule uses this marker");
    }

    loader::load(&page, &mut preview);

    println!("page: {page}");
    for resource in &preview.head {
        println!("{resource}");
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod test {
    use super::*;

    fn loaded(markers: &[&str]) -> Vec<&'static str> {
        let mut preview = Preview::new(markers.iter().copied());
        loader::load(&Page::from_path("/"), &mut preview);

        preview.head.iter().map(Resource::url).collect()
    }

    #[test]
    fn canvas_gets_charts() {
        assert_eq!(
            loaded(&["canvas"]),
            vec![
                "/css/perfect-scrollbar.css",
                "/js/perfect-scrollbar.js",
                "/js/chart-1.js",
                "/js/chart-2.js",
            ]
        );
    }

    #[test]
    fn marker_order_does_not_matter() {
        assert_eq!(
            loaded(&["canvas", "[nav-pills]"]),
            loaded(&["[nav-pills]", "canvas"])
        );
    }

    #[test]
    fn spots_unknown_markers() {
        let preview = Preview::new(["canvas", ".sidebar"]);

        assert_eq!(preview.unknown_markers(), vec![".sidebar"]);
    }
}
