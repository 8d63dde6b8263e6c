use dashboard_core::{Dom, Resource};
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlHeadElement};

/// The live document, as the asset loader sees it
pub struct DocumentDom {
    /// Where we look for markers
    document: Document,

    /// Where new tags go
    head: HtmlHeadElement,
}

impl DocumentDom {
    /// Wrap a document.
    ///
    /// # Errors
    ///
    /// Fails if the document has no `<head>`.
    pub fn new(document: Document) -> Result<Self, JsValue> {
        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no head"))?;

        Ok(Self { document, head })
    }
}

impl Dom for DocumentDom {
    type Error = JsValue;

    fn contains(&self, selector: &str) -> bool {
        match self.document.query_selector(selector) {
            Ok(found) => found.is_some(),
            Err(err) => {
                tracing::warn!(?err, selector, "invalid marker selector");
                false
            }
        }
    }

    fn append(&mut self, resource: &Resource) -> Result<(), Self::Error> {
        let element = self.document.create_element(resource.tag_name())?;

        for (name, value) in resource.attributes() {
            element.set_attribute(name, value)?;
        }

        self.head.append_child(&element)?;

        Ok(())
    }
}
