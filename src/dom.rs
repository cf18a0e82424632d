//! Small helpers over `web-sys` queries and inline styles.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};
use wedding_core::{SiteError, SiteResult};

/// Convert a thrown JS value into a [`SiteError::Dom`].
pub fn js_error(context: &str, value: JsValue) -> SiteError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    SiteError::Dom(format!("{context}: {detail}"))
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> SiteResult<Vec<Element>> {
    let list = gloo::utils::document()
        .query_selector_all(selector)
        .map_err(|e| js_error(selector, e))?;

    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// All HTML elements matching `selector`, in document order.
pub fn query_all_html(selector: &str) -> SiteResult<Vec<HtmlElement>> {
    Ok(query_all(selector)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// First element matching `selector`.
pub fn query(selector: &str) -> SiteResult<Option<Element>> {
    gloo::utils::document()
        .query_selector(selector)
        .map_err(|e| js_error(selector, e))
}

/// Set inline style properties on `element`.
pub fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) -> SiteResult<()> {
    let style = element.style();
    for (name, value) in properties {
        style
            .set_property(name, value)
            .map_err(|e| js_error(name, e))?;
    }
    Ok(())
}
