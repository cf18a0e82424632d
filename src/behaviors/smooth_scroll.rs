//! Smooth scrolling for same-page anchor links.

use gloo::events::{EventListener, EventListenerOptions};
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use wedding_core::scroll::handle_anchor_click;
use wedding_core::{ScrollSurface, SiteConfig, SiteResult};

use crate::dom;

/// Resolves fragments against the live document.
struct DocumentSurface;

impl ScrollSurface for DocumentSurface {
    type Target = Element;

    fn find(&self, id: &str) -> Option<Element> {
        gloo::utils::document().get_element_by_id(id)
    }

    fn scroll_into_view(&self, target: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Intercept clicks on every same-page anchor. Returns the anchor count.
pub fn register(config: &SiteConfig) -> SiteResult<usize> {
    let anchors = dom::query_all(&config.selectors.anchors)?;

    for anchor in &anchors {
        let source = anchor.clone();
        EventListener::new_with_options(
            anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(href) = source.get_attribute("href") else {
                    return;
                };
                let click = handle_anchor_click(&href, &DocumentSurface);
                if click.prevent_default {
                    event.prevent_default();
                }
            },
        )
        .forget();
    }

    tracing::debug!(count = anchors.len(), "smooth scroll registered");
    Ok(anchors.len())
}
