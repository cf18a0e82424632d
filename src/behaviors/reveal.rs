//! Fade timeline and schedule items in as they scroll into view.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node,
};
use wedding_core::{
    IntersectionSample, RevealStyle, RevealTracker, RevealView, SiteConfig, SiteResult,
};

use crate::dom;

/// Applies reveal styles to the matched items.
struct ItemStyles {
    items: Vec<HtmlElement>,
}

impl RevealView for ItemStyles {
    fn apply(&mut self, item: usize, style: &RevealStyle) {
        let Some(element) = self.items.get(item) else {
            return;
        };
        let opacity = style.opacity_css();
        let transform = style.transform_css();
        let result = dom::set_styles(
            element,
            &[("opacity", opacity.as_str()), ("transform", transform.as_str())],
        );
        if let Err(e) = result {
            tracing::warn!(item, error = %e, "reveal style not applied");
        }
    }
}

/// Hide every item and observe them with one shared observer.
/// Returns the item count.
pub fn register(config: &SiteConfig) -> SiteResult<usize> {
    let items = dom::query_all_html(&config.selectors.reveal_items)?;
    if items.is_empty() {
        tracing::debug!("no reveal items");
        return Ok(0);
    }

    let transition = config.reveal.transition();
    for item in &items {
        dom::set_styles(item, &[("transition", transition.as_str())])?;
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new(
        config.reveal.clone(),
        ItemStyles {
            items: items.clone(),
        },
    )));
    tracker.borrow_mut().register(items.len());

    let targets = items.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target: Node = entry.target().into();
                let Some(item) = targets.iter().position(|el| el.is_same_node(Some(&target))) else {
                    continue;
                };
                tracker.borrow_mut().observe(IntersectionSample {
                    item,
                    is_intersecting: entry.is_intersecting(),
                    intersection_ratio: entry.intersection_ratio(),
                });
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal.threshold));
    init.set_root_margin(&config.reveal.root_margin());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|e| dom::js_error("IntersectionObserver", e))?;

    for item in &items {
        observer.observe(item);
    }
    // Lives as long as the page; the observer is kept alive by its targets
    callback.forget();

    tracing::debug!(count = items.len(), "reveal observer registered");
    Ok(items.len())
}
