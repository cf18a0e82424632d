//! Lift effect on info and detail cards.

use gloo::events::EventListener;
use wedding_core::hover::lift_transform;
use wedding_core::{Pointer, SiteConfig, SiteResult};

use crate::dom;

/// Attach enter/leave listeners to every card. Returns the card count.
pub fn register(config: &SiteConfig) -> SiteResult<usize> {
    let cards = dom::query_all_html(&config.selectors.cards)?;
    let lift_px = config.hover.lift_px;

    for card in &cards {
        for pointer in [Pointer::Enter, Pointer::Leave] {
            let target = card.clone();
            EventListener::new(card, pointer.event_name(), move |_| {
                let transform = lift_transform(pointer, lift_px);
                if let Err(e) = dom::set_styles(&target, &[("transform", transform.as_str())]) {
                    tracing::warn!(error = %e, "card transform not applied");
                }
            })
            .forget();
        }
    }

    tracing::debug!(count = cards.len(), "card hover registered");
    Ok(cards.len())
}
