//! Lift effect for info and detail cards.

/// Pointer transition over a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Enter,
    Leave,
}

impl Pointer {
    /// DOM event name that signals this transition.
    pub fn event_name(&self) -> &'static str {
        match self {
            Pointer::Enter => "mouseenter",
            Pointer::Leave => "mouseleave",
        }
    }
}

/// CSS `transform` for a card after `pointer`.
pub fn lift_transform(pointer: Pointer, lift_px: u32) -> String {
    match pointer {
        Pointer::Enter if lift_px > 0 => format!("translateY(-{}px)", lift_px),
        _ => "translateY(0)".to_string(),
    }
}
