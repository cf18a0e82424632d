//! Smooth scrolling for same-page anchors.

/// Page side of anchor navigation.
pub trait ScrollSurface {
    type Target;

    /// Element whose id equals `id`, if any.
    fn find(&self, id: &str) -> Option<Self::Target>;

    /// Smoothly scroll `target` so its top aligns with the viewport start.
    fn scroll_into_view(&self, target: &Self::Target);
}

/// What happened to an anchor click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorClick {
    /// Default navigation must be cancelled
    pub prevent_default: bool,
    /// A matching element was found and scrolled to
    pub scrolled: bool,
}

/// Fragment id of a same-page href, `None` for other links and bare `#`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Handle a click on an anchor whose href is `href`.
///
/// Same-page anchors always cancel default navigation, whether or not the
/// fragment resolves.
pub fn handle_anchor_click<S: ScrollSurface>(href: &str, surface: &S) -> AnchorClick {
    if !href.starts_with('#') {
        return AnchorClick {
            prevent_default: false,
            scrolled: false,
        };
    }

    let target = fragment_id(href).and_then(|id| surface.find(id));
    let scrolled = match target {
        Some(ref target) => {
            surface.scroll_into_view(target);
            true
        }
        None => {
            tracing::debug!(href, "anchor target not found");
            false
        }
    };

    AnchorClick {
        prevent_default: true,
        scrolled,
    }
}
