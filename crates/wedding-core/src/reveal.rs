//! Reveal-on-scroll for timeline and schedule items.
//!
//! Items start hidden (transparent, shifted left) and are revealed once the
//! intersection observer reports them sufficiently visible. Reveal is
//! one-way: leaving the viewport again changes nothing.

use crate::config::RevealOptions;

/// Browsers report ratios like 0.19999 right at a 0.2 threshold crossing.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Inline style of a reveal item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_x_px: i32,
}

impl RevealStyle {
    pub fn hidden(options: &RevealOptions) -> Self {
        Self {
            opacity: 0.0,
            translate_x_px: -i32::try_from(options.offset_px).unwrap_or(i32::MAX),
        }
    }

    pub fn shown() -> Self {
        Self {
            opacity: 1.0,
            translate_x_px: 0,
        }
    }

    /// CSS `opacity` value.
    pub fn opacity_css(&self) -> String {
        format!("{}", self.opacity)
    }

    /// CSS `transform` value.
    pub fn transform_css(&self) -> String {
        if self.translate_x_px == 0 {
            "translateX(0)".to_string()
        } else {
            format!("translateX({}px)", self.translate_x_px)
        }
    }
}

/// One entry from an intersection observer callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    /// Index of the item in registration order
    pub item: usize,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// Applies styles to registered items.
pub trait RevealView {
    fn apply(&mut self, item: usize, style: &RevealStyle);
}

/// Tracks which items have been revealed.
pub struct RevealTracker<V> {
    options: RevealOptions,
    revealed: Vec<bool>,
    view: V,
}

impl<V: RevealView> RevealTracker<V> {
    pub fn new(options: RevealOptions, view: V) -> Self {
        Self {
            options,
            revealed: Vec::new(),
            view,
        }
    }

    /// Hide items `0..count` and start tracking them.
    pub fn register(&mut self, count: usize) {
        let hidden = RevealStyle::hidden(&self.options);
        for item in 0..count {
            self.view.apply(item, &hidden);
        }
        self.revealed = vec![false; count];
        tracing::debug!(count, "reveal items registered");
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, item: usize) -> bool {
        self.revealed.get(item).copied().unwrap_or(false)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Whether a sample puts its item in view.
    pub fn in_view(&self, sample: &IntersectionSample) -> bool {
        sample.is_intersecting
            && sample.intersection_ratio + RATIO_TOLERANCE >= self.options.threshold
    }

    /// Handle one observer entry. Returns true if the item was revealed now.
    pub fn observe(&mut self, sample: IntersectionSample) -> bool {
        if !self.in_view(&sample) {
            return false;
        }
        match self.revealed.get_mut(sample.item) {
            Some(revealed) if !*revealed => {
                *revealed = true;
                self.view.apply(sample.item, &RevealStyle::shown());
                tracing::trace!(item = sample.item, "reveal item shown");
                true
            }
            _ => false,
        }
    }
}
