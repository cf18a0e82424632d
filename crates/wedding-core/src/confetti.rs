//! Emoji confetti.
//!
//! A piece is spawned above the viewport, starts falling after a short
//! delay, and is removed once its fall has finished. Randomness and timers
//! are injected so a burst can be replayed exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::ConfettiOptions;
use crate::error::SiteResult;
use crate::timer::Scheduler;

/// Glyphs a piece is drawn from, uniformly.
pub const GLYPHS: [&str; 4] = ["🐧", "💕", "🎉", "✨"];

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Small fast PRNG seeded by the caller.
pub struct SeededRandom(SmallRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct FixedRandom {
    values: Vec<f64>,
    next: usize,
}

impl FixedRandom {
    /// Values are clamped into `[0, 1)`; an empty list yields zeros.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Randomized parameters of one particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub glyph: &'static str,
    /// Horizontal start position, 0-100 % of viewport width
    pub left_percent: f64,
    pub fall_ms: u32,
    /// Horizontal drift applied during the fall
    pub sway_px: f64,
    start_delay_ms: u32,
    start_top_px: u32,
}

impl ConfettiPiece {
    /// Draw glyph, position, fall duration and sway, in that order.
    pub fn roll<R: RandomSource + ?Sized>(rng: &mut R, options: &ConfettiOptions) -> Self {
        let glyph_index = ((rng.next_unit() * GLYPHS.len() as f64) as usize).min(GLYPHS.len() - 1);
        let left_percent = rng.next_unit() * 100.0;
        let spread_ms = (rng.next_unit() * f64::from(options.fall_spread_ms)) as u32;
        let fall_ms = options.min_fall_ms.saturating_add(spread_ms);
        let sway_px = (rng.next_unit() - 0.5) * 2.0 * f64::from(options.max_sway_px);

        Self {
            glyph: GLYPHS[glyph_index],
            left_percent,
            fall_ms,
            sway_px,
            start_delay_ms: options.start_delay_ms,
            start_top_px: options.start_top_px,
        }
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.start_delay_ms
    }

    /// Time from spawn to removal.
    pub fn lifetime_ms(&self) -> u32 {
        self.fall_ms.saturating_add(self.start_delay_ms)
    }

    pub fn left_css(&self) -> String {
        format!("{}%", self.left_percent)
    }

    pub fn start_top_css(&self) -> String {
        format!("-{}px", self.start_top_px)
    }

    pub fn transition_css(&self) -> String {
        format!("all {}ms ease-in", self.fall_ms)
    }

    /// Transform at the end of the fall.
    pub fn falling_transform_css(&self) -> String {
        format!("translateX({}px) rotate(360deg)", self.sway_px)
    }
}

/// Page side of the confetti effect.
pub trait ConfettiStage {
    type Particle: Clone + 'static;

    /// Create and attach a particle at its start position.
    fn spawn(&self, piece: &ConfettiPiece) -> SiteResult<Self::Particle>;

    /// Apply the transition and end position so the particle falls.
    fn begin_fall(&self, particle: &Self::Particle, piece: &ConfettiPiece);

    /// Detach the particle.
    fn remove(&self, particle: &Self::Particle);
}

/// Spawns confetti pieces onto a stage.
pub struct ConfettiEmitter<S, T, R> {
    stage: S,
    scheduler: T,
    rng: R,
    options: ConfettiOptions,
}

impl<S, T, R> ConfettiEmitter<S, T, R>
where
    S: ConfettiStage + Clone + 'static,
    T: Scheduler,
    R: RandomSource,
{
    pub fn new(stage: S, scheduler: T, rng: R, options: ConfettiOptions) -> Self {
        Self {
            stage,
            scheduler,
            rng,
            options,
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Spawn one piece and schedule its fall and removal.
    pub fn create_piece(&mut self) -> SiteResult<ConfettiPiece> {
        let piece = ConfettiPiece::roll(&mut self.rng, &self.options);
        let particle = self.stage.spawn(&piece)?;

        let stage = self.stage.clone();
        let falling = particle.clone();
        let fall_piece = piece.clone();
        self.scheduler.after(
            piece.start_delay_ms(),
            Box::new(move || stage.begin_fall(&falling, &fall_piece)),
        );

        let stage = self.stage.clone();
        self.scheduler.after(
            piece.lifetime_ms(),
            Box::new(move || stage.remove(&particle)),
        );

        Ok(piece)
    }

    /// Spawn a full burst. Returns how many pieces were spawned.
    pub fn launch(&mut self) -> usize {
        let mut spawned = 0;
        for _ in 0..self.options.burst_size {
            match self.create_piece() {
                Ok(_) => spawned += 1,
                Err(e) => tracing::warn!(error = %e, "confetti piece not spawned"),
            }
        }
        tracing::info!(spawned, "confetti launched");
        spawned
    }
}
