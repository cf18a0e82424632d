//! Emoji confetti on demand.
//!
//! Nothing on the page launches confetti by itself. Page scripts call
//! `launchConfetti()` or `createConfettiPiece()`, available both as module
//! exports and as `window` globals.

use std::cell::RefCell;

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use wedding_core::{
    ConfettiEmitter, ConfettiOptions, ConfettiPiece, ConfettiStage, Scheduler, SeededRandom,
    SiteError, SiteResult,
};

use crate::{context, dom};

/// Attaches particles to `document.body`.
#[derive(Clone)]
pub struct BodyStage {
    font_size: String,
    z_index: String,
}

impl BodyStage {
    pub fn new(options: &ConfettiOptions) -> Self {
        Self {
            font_size: options.font_size.clone(),
            z_index: options.z_index.to_string(),
        }
    }
}

impl ConfettiStage for BodyStage {
    type Particle = HtmlElement;

    fn spawn(&self, piece: &ConfettiPiece) -> SiteResult<HtmlElement> {
        let element = gloo::utils::document()
            .create_element("div")
            .map_err(|e| dom::js_error("createElement", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::Dom("div is not an HTMLElement".into()))?;

        element.set_text_content(Some(piece.glyph));
        dom::set_styles(
            &element,
            &[
                ("position", "fixed"),
                ("left", piece.left_css().as_str()),
                ("top", piece.start_top_css().as_str()),
                ("font-size", self.font_size.as_str()),
                ("z-index", self.z_index.as_str()),
                ("pointer-events", "none"),
            ],
        )?;

        gloo::utils::body()
            .append_child(&element)
            .map_err(|e| dom::js_error("appendChild", e))?;
        Ok(element)
    }

    fn begin_fall(&self, particle: &HtmlElement, piece: &ConfettiPiece) {
        let bottom = gloo::utils::window()
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or_default();

        let result = dom::set_styles(
            particle,
            &[
                ("transition", piece.transition_css().as_str()),
                ("top", format!("{bottom}px").as_str()),
                ("transform", piece.falling_transform_css().as_str()),
            ],
        );
        if let Err(e) = result {
            tracing::warn!(error = %e, "confetti fall not started");
        }
    }

    fn remove(&self, particle: &HtmlElement) {
        particle.remove();
    }
}

/// Runs delayed tasks on browser timeouts.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

type PageEmitter = ConfettiEmitter<BodyStage, TimeoutScheduler, SeededRandom>;

thread_local! {
    static EMITTER: RefCell<Option<PageEmitter>> = const { RefCell::new(None) };
}

fn random_seed() -> u64 {
    let entropy = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (entropy << 32) ^ js_sys::Date::now() as u64
}

fn with_emitter<T>(f: impl FnOnce(&mut PageEmitter) -> T) -> T {
    EMITTER.with(|slot| {
        let mut slot = slot.borrow_mut();
        let emitter = slot.get_or_insert_with(|| {
            let options = context::site_config().confetti.clone();
            ConfettiEmitter::new(
                BodyStage::new(&options),
                TimeoutScheduler,
                SeededRandom::new(random_seed()),
                options,
            )
        });
        f(emitter)
    })
}

/// Spawn a full burst of confetti. Returns how many pieces were spawned.
#[wasm_bindgen(js_name = launchConfetti)]
pub fn launch_confetti() -> u32 {
    with_emitter(|emitter| emitter.launch()) as u32
}

/// Spawn a single confetti piece.
#[wasm_bindgen(js_name = createConfettiPiece)]
pub fn create_confetti_piece() -> Result<(), JsValue> {
    with_emitter(|emitter| emitter.create_piece())
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Expose both entry points on `window` for inline page scripts.
pub fn install_globals() -> SiteResult<()> {
    let window = gloo::utils::window();

    let launch = Closure::<dyn Fn() -> u32>::new(launch_confetti);
    js_sys::Reflect::set(&window, &JsValue::from_str("launchConfetti"), launch.as_ref())
        .map_err(|e| dom::js_error("window.launchConfetti", e))?;
    launch.forget();

    let create = Closure::<dyn Fn() -> Result<(), JsValue>>::new(create_confetti_piece);
    js_sys::Reflect::set(&window, &JsValue::from_str("createConfettiPiece"), create.as_ref())
        .map_err(|e| dom::js_error("window.createConfettiPiece", e))?;
    create.forget();

    tracing::debug!("confetti globals installed");
    Ok(())
}
