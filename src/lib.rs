//! Dino Dance core crate.
//!
//! A voice-controlled emoji painting toy: a cursor-following creature stamps
//! dancers onto the page, theme sets rotate organically as the artwork
//! grows, tiny dancers pile up at the bottom on every set change, and spoken
//! commands ("dance party", "clear dance floor", "restart the party")
//! trigger formation celebrations. All placement math lives in pure modules
//! under [`game`] so it runs under native `cargo test`; only the controller
//! touches the DOM.

use wasm_bindgen::prelude::*;

pub mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Entrypoint called from the host page once the DOM is ready.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_dance_mode()
}

// Datasets and pure value types, re-exported for host-side use.
pub use game::theme::{THEME_SETS, ThemeSet};
pub use game::voice::VoiceCommand;
pub use game::{Point, Viewport};
