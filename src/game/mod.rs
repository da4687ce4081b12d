//! Dance-canvas game controller. Owns all mutable session state (planted
//! dancers, pile history, theme rotation, background drift) in a single
//! thread-local cell, wires pointer / keyboard / voice events to the pure
//! placement modules, and executes spawn plans with staggered timers.
//!
//! Everything computational lives in the submodules and stays free of
//! `web_sys`; this file is the only place that touches the DOM.

pub mod background;
pub mod formation;
pub mod pile;
pub mod rand;
pub mod sequence;
pub mod theme;
pub mod voice;

mod speech;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, KeyboardEvent, MouseEvent, window};

use background::Background;
use rand::Rand;
use sequence::{SpawnAction, SpawnPlan};
use theme::ThemeRotator;
use voice::VoiceCommand;

// --- Shared geometry --------------------------------------------------------

/// A 2D screen position in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Viewport bounds, captured per event from the window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

// --- Timing / layout constants ----------------------------------------------

/// Minimum gap between brush-stroke placements while dragging.
const BRUSH_DELAY_MS: f64 = 100.0;
/// Placed glyphs are centered under the pointer by this offset.
const CURSOR_OFFSET: f64 = 30.0;
const PLANT_FONT_PX: u32 = 60;
const CELEBRATE_SCALE_MS: i32 = 200;
const COUNTER_PULSE_MS: i32 = 400;
const TITLE_PULSE_MS: i32 = 500;
const FLOOR_CLEAR_MS: i32 = 1500;
/// Tiny dancers start falling shortly after insertion so the CSS transition
/// engages, and join the pile once the fall animation has played out.
const TINY_FALL_START_MS: i32 = 100;
const TINY_SETTLE_MS: i32 = 2600;

// --- Session state -----------------------------------------------------------

struct PlantedDancer {
    el: Element,
    pos: Point,
    /// Style remainder (font, z-index, transform) kept alongside the
    /// position so relocation can rebuild the full inline style.
    tail: String,
}

struct GameState {
    cursor: Element,
    cursor_glyph: &'static str,
    cursor_pos: Point,
    cursor_visible: bool,
    mouse_down: bool,
    last_plant_ms: f64,
    planted: Vec<PlantedDancer>,
    tiny_dancers: Vec<Element>,
    /// Landed pile positions, in landing order.
    pile: Vec<Point>,
    rotator: ThemeRotator,
    background: Background,
    dancer_count: u32,
    rng: Rand,
}

thread_local! {
    static GAME_STATE: RefCell<Option<GameState>> = RefCell::new(None);
}

// --- Bootstrap ---------------------------------------------------------------

pub(crate) fn start_dance_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let mut rng = Rand::new(seed());
    let rotator = ThemeRotator::new(&mut rng);
    let cursor_glyph = theme::random_glyph(rotator.current_set(), &mut rng);

    // Cursor creature that follows the pointer.
    let cursor: Element = doc.create_element("div")?;
    cursor.set_class_name("dancer cursor-dancer");
    cursor.set_text_content(Some(cursor_glyph));
    let off_screen = Point { x: -100.0, y: -100.0 };
    cursor.set_attribute("style", &cursor_style(off_screen, true))?;
    body.append_child(&cursor)?;

    // Dancer counter overlay (top-left).
    if doc.get_element_by_id("dancer-count").is_none() {
        let div = doc.create_element("div")?;
        div.set_id("dancer-count");
        div.set_text_content(Some("0"));
        let _ = div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;");
        body.append_child(&div)?;
    }
    // Voice indicator (bottom-left); gets a `listening` class while active.
    if doc.get_element_by_id("voice-indicator").is_none() {
        let div = doc.create_element("div")?;
        div.set_id("voice-indicator");
        div.set_text_content(Some("🎤"));
        let _ = div.set_attribute("style", "position:fixed; bottom:12px; left:12px; font-size:22px; opacity:0.6; z-index:45;");
        body.append_child(&div)?;
    }

    let mut bg = Background::new();
    apply_background(&doc, &bg.evolve(0));

    let state = GameState {
        cursor: cursor.clone(),
        cursor_glyph,
        cursor_pos: off_screen,
        cursor_visible: true,
        mouse_down: false,
        last_plant_ms: 0.0,
        planted: Vec::new(),
        tiny_dancers: Vec::new(),
        pile: Vec::new(),
        rotator,
        background: bg,
        dancer_count: 0,
        rng,
    };
    GAME_STATE.with(|cell| cell.replace(Some(state)));

    // Pointer wiring: cursor follow + brush painting.
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let x = evt.client_x() as f64;
            let y = evt.client_y() as f64;
            let brushing = GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.cursor_pos = Point {
                        x: x - CURSOR_OFFSET,
                        y: y - CURSOR_OFFSET,
                    };
                    let _ = state
                        .cursor
                        .set_attribute("style", &cursor_style(state.cursor_pos, state.cursor_visible));
                    state.mouse_down
                } else {
                    false
                }
            });
            if brushing {
                try_brush(x, y);
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Primary button starts a painting stroke.
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if evt.button() != 0 {
                return;
            }
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.mouse_down = true;
                }
            });
            plant_at(evt.client_x() as f64, evt.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.mouse_down = false;
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Right click: instant five-dancer party instead of a context menu.
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            evt.prevent_default();
            random_party();
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Hide the cursor creature while the pointer is outside the page.
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            set_cursor_visible(false);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            set_cursor_visible(true);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Keyboard shortcuts.
    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            match evt.key().as_str() {
                "c" => clear_all(),
                "r" => random_party(),
                "n" => advance_set(),
                "i" => dance_party(1),
                _ => {}
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    speech::setup_voice_recognition();
    Ok(())
}

// --- Actions -----------------------------------------------------------------

/// Stamp one glyph (the current cursor creature) at a pointer position.
pub(crate) fn plant_at(x: f64, y: f64) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    GAME_STATE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else {
            return;
        };

        let glyph = state.cursor_glyph;
        let rotation = state.rng.next_f64() * 20.0 - 10.0;
        let pos = Point {
            x: x - CURSOR_OFFSET,
            y: y - CURSOR_OFFSET,
        };
        let tail = format!(
            "font-size:{}px; z-index:100; transform:rotate({:.1}deg);",
            PLANT_FONT_PX, rotation
        );
        let tail_pulse = format!(
            "font-size:{}px; z-index:100; transform:rotate({:.1}deg) scale(1.5);",
            PLANT_FONT_PX, rotation
        );

        let Ok(el) = doc.create_element("div") else {
            return;
        };
        el.set_class_name("dancer planted-dancer");
        el.set_text_content(Some(glyph));
        let _ = el.set_attribute("data-planted", "true");
        let _ = el.set_attribute("data-creation-time", &format!("{:.0}", now_ms()));
        let _ = el.set_attribute("style", &dancer_style(pos, &tail_pulse, None));
        if let Some(body) = doc.body() {
            let _ = body.append_child(&el);
        }
        // Brief arrival pulse, then settle to the resting transform.
        {
            let el = el.clone();
            let resting = dancer_style(pos, &tail, None);
            set_timeout(CELEBRATE_SCALE_MS, move || {
                let _ = el.set_attribute("style", &resting);
            });
        }

        state.planted.push(PlantedDancer { el, pos, tail });
        state.dancer_count += 1;
        state.last_plant_ms = now_ms();

        update_counter(&doc, state.dancer_count);
        apply_background(&doc, &state.background.evolve(state.dancer_count));
        if background::title_pulse(state.dancer_count) {
            pulse_class(&doc, ".title", "dancing", TITLE_PULSE_MS);
        }

        if state.rotator.record_placement(&mut state.rng) {
            // Theme changed: preview the new set on the cursor and celebrate
            // with tiny dancers.
            state.cursor_glyph = theme::random_glyph(state.rotator.current_set(), &mut state.rng);
            log(&format!(
                "theme set changed to {}",
                state.rotator.current_set().name
            ));
            let plan =
                sequence::celebration_plan(state.rotator.current_set(), viewport(), &mut state.rng);
            run_plan(plan);
        } else {
            state.cursor_glyph = theme::random_glyph(state.rotator.current_set(), &mut state.rng);
        }
        state.cursor.set_text_content(Some(state.cursor_glyph));
    });
}

/// Throttled placement while dragging: one stroke per `BRUSH_DELAY_MS`.
pub(crate) fn try_brush(x: f64, y: f64) {
    let due = GAME_STATE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|state| now_ms() - state.last_plant_ms >= BRUSH_DELAY_MS)
            .unwrap_or(false)
    });
    if due {
        plant_at(x, y);
    }
}

/// Five staggered placements at random points (right click / `r`).
pub(crate) fn random_party() {
    let plan = GAME_STATE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|state| sequence::burst_plan(viewport(), &mut state.rng))
    });
    if let Some(plan) = plan {
        run_plan(plan);
    }
}

/// Formation dance party for the current theme set; intensity > 1 means a
/// musical (amplified) party.
pub(crate) fn dance_party(intensity: u32) {
    let plan = GAME_STATE.with(|cell| {
        cell.borrow_mut().as_mut().map(|state| {
            sequence::dance_party_plan(
                state.rotator.current_set().glyphs,
                intensity,
                viewport(),
                &mut state.rng,
            )
        })
    });
    if let Some(plan) = plan {
        if let Some(f) = plan.formation {
            log(&format!("dance party formation: {}", f.as_str()));
        }
        run_plan(plan);
    }
}

/// Move dancers out of the center circle to the edges, making room for a
/// solo performance.
pub(crate) fn clear_dance_floor() {
    GAME_STATE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else {
            return;
        };
        let vp = viewport();
        let mut moved = 0u32;
        for dancer in state.planted.iter_mut() {
            if let Some(target) = formation::clear_floor_target(dancer.pos, vp, &mut state.rng) {
                let _ = dancer.el.set_attribute(
                    "style",
                    &dancer_style(target, &dancer.tail, Some("left 1.5s ease-out, top 1.5s ease-out")),
                );
                dancer.pos = target;
                let el = dancer.el.clone();
                let resting = dancer_style(target, &dancer.tail, None);
                set_timeout(FLOOR_CLEAR_MS, move || {
                    let _ = el.set_attribute("style", &resting);
                });
                moved += 1;
            }
        }
        log(&format!(
            "cleared the dance floor: moved {moved} dancers to the edges"
        ));
    });
}

/// "Restart the party": remove every dancer and reset all session state.
pub(crate) fn clear_all() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    GAME_STATE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else {
            return;
        };
        for dancer in state.planted.drain(..) {
            dancer.el.remove();
        }
        for el in state.tiny_dancers.drain(..) {
            el.remove();
        }
        state.pile.clear();
        state.dancer_count = 0;
        state.rotator.reset(&mut state.rng);
        state.cursor_glyph = theme::random_glyph(state.rotator.current_set(), &mut state.rng);
        state.cursor.set_text_content(Some(state.cursor_glyph));
        apply_background(&doc, &state.background.reset());
        update_counter(&doc, 0);
    });
}

/// Force the next theme set (keyboard shortcut), celebration included.
pub(crate) fn advance_set() {
    let plan = GAME_STATE.with(|cell| {
        cell.borrow_mut().as_mut().map(|state| {
            state.rotator.advance(&mut state.rng);
            state.cursor_glyph = theme::random_glyph(state.rotator.current_set(), &mut state.rng);
            state.cursor.set_text_content(Some(state.cursor_glyph));
            sequence::celebration_plan(state.rotator.current_set(), viewport(), &mut state.rng)
        })
    });
    if let Some(plan) = plan {
        run_plan(plan);
    }
}

pub(crate) fn handle_voice_command(command: VoiceCommand) {
    match command {
        VoiceCommand::MusicalDanceParty { intensity } => {
            log(&format!("voice command: musical dance party x{intensity}"));
            dance_party(intensity);
        }
        VoiceCommand::DanceParty => {
            log("voice command: dance party");
            dance_party(1);
        }
        VoiceCommand::ClearDanceFloor => {
            log("voice command: clear dance floor");
            clear_dance_floor();
        }
        VoiceCommand::RestartParty => {
            log("voice command: restart the party");
            clear_all();
        }
    }
}

// --- Spawn plan execution -----------------------------------------------------

/// Schedule every step of a plan. Callbacks are fire-and-forget: a clear
/// happening mid-sequence does not cancel spawns already scheduled.
pub(crate) fn run_plan(plan: SpawnPlan) {
    for step in plan.steps {
        let action = step.action;
        set_timeout(step.delay_ms as i32, move || perform(action));
    }
}

fn perform(action: SpawnAction) {
    match action {
        SpawnAction::Plant { x, y } => plant_at(x, y),
        SpawnAction::Dancer {
            glyph,
            x,
            y,
            font_px,
            animation_secs,
            musical_intensity,
        } => spawn_party_dancer(glyph, Point { x, y }, font_px, animation_secs, musical_intensity),
        SpawnAction::TinyDancer { glyph, start_x } => spawn_tiny_dancer(glyph, start_x),
    }
}

/// A big formation dancer; becomes a permanent part of the artwork.
fn spawn_party_dancer(
    glyph: &'static str,
    pos: Point,
    font_px: u32,
    animation_secs: f64,
    musical_intensity: Option<u32>,
) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    GAME_STATE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else {
            return;
        };
        let Ok(el) = doc.create_element("div") else {
            return;
        };
        el.set_class_name("dancer");
        el.set_text_content(Some(glyph));
        let _ = el.set_attribute("data-dance-party", "true");
        if let Some(intensity) = musical_intensity {
            let _ = el.set_attribute("data-musical-intensity", &intensity.to_string());
        }
        let tail = format!(
            "font-size:{}px; z-index:500; animation:dance {:.1}s infinite alternate ease-in-out;",
            font_px, animation_secs
        );
        let _ = el.set_attribute("style", &dancer_style(pos, &tail, None));
        if let Some(body) = doc.body() {
            let _ = body.append_child(&el);
        }
        state.planted.push(PlantedDancer { el, pos, tail });
        state.dancer_count += 1;
        update_counter(&doc, state.dancer_count);
    });
}

/// A tiny celebration dancer falling from the top into the pile. The landing
/// spot is computed here, at fire time, against the live pile history.
fn spawn_tiny_dancer(glyph: &'static str, start_x: f64) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    GAME_STATE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else {
            return;
        };
        let landing = pile::next_pile_position(&state.pile, viewport(), &mut state.rng);

        let Ok(el) = doc.create_element("div") else {
            return;
        };
        el.set_class_name("dancer tiny-dancer");
        el.set_text_content(Some(glyph));
        let _ = el.set_attribute("data-tiny-dancer", "true");
        let tail = "font-size:24px; z-index:50;".to_string();
        let start = Point {
            x: start_x,
            y: -50.0,
        };
        let _ = el.set_attribute("style", &dancer_style(start, &tail, None));
        if let Some(body) = doc.body() {
            let _ = body.append_child(&el);
        }
        state.tiny_dancers.push(el.clone());

        {
            let el = el.clone();
            let tail = tail.clone();
            set_timeout(TINY_FALL_START_MS, move || {
                let _ = el.set_attribute(
                    "style",
                    &dancer_style(landing, &tail, Some("left 2.5s ease-out, top 2.5s ease-in")),
                );
            });
        }
        set_timeout(TINY_SETTLE_MS, move || {
            let _ = el.class_list().add_1("pile-dancer");
            let _ = el.set_attribute("style", &dancer_style(landing, &tail, None));
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.pile.push(landing);
                }
            });
        });
    });
}

// --- DOM helpers --------------------------------------------------------------

fn set_cursor_visible(visible: bool) {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.cursor_visible = visible;
            let _ = state
                .cursor
                .set_attribute("style", &cursor_style(state.cursor_pos, visible));
        }
    });
}

fn cursor_style(pos: Point, visible: bool) -> String {
    format!(
        "position:fixed; left:{:.0}px; top:{:.0}px; font-size:60px; pointer-events:none; z-index:1000; display:{};",
        pos.x,
        pos.y,
        if visible { "block" } else { "none" }
    )
}

fn dancer_style(pos: Point, tail: &str, transition: Option<&str>) -> String {
    let mut style = format!(
        "position:fixed; left:{:.1}px; top:{:.1}px; {}",
        pos.x, pos.y, tail
    );
    if let Some(t) = transition {
        style.push_str(" transition:");
        style.push_str(t);
        style.push(';');
    }
    style
}

fn apply_background(doc: &Document, gradient: &str) {
    if let Some(body) = doc.body() {
        let _ = body.set_attribute(
            "style",
            &format!("transition:background 2s ease; background:{gradient};"),
        );
    }
}

fn update_counter(doc: &Document, count: u32) {
    if let Some(el) = doc.get_element_by_id("dancer-count") {
        el.set_text_content(Some(&count.to_string()));
        let _ = el.class_list().add_1("celebrating");
        set_timeout(COUNTER_PULSE_MS, move || {
            let _ = el.class_list().remove_1("celebrating");
        });
    }
}

fn pulse_class(doc: &Document, selector: &str, class: &'static str, duration_ms: i32) {
    if let Ok(Some(el)) = doc.query_selector(selector) {
        let _ = el.class_list().add_1(class);
        set_timeout(duration_ms, move || {
            let _ = el.class_list().remove_1(class);
        });
    }
}

/// One-shot timer; the closure is dropped after firing.
pub(crate) fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) {
    if let Some(win) = window() {
        let cb = Closure::once_into_js(f);
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            delay_ms,
        );
    }
}

/// PRNG seed: hardware randomness when the `rng` feature is on, otherwise
/// the sub-millisecond performance clock.
fn seed() -> u32 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 4];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u32::from_le_bytes(buf);
        }
    }
    (now_ms() * 1000.0) as u64 as u32
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn viewport() -> Viewport {
    let (width, height) = window()
        .map(|w| {
            (
                w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0),
                w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
            )
        })
        .unwrap_or((1280.0, 800.0));
    Viewport { width, height }
}

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}
