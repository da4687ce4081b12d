//! Speech-recognition boundary. Wires the browser recognition stream to the
//! pure transcript matcher: dynamic event payloads are validated once here
//! and only plain strings cross into `voice`. Listening restarts itself
//! after natural ends and recoverable errors; a denied microphone permission
//! is terminal and stops all restart attempts.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    SpeechRecognition, SpeechRecognitionError, SpeechRecognitionErrorCode,
    SpeechRecognitionEvent, window,
};

use super::voice;

const RESTART_AFTER_END_MS: i32 = 1000;
const RESTART_AFTER_ERROR_MS: i32 = 2000;
/// Repeated commands from one utterance fire with this gap so they do not
/// all land in the same tick.
const COMMAND_STAGGER_MS: i32 = 150;

/// Listening lifecycle, kept apart from the browser handle so the restart
/// rules stay testable without a recognizer. The browser fires `end` after
/// every `error`, so a terminal error must survive the `end` that follows
/// it; `disable` is one-way.
#[derive(Default)]
struct ListenState {
    listening: bool,
    disabled: bool,
}

impl ListenState {
    fn on_started(&mut self) {
        self.listening = true;
    }

    /// Natural end or recoverable error: back to idle, restart permitted.
    fn on_stopped(&mut self) {
        self.listening = false;
    }

    /// Terminal error (denied microphone permission): no restarts, ever.
    fn disable(&mut self) {
        self.listening = false;
        self.disabled = true;
    }

    fn may_start(&self) -> bool {
        !self.listening && !self.disabled
    }
}

thread_local! {
    static RECOGNITION: RefCell<Option<SpeechRecognition>> = RefCell::new(None);
    static LISTEN_STATE: RefCell<ListenState> = RefCell::new(ListenState::default());
}

/// Set up continuous recognition. Unsupported browsers just lose voice
/// commands; every other input mode keeps working.
pub(super) fn setup_voice_recognition() {
    let recognition = match SpeechRecognition::new() {
        Ok(r) => r,
        Err(_) => {
            super::warn("speech recognition not supported in this browser; voice commands disabled");
            return;
        }
    };
    recognition.set_continuous(true);
    recognition.set_interim_results(false);
    recognition.set_max_alternatives(1);
    recognition.set_lang("en-US");

    {
        let closure = Closure::wrap(Box::new(move |evt: SpeechRecognitionEvent| {
            let Some(results) = evt.results() else {
                return;
            };
            let last = results.length().saturating_sub(1);
            let transcript = results
                .get(last)
                .and_then(|result| result.get(0))
                .map(|alt| alt.transcript());
            let Some(transcript) = transcript else {
                return;
            };
            let commands = voice::parse(&transcript);
            if commands.is_empty() {
                super::log(&format!("no recognized commands in: {transcript}"));
                return;
            }
            for (i, command) in commands.into_iter().enumerate() {
                super::set_timeout(i as i32 * COMMAND_STAGGER_MS, move || {
                    super::handle_voice_command(command)
                });
            }
        }) as Box<dyn FnMut(_)>);
        recognition.set_onresult(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move || {
            LISTEN_STATE.with(|s| s.borrow_mut().on_stopped());
            update_indicator(false);
            super::set_timeout(RESTART_AFTER_END_MS, || {
                if LISTEN_STATE.with(|s| s.borrow().may_start()) {
                    start_listening();
                }
            });
        }) as Box<dyn FnMut()>);
        recognition.set_onend(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: SpeechRecognitionError| {
            update_indicator(false);
            if evt.error() == SpeechRecognitionErrorCode::NotAllowed {
                // Permission denial is terminal; the `end` that follows this
                // error must not schedule a retry either.
                LISTEN_STATE.with(|s| s.borrow_mut().disable());
                super::warn("microphone access denied; voice commands disabled");
                return;
            }
            LISTEN_STATE.with(|s| s.borrow_mut().on_stopped());
            super::warn("speech recognition error; restarting shortly");
            super::set_timeout(RESTART_AFTER_ERROR_MS, || {
                if LISTEN_STATE.with(|s| s.borrow().may_start()) {
                    start_listening();
                }
            });
        }) as Box<dyn FnMut(_)>);
        recognition.set_onerror(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    RECOGNITION.with(|cell| cell.replace(Some(recognition)));
    start_listening();
}

fn start_listening() {
    RECOGNITION.with(|cell| {
        let borrow = cell.borrow();
        let Some(recognition) = borrow.as_ref() else {
            return;
        };
        if !LISTEN_STATE.with(|s| s.borrow().may_start()) {
            return;
        }
        LISTEN_STATE.with(|s| s.borrow_mut().on_started());
        match recognition.start() {
            Ok(()) => update_indicator(true),
            Err(_) => {
                LISTEN_STATE.with(|s| s.borrow_mut().on_stopped());
                update_indicator(false);
                super::warn("failed to start voice recognition");
            }
        }
    });
}

fn update_indicator(listening: bool) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("voice-indicator") {
            let classes = el.class_list();
            let _ = if listening {
                classes.add_1("listening")
            } else {
                classes.remove_1("listening")
            };
        }
    }
}
