//! Page views, HUD text and the dialogue/countdown overlay

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::sim::{GameEvent, Screen};

const HIDDEN_CLASS: &str = "hidden";

const DIALOGUE_STYLE: &str = "position:absolute; top:50%; left:50%; transform:translate(-50%,-50%); \
    font-size:24px; color:white; background-color:rgba(0,0,0,0.7); padding:20px; \
    border-radius:10px; text-align:center; z-index:30;";
const COUNTDOWN_STYLE: &str = "position:absolute; top:50%; left:50%; transform:translate(-50%,-50%); \
    font-size:48px; color:white; text-align:center; z-index:30;";

/// A single centered overlay element, created on demand and removed when hidden
#[derive(Default)]
struct Overlay {
    el: Option<Element>,
}

impl Overlay {
    fn show(&mut self, document: &Document, text: &str, style: &str) -> Result<(), JsValue> {
        let el = match self.el.take() {
            Some(el) => el,
            None => {
                let el = document.create_element("div")?;
                el.set_id("phase-overlay");
                let body = document
                    .body()
                    .ok_or_else(|| JsValue::from_str("no body"))?;
                body.append_child(&el)?;
                el
            }
        };
        el.set_attribute("style", style)?;
        el.set_text_content(Some(text));
        self.el = Some(el);
        Ok(())
    }

    fn hide(&mut self) {
        if let Some(el) = self.el.take() {
            el.remove();
        }
    }
}

/// DOM side of the presentation boundary
pub struct Ui {
    document: Document,
    timer: Option<Element>,
    result_text: Option<Element>,
    overlay: Overlay,
}

impl Ui {
    pub fn new(document: Document) -> Self {
        let timer = document.get_element_by_id("timer");
        let result_text = document.get_element_by_id("resultText");
        if timer.is_none() {
            log::warn!("No #timer element; time left will not be shown");
        }
        if result_text.is_none() {
            log::warn!("No #resultText element; outcome will not be shown");
        }
        Self {
            document,
            timer,
            result_text,
            overlay: Overlay::default(),
        }
    }

    /// Apply one session event. `Redraw` belongs to the painter and is ignored.
    pub fn apply(&mut self, event: &GameEvent) -> Result<(), JsValue> {
        match event {
            GameEvent::ShowScreen(screen) => self.show_screen(*screen)?,
            GameEvent::ShowDialogue(line) => {
                self.overlay.show(&self.document, line, DIALOGUE_STYLE)?
            }
            GameEvent::ShowCountdown(n) => {
                self.overlay
                    .show(&self.document, &n.to_string(), COUNTDOWN_STYLE)?
            }
            GameEvent::ShowGo => self.overlay.show(&self.document, "Go!", COUNTDOWN_STYLE)?,
            GameEvent::HideOverlay => self.overlay.hide(),
            GameEvent::TimeLeft(secs) => {
                if let Some(el) = &self.timer {
                    el.set_text_content(Some(&format!("Time: {}", secs)));
                }
            }
            GameEvent::Outcome(outcome) => {
                self.overlay.hide();
                if let Some(el) = &self.result_text {
                    el.set_text_content(Some(outcome.message()));
                }
            }
            GameEvent::Redraw => {}
        }
        Ok(())
    }

    fn show_screen(&self, screen: Screen) -> Result<(), JsValue> {
        for view in Screen::ALL {
            if let Some(el) = self.document.get_element_by_id(view.element_id()) {
                el.class_list()
                    .toggle_with_force(HIDDEN_CLASS, view != screen)?;
            }
        }
        Ok(())
    }
}
