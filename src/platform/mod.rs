//! Browser platform layer
//!
//! Handles the page side of the game:
//! - Time (requestAnimationFrame pumps the session clock)
//! - Input events (keyboard, navigation buttons)
//! - Views, HUD and overlays
//! - Canvas painting

mod dom;
mod render;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

use crate::sim::{Arena, GameEvent, InputState, Screen, Session};
use crate::tuning::Tuning;
use dom::Ui;
use render::{ENEMY_SPRITE, PLAYER_SPRITE, Painter, Sprite};

/// Everything the page callbacks share
struct App {
    session: Session,
    ui: Ui,
    painter: Painter,
}

impl App {
    /// Bring the clock up to date, run `action`, then publish its effects
    fn act(&mut self, action: impl FnOnce(&mut Session)) {
        self.session.pump(now());
        action(&mut self.session);
        self.flush();
    }

    /// Animation frame: run every due task and repaint
    fn frame(&mut self, time: f64) {
        self.session.pump(time);
        self.flush();
    }

    fn flush(&mut self) {
        let mut redraw = false;
        for event in self.session.drain_events() {
            if event == GameEvent::Redraw {
                redraw = true;
                continue;
            }
            if let Err(e) = self.ui.apply(&event) {
                log::warn!("Failed to apply {:?}: {:?}", event, e);
            }
        }
        if redraw {
            self.painter.draw(self.session.player(), self.session.enemy());
        }
    }
}

fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Optional `<script id="tuning" type="application/json">` override
fn page_tuning(document: &Document) -> Tuning {
    let json = document
        .get_element_by_id("tuning")
        .and_then(|el| el.text_content());
    Tuning::load_or_default(json.as_deref())
}

fn arena_for(canvas: &HtmlCanvasElement, tuning: &Tuning) -> Arena {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    if w > 0.0 && h > 0.0 {
        Arena::new(w, h)
    } else {
        Arena::from(tuning)
    }
}

pub async fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }

    log::info!("Phase Chase starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let tuning = page_tuning(&document);

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("gameCanvas")
        .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
        .dyn_into()?;
    let arena = arena_for(&canvas, &tuning);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    // Nothing is drawn until both sprites settled
    let player = Sprite::load(PLAYER_SPRITE, "#4fc3f7").await;
    let enemy = Sprite::load(ENEMY_SPRITE, "#e53935").await;

    let seed = js_sys::Date::now() as u64;
    let app = Rc::new(RefCell::new(App {
        session: Session::new(tuning, arena, seed),
        ui: Ui::new(document.clone()),
        painter: Painter::new(ctx, arena, player, enemy),
    }));
    log::info!(
        "Session ready: arena {}x{}, seed {}",
        arena.width,
        arena.height,
        seed
    );

    setup_keyboard(&document, app.clone())?;
    setup_buttons(&document, app.clone())?;

    request_animation_frame(app);

    Ok(())
}

fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let mut a = app.borrow_mut();
            // Keep arrows from scrolling the page mid-game
            if a.session.screen() == Screen::Game && InputState::is_game_key(&key) {
                event.prevent_default();
            }
            a.session.key_down(&key);
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
        app.borrow_mut().session.key_up(&event.key());
    });
    document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let buttons: [(&str, fn(&mut Session)); 3] = [
        ("playButton", Session::start_game),
        ("backButton", Session::go_home),
        ("restartButton", Session::restart_game),
    ];

    for (id, action) in buttons {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("No #{} button on the page", id);
            continue;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            app.borrow_mut().act(action);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(app, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(app: Rc<RefCell<App>>, time: f64) {
    app.borrow_mut().frame(time);
    request_animation_frame(app);
}
