//! Browser entry point
//!
//! `start` builds a render session on the page's canvas and registers it
//! with the animation ticker. The returned [`WebSession`] lets the page
//! signal changes, regenerate the arena, or stop rendering.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::error::ConstructionError;
use crate::platform::{self, AnimationTicker};
use crate::renderer::{CanvasSurface, DirtyFlag, FrameOutcome, RenderSession};
use crate::settings::Settings;
use crate::sim::Game;

type Session = RenderSession<Game, CanvasSurface>;

#[wasm_bindgen]
pub struct WebSession {
    session: Rc<RefCell<Session>>,
    dirty: DirtyFlag,
    ticker: AnimationTicker,
}

#[wasm_bindgen]
impl WebSession {
    /// Request a redraw on the next frame
    pub fn mark_changed(&self) {
        self.dirty.mark();
    }

    /// Regenerate the arena with a new seed and redraw
    pub fn reset(&self, seed: u64) -> Result<(), JsValue> {
        let mut session = self.session.borrow_mut();
        session
            .simulation_mut()
            .reset(seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        session.mark_changed();
        log::info!("Arena reset with seed: {}", seed);
        Ok(())
    }

    pub fn stop(&self) {
        self.ticker.stop();
        log::info!("Render loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.session.borrow().frames_drawn()
    }
}

/// Build the session and schedule the first frame.
///
/// `canvas_id` overrides the id stored in settings. On failure nothing is
/// scheduled and the error is returned to the caller.
#[wasm_bindgen]
pub fn start(canvas_id: Option<String>) -> Result<WebSession, JsValue> {
    let mut settings = Settings::load();
    platform::init_logging(settings.log_level.to_level());

    if let Some(id) = canvas_id {
        settings.canvas_id = id;
    }
    if settings.game.seed == 0 {
        settings.game.seed = js_sys::Date::now() as u64;
    }

    match build(&settings) {
        Ok(web_session) => {
            log::info!(
                "Graph Fight running on #{} (seed {})",
                settings.canvas_id,
                settings.game.seed
            );
            Ok(web_session)
        }
        Err(e) => {
            log::error!("Failed to start: {}", e);
            Err(e)
        }
    }
}

fn build(settings: &Settings) -> Result<WebSession, JsValue> {
    settings.validate()?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let surface = CanvasSurface::from_document(&document, &settings.canvas_id)?;
    let game = Game::new(settings.game.clone()).map_err(ConstructionError::from)?;
    let session = RenderSession::new(game, surface, settings.style.clone())?;

    let dirty = session.dirty_flag();
    let session = Rc::new(RefCell::new(session));

    let ticker = {
        let session = session.clone();
        AnimationTicker::start(move |_time| {
            if let FrameOutcome::Drawn { circles } = session.borrow_mut().tick() {
                log::debug!("Painted {} circles", circles);
            }
        })?
    };

    Ok(WebSession {
        session,
        dirty,
        ticker,
    })
}
