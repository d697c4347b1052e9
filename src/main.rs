//! Graph Fight entry point
//!
//! On the web this starts the canvas render loop. Natively it renders one
//! frame into a recording target, which is handy for checking a settings
//! file without a browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    let session = graph_fight::web::start(None)?;
    // Renders for the lifetime of the page
    std::mem::forget(session);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use graph_fight::platform;
    use graph_fight::renderer::{FrameOutcome, RecordingCanvas, RenderSession};
    use graph_fight::settings::Settings;
    use graph_fight::sim::Game;

    let mut settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Cannot read settings from {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => Settings::load(),
    };
    platform::init_logging(settings.log_level.to_level());
    log::info!("Graph Fight (native) starting...");
    log::info!("Native mode renders a single frame - run with `trunk serve` for the web version");

    if settings.game.seed == 0 {
        settings.game.seed = 1;
    }

    let result = settings.validate().and_then(|_| {
        let game = Game::new(settings.game.clone())?;
        RenderSession::new(game, RecordingCanvas::new(800.0, 400.0), settings.style.clone())
    });
    let mut session = match result {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    match session.tick() {
        FrameOutcome::Drawn { circles } => {
            log::info!(
                "Frame drawn: {} circles, {} draw commands",
                circles,
                session.target().commands().len()
            );
        }
        other => log::warn!("Unexpected first frame outcome: {:?}", other),
    }
    if session.tick() == FrameOutcome::Skipped {
        log::info!("Second tick skipped (no changes)");
    }
}
