//! Canvas Pong entry point
//!
//! On the web this mounts the game on `#canvas`; natively it runs a headless
//! match and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }

    log::info!("Canvas Pong starting...");

    match canvas_pong::platform::start("canvas") {
        Ok(()) => log::info!("Canvas Pong running!"),
        Err(e) => log::error!("Failed to start: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_pong::Settings;
    use canvas_pong::platform::headless;

    env_logger::init();
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let ticks = headless::ticks_from_env();
    let report = headless::run(Settings::default(), ticks);

    println!("\nHeadless match: {} ticks", report.ticks);
    println!(
        "  paddle hits: player 1 = {}, player 2 = {}",
        report.player1_hits, report.player2_hits
    );
    println!(
        "  score (far : near): {}",
        report.last_label.as_deref().unwrap_or("-")
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
