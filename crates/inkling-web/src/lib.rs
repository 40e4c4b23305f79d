pub mod runner;

pub use runner::SessionRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use inkling_engine::GameConfig;

// The runner lives in a thread_local because wasm-bindgen exports free
// functions, not methods; the browser side only ever runs one app instance.
thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("App not initialized. Call app_init() first.");
        f(runner)
    })
}

/// Initialize the app with a JSON `GameConfig`. Bad config falls back to the
/// default two-player setup rather than failing the page.
#[wasm_bindgen]
pub fn app_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config: GameConfig = serde_json::from_str(config_json).unwrap_or_else(|e| {
        log::warn!("invalid game config, using defaults: {e}");
        GameConfig::default()
    });
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SessionRunner::new(config));
    });
    log::info!("inkling: initialized");
}

// ---- Game flow ----

#[wasm_bindgen]
pub fn app_confirm_order() {
    with_runner(|r| r.confirm_order());
}

/// Start the game. Returns the challenge request JS must fetch, as JSON, or
/// None when starting is not allowed right now.
#[wasm_bindgen]
pub fn app_start_game() -> Option<String> {
    with_runner(|r| r.start_game())
}

#[wasm_bindgen]
pub fn app_retry() -> Option<String> {
    with_runner(|r| r.retry())
}

/// Submit a guess. At the tier that delegates rating this returns the rating
/// request to fetch; otherwise the human judge takes over and None is
/// returned.
#[wasm_bindgen]
pub fn app_submit_guess(guess: &str) -> Option<String> {
    with_runner(|r| r.submit_guess(guess))
}

#[wasm_bindgen]
pub fn app_judge(rating: u8) {
    with_runner(|r| r.judge(rating));
}

#[wasm_bindgen]
pub fn app_pass_turn() {
    with_runner(|r| r.pass_turn());
}

#[wasm_bindgen]
pub fn app_advance_turn() -> Option<String> {
    with_runner(|r| r.advance_turn())
}

#[wasm_bindgen]
pub fn app_reset() {
    with_runner(|r| r.reset());
}

// ---- Provider deliveries ----

#[wasm_bindgen]
pub fn app_deliver_challenge(seq: u64, json: &str) -> bool {
    with_runner(|r| r.deliver_challenge(seq, json))
}

#[wasm_bindgen]
pub fn app_deliver_challenge_error(seq: u64, message: &str) -> bool {
    with_runner(|r| r.deliver_challenge_error(seq, message))
}

#[wasm_bindgen]
pub fn app_deliver_rating(seq: u64, json: &str) -> bool {
    with_runner(|r| r.deliver_rating(seq, json))
}

#[wasm_bindgen]
pub fn app_deliver_rating_error(seq: u64, message: &str) -> bool {
    with_runner(|r| r.deliver_rating_error(seq, message))
}

/// Answer the outstanding request from the built-in offline deck.
#[wasm_bindgen]
pub fn app_fulfill_offline() -> bool {
    with_runner(|r| r.fulfill_offline())
}

// ---- Note board ----

#[wasm_bindgen]
pub fn board_place_note(text: &str, abstraction: u8) -> Option<u32> {
    with_runner(|r| r.place_note(text, abstraction))
}

#[wasm_bindgen]
pub fn board_remove_note(id: u32) -> bool {
    with_runner(|r| r.remove_note(id))
}

#[wasm_bindgen]
pub fn board_begin_drag(id: u32, x: f32, y: f32) -> bool {
    with_runner(|r| r.begin_drag(id, x, y))
}

#[wasm_bindgen]
pub fn board_update_drag(x: f32, y: f32) {
    with_runner(|r| r.update_drag(x, y));
}

#[wasm_bindgen]
pub fn board_end_drag() {
    with_runner(|r| r.end_drag());
}

// ---- Viewport ----

#[wasm_bindgen]
pub fn board_set_viewport_size(width: f32, height: f32) {
    with_runner(|r| r.set_viewport_size(width, height));
}

#[wasm_bindgen]
pub fn board_pan(dx: f32, dy: f32) {
    with_runner(|r| r.pan(dx, dy));
}

#[wasm_bindgen]
pub fn board_zoom_in() {
    with_runner(|r| r.zoom_in());
}

#[wasm_bindgen]
pub fn board_zoom_out() {
    with_runner(|r| r.zoom_out());
}

#[wasm_bindgen]
pub fn board_zoom() -> f32 {
    with_runner(|r| r.zoom())
}

// ---- Snapshot ----

/// Serialize the visible state for the presentation layer to render.
#[wasm_bindgen]
pub fn app_snapshot() -> String {
    with_runner(|r| r.snapshot())
}
