//! Generative point sketches for the browser: a grid of circles tweening
//! between precomputed animation states, and a point cloud morphing between
//! layouts. The layout, state and scheduling logic is plain Rust and builds
//! on any target; the WebGL2 side only exists on wasm32.

pub mod config;
pub mod easing;
pub mod error;
pub mod grid;
pub mod layout;
pub mod palette;
pub mod states;
pub mod tween;

pub use error::{Error, Result};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub use wasm::{start_preset, start_with_config, stop};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::{Preset, SketchConfig};

    mod frame;
    mod morph;
    mod program;
    mod render;

    use frame::FrameLoop;

    thread_local! {
        static RUNNING: RefCell<Option<FrameLoop>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let Ok(canvas) = canvas() else {
            log::warn!("no canvas with id `c`; waiting for start_preset");
            return Ok(());
        };
        let preset = query_preset()
            .or_else(|| canvas.get_attribute("data-sketch"))
            .map(|name| name.parse::<Preset>())
            .transpose()
            .map_err(crate::Error::from)?
            .unwrap_or_default();
        log::info!("starting sketch `{preset}`");
        run(canvas, preset.config())
    }

    /// Replaces the running sketch with one of the stock presets.
    #[wasm_bindgen]
    pub fn start_preset(name: &str) -> Result<(), JsValue> {
        let preset: Preset = name.parse().map_err(crate::Error::from)?;
        run(canvas()?, preset.config())
    }

    /// Replaces the running sketch with one described by a JSON
    /// [`SketchConfig`].
    #[wasm_bindgen]
    pub fn start_with_config(json: &str) -> Result<(), JsValue> {
        let config = SketchConfig::from_json(json)?;
        run(canvas()?, config)
    }

    /// Detaches the running sketch's frame callback.
    #[wasm_bindgen]
    pub fn stop() {
        RUNNING.with(|running| {
            if let Some(frame_loop) = running.borrow_mut().take() {
                frame_loop.cancel();
                log::info!("sketch stopped");
            }
        });
    }

    fn run(canvas: web_sys::HtmlCanvasElement, config: SketchConfig) -> Result<(), JsValue> {
        stop();
        config.validate()?;
        let frame_loop = match config {
            SketchConfig::StateTween(config) => render::start(canvas, &config)?,
            SketchConfig::LayoutMorph(config) => morph::start(canvas, &config)?,
        };
        RUNNING.with(|running| *running.borrow_mut() = Some(frame_loop));
        Ok(())
    }

    fn canvas() -> Result<web_sys::HtmlCanvasElement, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("c")
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        Ok(canvas)
    }

    fn query_preset() -> Option<String> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "sketch")
            .map(|(_, value)| value.to_string())
    }
}
