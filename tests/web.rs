#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let elem = match document.get_element_by_id("c") {
        Some(elem) => elem,
        None => {
            let canvas = document.create_element("canvas").unwrap();
            canvas.set_id("c");
            document.body().unwrap().append_child(&canvas).unwrap();
            canvas
        }
    };
    elem.dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn canvas_is_sized_to_window() {
    let canvas = ensure_canvas();
    tween_viz::start_preset("pubu-grid").unwrap();

    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
    let height = window.inner_height().unwrap().as_f64().unwrap() as u32;
    assert_eq!((canvas.width(), canvas.height()), (width, height));
    tween_viz::stop();
}

#[wasm_bindgen_test]
fn every_preset_compiles() {
    ensure_canvas();
    for name in ["pulse-grid", "pubu-grid", "flicker-grid", "layout-morph"] {
        tween_viz::start_preset(name).unwrap_or_else(|err| panic!("{name}: {err:?}"));
    }
    tween_viz::stop();
}

#[wasm_bindgen_test]
fn bad_input_is_rejected() {
    ensure_canvas();
    assert!(tween_viz::start_preset("no-such-sketch").is_err());
    assert!(tween_viz::start_with_config("{\"sketch\": \"state-tween\"}").is_err());
}
