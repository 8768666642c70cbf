use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// Passed to the frame callback once per display refresh.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    /// Frames since the loop started, starting at 0.
    pub tick: u64,
    /// Seconds since the first frame of the loop.
    pub elapsed_secs: f64,
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop. Dropping or cancelling it detaches the
/// callback; no frame runs afterwards.
pub struct FrameLoop {
    // Holds the closure so it can re-request itself. The closure keeps a
    // clone of this `Rc`, so the cycle is broken explicitly on cancel.
    slot: Rc<RefCell<Option<FrameClosure>>>,
    request: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Starts calling `callback` every frame until it returns
    /// `ControlFlow::Break` or the loop is cancelled.
    pub fn start<F>(mut callback: F) -> Result<Self, JsValue>
    where
        F: FnMut(FrameInfo) -> ControlFlow<()> + 'static,
    {
        let window = web_sys::window().ok_or("no window")?;
        let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let request = Rc::new(Cell::new(None));

        let f = slot.clone();
        let pending = request.clone();
        let frame_window = window.clone();
        let mut tick: u64 = 0;
        let mut first: Option<f64> = None;
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            pending.set(None);
            let first = *first.get_or_insert(now);
            let info = FrameInfo {
                tick,
                elapsed_secs: (now - first) / 1000.0,
            };
            tick += 1;

            if callback(info).is_break() {
                log::debug!("frame loop finished after {tick} frames");
                return;
            }

            // schedule next
            if let Some(closure) = f.borrow().as_ref() {
                match frame_window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = window.request_animation_frame(
            slot.borrow()
                .as_ref()
                .ok_or("frame closure missing")?
                .as_ref()
                .unchecked_ref(),
        )?;
        request.set(Some(id));

        Ok(Self { slot, request })
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.request.take() {
            if let Some(window) = web_sys::window() {
                window.cancel_animation_frame(id).ok();
            }
        }
        self.slot.borrow_mut().take();
    }
}
