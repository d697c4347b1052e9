//! requestAnimationFrame registration
//!
//! The callback is registered once and re-armed by the ticker after each
//! frame, so stopping is a single call instead of a flag checked inside
//! every callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct TickerInner {
    closure: RefCell<Option<FrameCallback>>,
    pending: Cell<Option<i32>>,
    running: Cell<bool>,
}

impl TickerInner {
    fn schedule(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = self.closure.borrow();
        let Some(closure) = closure.as_ref() else {
            return Ok(());
        };
        let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        self.pending.set(Some(id));
        Ok(())
    }
}

/// Calls a function on every animation frame until stopped or dropped
pub struct AnimationTicker {
    inner: Rc<TickerInner>,
}

impl AnimationTicker {
    /// Register `on_frame` and schedule the first frame.
    ///
    /// `on_frame` receives the frame timestamp in milliseconds.
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let inner = Rc::new(TickerInner {
            closure: RefCell::new(None),
            pending: Cell::new(None),
            running: Cell::new(true),
        });

        // Weak so dropping the ticker ends the loop
        let weak: Weak<TickerInner> = Rc::downgrade(&inner);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            if !inner.running.get() {
                return;
            }

            on_frame(time);

            if inner.running.get() {
                if let Err(e) = inner.schedule() {
                    log::error!("Failed to schedule next frame: {:?}", e);
                    inner.running.set(false);
                }
            }
        });
        *inner.closure.borrow_mut() = Some(closure);

        inner.schedule()?;
        Ok(Self { inner })
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Cancel the pending frame. No further callbacks run.
    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for AnimationTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
