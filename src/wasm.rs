//! Browser bindings.
//!
//! JavaScript owns the DOM listeners, `requestAnimationFrame` and timers;
//! it forwards events and timestamps here and applies what comes back:
//! the track offset, the active index and any pending scroll request.
#![cfg(not(tarpaulin_include))]

use crate::chronology::order_newest_first;
use crate::config::SyncConfig;
use crate::entry::{ContentEntry, RawEntry};
use crate::scroll_sync::{Measurements, ScrollSyncController, SimulatedViewport};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

fn to_ms(now_ms: f64) -> u64 {
    now_ms.max(0.0) as u64
}

fn js_error(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct ScrollTimeline {
    controller: ScrollSyncController,
    host: SimulatedViewport,
}

#[wasm_bindgen]
impl ScrollTimeline {
    #[wasm_bindgen(constructor)]
    pub fn new(item_count: usize) -> ScrollTimeline {
        ScrollTimeline {
            controller: ScrollSyncController::new(item_count, SyncConfig::default()),
            host: SimulatedViewport::unmounted(),
        }
    }

    /// `config_json` uses the camelCase keys of `SyncConfig`; missing keys
    /// take their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(item_count: usize, config_json: &str) -> Result<ScrollTimeline, JsValue> {
        let config: SyncConfig = serde_json::from_str(config_json).map_err(js_error)?;
        Ok(ScrollTimeline {
            controller: ScrollSyncController::new(item_count, config),
            host: SimulatedViewport::unmounted(),
        })
    }

    #[wasm_bindgen(js_name = setMeasurements)]
    pub fn set_measurements(&mut self, section_top: f64, content_width: f64, viewport_width: f64) {
        self.host.measurements = Some(Measurements {
            section_top,
            content_width,
            viewport_width,
        });
    }

    #[wasm_bindgen(js_name = clearMeasurements)]
    pub fn clear_measurements(&mut self) {
        self.host.measurements = None;
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.host.reduced_motion = reduced;
    }

    /// Returns true when the caller must request an animation frame.
    pub fn mount(&mut self, scroll_y: f64) -> bool {
        self.host.scroll_y = scroll_y;
        self.controller.mount(&self.host)
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self) -> bool {
        self.controller.on_resize(&self.host)
    }

    #[wasm_bindgen(js_name = setItemCount)]
    pub fn set_item_count(&mut self, item_count: usize) -> bool {
        self.controller.set_item_count(item_count, &self.host)
    }

    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.host.scroll_y = scroll_y;
        self.controller.on_scroll()
    }

    #[wasm_bindgen(js_name = onAnimationFrame)]
    pub fn on_animation_frame(&mut self, now_ms: f64) -> bool {
        self.controller.on_animation_frame(&self.host, to_ms(now_ms))
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.controller.tick(&mut self.host, to_ms(now_ms))
    }

    pub fn next(&mut self, now_ms: f64) {
        self.controller.next(&mut self.host, to_ms(now_ms));
    }

    pub fn prev(&mut self, now_ms: f64) {
        self.controller.prev(&mut self.host, to_ms(now_ms));
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: i32, now_ms: f64) {
        self.controller
            .go_to(i64::from(index), &mut self.host, to_ms(now_ms));
    }

    #[wasm_bindgen(js_name = toggleAutoplay)]
    pub fn toggle_autoplay(&mut self, now_ms: f64) -> bool {
        self.controller.toggle_autoplay(&self.host, to_ms(now_ms))
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
        self.host.take_requests();
    }

    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f64 {
        self.controller.offset()
    }

    /// -1 when the timeline is empty.
    #[wasm_bindgen(getter, js_name = activeIndex)]
    pub fn active_index(&self) -> i32 {
        self.controller
            .active_index()
            .map(|i| i as i32)
            .unwrap_or(-1)
    }

    #[wasm_bindgen(getter, js_name = isAutoplaying)]
    pub fn is_autoplaying(&self) -> bool {
        self.controller.is_autoplaying()
    }

    #[wasm_bindgen(getter, js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.controller.next_deadline().map(|ms| ms as f64)
    }

    /// `{ top, behavior }` for the latest scroll the controller issued since
    /// the last call, or `null`. Earlier requests are superseded.
    #[wasm_bindgen(js_name = takeScrollRequest)]
    pub fn take_scroll_request(&mut self) -> Result<JsValue, JsValue> {
        let Some(request) = self.host.take_requests().pop() else {
            return Ok(JsValue::NULL);
        };
        let obj = Object::new();
        Reflect::set(&obj, &JsValue::from_str("top"), &JsValue::from_f64(request.top))?;
        Reflect::set(
            &obj,
            &JsValue::from_str("behavior"),
            &JsValue::from_str(request.behavior.as_str()),
        )?;
        Ok(obj.into())
    }
}

/// Order a JSON array of raw entries newest first and return it as JSON.
#[wasm_bindgen(js_name = orderNewestFirst)]
pub fn order_newest_first_json(entries_json: &str) -> Result<String, JsValue> {
    let raw: Vec<RawEntry> = serde_json::from_str(entries_json).map_err(js_error)?;
    let entries: Vec<ContentEntry> = raw.into_iter().map(ContentEntry::from_raw).collect();
    let ordered = order_newest_first(&entries);
    serde_json::to_string(&ordered).map_err(js_error)
}
