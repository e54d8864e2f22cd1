//! WASM bindings for the bloom-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use serde_json::to_string;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use crate::canvas::CanvasView;
use crate::output::{PreviewPlanOutput, WallOutput};
use crate::previews::{self, PreviewConfig};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

fn wall_json(messages_json: &str, config_json: Option<&str>) -> String {
    let output = match WallOutput::build(messages_json, config_json) {
        Ok(output) => {
            console_log(&format!("Infinite Canvas: {} cards positioned", output.cards.len()));
            if output.fallbacks > 0 {
                console_log(&format!("Infinite Canvas: {} cards used fallback placement", output.fallbacks));
            }
            output
        }
        Err(e) => {
            console_error(&format!("Error laying out wall: {}", e));
            WallOutput::failed(&e)
        }
    };
    to_string(&output).unwrap_or_else(|_| "{\"cards\": [], \"fallbacks\": 0}".to_string())
}

/// Position every message row (JSON array, newest first) on the canvas.
#[wasm_bindgen]
pub fn layout_wall(messages_json: &str) -> String {
    wall_json(messages_json, None)
}

/// Same as `layout_wall` with a partial `LayoutConfig` override as JSON.
#[wasm_bindgen]
pub fn layout_wall_with_config(messages_json: &str, config_json: &str) -> String {
    wall_json(messages_json, Some(config_json))
}

/// Manifest key of a link, used to look up its preview image.
#[wasm_bindgen]
pub fn preview_key(url: &str) -> String {
    previews::preview_key(url)
}

/// Preview-worthy URLs in compiled post code, as a JSON array.
#[wasm_bindgen]
pub fn extract_preview_urls(code: &str) -> String {
    let urls = previews::extract_urls(code, &PreviewConfig::default());
    to_string(&urls).unwrap_or_else(|_| "[]".to_string())
}

/// Plan the next screenshot run. `manifest_json` may be empty when no manifest exists yet.
#[wasm_bindgen]
pub fn plan_previews(posts_json: &str, manifest_json: &str, now_rfc3339: &str) -> String {
    let output = match PreviewPlanOutput::build(posts_json, Some(manifest_json), now_rfc3339) {
        Ok(output) => output,
        Err(e) => {
            console_error(&format!("Error planning previews: {}", e));
            PreviewPlanOutput::failed(&e)
        }
    };
    to_string(&output).unwrap_or_else(|_| "{\"urls\": [], \"to_capture\": []}".to_string())
}

/// Pan/drag state of the wall canvas, driven by the host's mouse handlers.
#[wasm_bindgen]
#[derive(Default)]
pub struct WallCanvas {
    view: CanvasView,
}

#[wasm_bindgen]
impl WallCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WallCanvas {
        WallCanvas::default()
    }

    pub fn on_mouse_down(&mut self, e: &MouseEvent) {
        e.prevent_default();
        self.view.pointer_down(e.client_x() as f64, e.client_y() as f64);
    }

    /// Returns true when the canvas moved and the transform should be re-applied.
    pub fn on_mouse_move(&mut self, e: &MouseEvent) -> bool {
        self.view.pointer_move(e.client_x() as f64, e.client_y() as f64)
    }

    pub fn on_mouse_up(&mut self) {
        self.view.pointer_up();
    }

    pub fn on_mouse_leave(&mut self) {
        self.view.pointer_leave();
    }

    pub fn recenter(&mut self) {
        self.view.recenter();
    }

    pub fn finish_transition(&mut self) {
        self.view.finish_transition();
    }

    pub fn transition_ms(&self) -> u32 {
        crate::canvas::RECENTER_TRANSITION_MS
    }

    pub fn has_moved(&self) -> bool {
        self.view.has_moved()
    }

    pub fn is_dragging(&self) -> bool {
        self.view.is_dragging()
    }

    pub fn transform(&self) -> String {
        self.view.transform()
    }

    pub fn cursor(&self) -> String {
        self.view.cursor().to_string()
    }

    pub fn transition(&self) -> String {
        self.view.transition().to_string()
    }
}
