//! WebAssembly bindings
//!
//! Browser entry points taking the hierarchy and an optional config override
//! object as JSON strings. Errors surface as JavaScript exceptions.

use wasm_bindgen::prelude::*;

use crate::core::{CharacterSet, ConfigOverrides, LayoutConfig};
use crate::hierarchy::{Hierarchy, HierarchyRenderer};

/// Set up the panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn renderer_for(config_json: &str) -> Result<HierarchyRenderer, JsValue> {
    let config = if config_json.trim().is_empty() {
        LayoutConfig::default()
    } else {
        ConfigOverrides::from_json(config_json)
            .and_then(|overrides| LayoutConfig::default().merged(&overrides))
            .map_err(to_js)?
    };
    Ok(HierarchyRenderer::new(config))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Render a JSON hierarchy to an SVG document
///
/// `config_json` may be empty for the defaults.
#[wasm_bindgen]
pub fn render_svg(input: &str, config_json: &str) -> Result<String, JsValue> {
    let tree = Hierarchy::from_json(input).map_err(to_js)?;
    renderer_for(config_json)?.render_svg(&tree).map_err(to_js)
}

/// Render a JSON hierarchy as a character grid ("ascii" or "unicode")
#[wasm_bindgen]
pub fn render_ascii(input: &str, config_json: &str, style: &str) -> Result<String, JsValue> {
    let style = match style {
        "ascii" => CharacterSet::Ascii,
        "unicode" => CharacterSet::Unicode,
        _ => {
            return Err(JsValue::from_str(&format!(
                "Unknown style: {}. Use 'ascii' or 'unicode'",
                style
            )))
        }
    };
    let tree = Hierarchy::from_json(input).map_err(to_js)?;
    renderer_for(config_json)?
        .render_ascii(&tree, style)
        .map_err(to_js)
}

/// Canvas size and tree statistics as JSON
#[wasm_bindgen]
pub fn canvas_size(input: &str, config_json: &str) -> Result<String, JsValue> {
    let tree = Hierarchy::from_json(input).map_err(to_js)?;
    let renderer = renderer_for(config_json)?;
    let canvas = renderer.canvas_size(&tree).map_err(to_js)?;

    let result = serde_json::json!({
        "width": canvas.width,
        "height": canvas.height,
        "node_count": tree.node_count(),
        "depth": tree.depth(),
    });
    serde_json::to_string(&result).map_err(to_js)
}
