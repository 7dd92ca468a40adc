//! wasm-bindgen exports.
//!
//! This module exposes the minifier to JavaScript via `wasm-bindgen`.
//! The underlying logic lives in the `jsmin-sourcemap` crate.

use wasm_bindgen::prelude::*;

use jsmin_sourcemap::{MinifyConfig as MinifyConfigInner, minify as minify_inner};

/// Configuration options for minification.
#[derive(Debug, Clone, Default, serde::Deserialize, tsify::Tsify)]
#[serde(rename_all = "camelCase")]
#[tsify(from_wasm_abi)]
pub struct MinifyConfig {
    /// Name of the input file, recorded as the sourcemap source (required)
    #[tsify(optional)]
    pub input_filename: Option<String>,
    /// Name of the minified file, recorded as the sourcemap `file`
    #[tsify(optional)]
    pub output_filename: Option<String>,
    /// Recorded as the sourcemap `sourceRoot`
    #[tsify(optional)]
    pub source_root: Option<String>,
}

impl From<MinifyConfig> for MinifyConfigInner {
    fn from(val: MinifyConfig) -> Self {
        MinifyConfigInner {
            input_filename: val.input_filename,
            output_filename: val.output_filename,
            source_root: val.source_root,
        }
    }
}

/// Output from the wasm API.
#[derive(Debug, Clone, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct MinifyOutput {
    /// The minified JavaScript.
    pub code: String,
    /// Source Map v3 JSON for `code`.
    pub sourcemap: String,
}

/// Minify `code` and create a sourcemap for the result.
#[wasm_bindgen]
pub fn minify(code: String, config: MinifyConfig) -> Result<MinifyOutput, JsValue> {
    console_error_panic_hook::set_once();

    let res = minify_inner(&code, &config.into()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let sourcemap = res
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(MinifyOutput {
        code: res.into_code(),
        sourcemap,
    })
}
