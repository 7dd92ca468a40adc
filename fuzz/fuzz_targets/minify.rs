#![no_main]

use jsmin_sourcemap::{MinifyConfig, minify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Limit input size to keep the fuzzer fast and avoid OOM in pathological cases.
    let data = if data.len() > 256 * 1024 {
        &data[..256 * 1024]
    } else {
        data
    };

    let source = String::from_utf8_lossy(data);

    // Parse errors are expected outcomes and must never crash.
    let config = MinifyConfig::new("input.js").with_output_filename("input.min.js");
    if let Ok(res) = minify(&source, &config) {
        let json = res.to_json().expect("sourcemap serialization must succeed");
        let _ = serde_json::from_str::<serde_json::Value>(&json)
            .expect("sourcemap must be valid JSON when minify() returns Ok");
    }
});
