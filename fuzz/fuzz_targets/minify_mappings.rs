#![no_main]

use jsmin_sourcemap::{MinifyConfig, minify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 256 * 1024 {
        &data[..256 * 1024]
    } else {
        data
    };

    let source = String::from_utf8_lossy(data);
    let Ok(res) = minify(&source, &MinifyConfig::new("input.js")) else {
        return;
    };

    // `\r\n`, `\r` and `\n` each end one line.
    let line_count = source.replace("\r\n", "\n").replace('\r', "\n").split('\n').count() as u32;

    let mut prev = None;
    for m in res.mappings() {
        assert!(m.original.line >= 1 && m.original.line <= line_count);
        assert!(m.generated.line >= 1);
        if let Some(prev) = prev {
            assert!(m.generated > prev, "mappings must be in generated order");
        }
        prev = Some(m.generated);
    }
});
