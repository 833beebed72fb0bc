#![no_main]

use libfuzzer_sys::fuzz_target;

// Accepts arbitrary bytes, attempts to parse as JSON, feeds to convert() and
// renders the result. Goal: no panics, even on malformed input.
fuzz_target!(|data: &[u8]| {
    if let Ok(fields) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(result) = schema_exporter_core::convert(&fields, &Default::default()) {
            let _ = schema_exporter_core::render_module_file(None, "fuzz", &result.schema);
        }
    }
});
