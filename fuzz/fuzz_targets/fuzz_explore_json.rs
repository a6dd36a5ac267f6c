#![no_main]

use libfuzzer_sys::fuzz_target;
use tablescope::{Explorer, ExplorerOptions, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(options) = ExplorerOptions::builder()
        .page_size(3)
        .max_leaf_chars(16)
        .default_expanded(true)
        .build()
    else {
        return;
    };

    let explorer = Explorer::new("root", Value::from(json), &options);
    let visual = explorer.render();
    let _ = serde_json::to_string(&visual);
});
