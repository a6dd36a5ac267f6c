#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(config) = toml::from_str::<tablescope::Config>(content) {
            // Options may be rejected, but never panic.
            let _ = config.explorer_options();
        }
    }
});
