#![no_main]

use libfuzzer_sys::fuzz_target;
use tablescope::panel::JsonSnapshot;
use tablescope::{ExplorerOptions, Panel, PanelPreference};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = JsonSnapshot::parse(content) else {
        return;
    };
    let preference = PanelPreference::load(Box::new(tablescope::panel::MemoryStore::default()), true);
    let panel = Panel::new(&snapshot, &ExplorerOptions::default(), preference);
    let _ = panel.render();
});
