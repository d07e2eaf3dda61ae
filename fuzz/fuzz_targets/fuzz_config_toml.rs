#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing must reject bad input without panicking
        if let Ok(config) = toml::from_str::<ckan_mirror::Config>(content) {
            let _ = config.resolve();
        }
    }
});
