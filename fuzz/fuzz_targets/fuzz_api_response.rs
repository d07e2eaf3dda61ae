#![no_main]

use ckan_mirror::domain::entities::Package;
use ckan_mirror::infrastructure::catalog::ApiResponse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        // Arbitrary response bodies must decode or fail cleanly
        if let Ok(response) = ApiResponse::parse("package_show", 200, body) {
            let _ = response.clone().into_lookup::<Package>("package_show");
            let _ = response.into_ack("package_show");
        }
    }
});
