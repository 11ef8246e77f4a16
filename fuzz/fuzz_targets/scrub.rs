#![no_main]

use libfuzzer_sys::fuzz_target;
use huntgen::frontend::{discovery, scrubber};
use huntgen::RunnerConfig;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the scrubber and splitter
        let scrubbed = scrubber::scrub(s);
        let _ = scrubber::logical_lines(&scrubbed);
        // If that held, fuzz discovery end to end
        let _ = discovery::discover_tests(s, &RunnerConfig::default());
    }
});
