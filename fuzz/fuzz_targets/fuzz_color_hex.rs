#![no_main]
use libfuzzer_sys::fuzz_target;
use prtlog::Color;

fuzz_target!(|data: &str| {
    // Must not panic on non-ASCII or short input
    let _ = Color::from_hex(data);
});
