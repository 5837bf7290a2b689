#![no_main]
use libfuzzer_sys::fuzz_target;
use prtlog::Severity;

fuzz_target!(|data: &str| {
    // Must not panic; anything that parses must survive a display round trip
    if let Ok(severity) = data.parse::<Severity>() {
        let shown = severity.to_string();
        assert_eq!(shown.parse::<Severity>().ok(), Some(severity));
    }
});
