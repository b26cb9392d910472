#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Fuzz TOML parsing of Config and ensure it never panics and rejects
    // invalid input gracefully. Parse and validation errors are acceptable.
    let parsed = toml::from_str::<dimmer_config::Config>(data);
    if let Ok(cfg) = parsed {
        // Ensure validate() does not panic
        let _ = cfg.validate();
    }
});
