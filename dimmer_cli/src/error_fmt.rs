//! Human-readable error descriptions and structured JSON error formatting.

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use dimmer_core::BuildError;
    use dimmer_hardware::HwError;

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingTrigger => {
                "What happened: No trigger line was provided to the dimmer.\nLikely causes: GPIO output failed to initialize or was not wired into the builder.\nHow to fix: Check pins.triac_trigger in the config and GPIO permissions.".to_string()
            }
            BuildError::MissingTimer => {
                "What happened: No one-shot timer was provided to the dimmer.\nLikely causes: The timer backend failed to start or was not wired into the builder.\nHow to fix: Ensure the timer is created successfully and passed via with_timer(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See README for a sample."
            ),
        };
    }

    if let Some(he) = err.downcast_ref::<HwError>() {
        return match he {
            HwError::Gpio(msg) => format!(
                "What happened: GPIO access failed ({msg}).\nLikely causes: Wrong pin numbers, missing /dev/gpiomem permissions, or not running on a Pi.\nHow to fix: Check [pins] in the config; ensure the process may access GPIO, or run without the hardware feature."
            ),
            HwError::Io(e) => format!(
                "What happened: I/O error ({e}).\nHow to fix: Re-run with --log-level=debug for details."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("timing.") || lower.contains("power.") || lower.contains("demo.") {
        return format!(
            "What happened: Configuration is invalid.\nDetail: {msg}\nHow to fix: Edit the TOML config and try again."
        );
    }

    if lower.contains("no such file") || lower.contains("failed to read config") {
        return format!(
            "What happened: The config file could not be read.\nDetail: {msg}\nHow to fix: Pass --config <FILE> or create etc/dimmer.toml."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 2 for configuration problems, 3 for hardware init, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use dimmer_core::BuildError;
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidConfig(_) => 2,
            BuildError::MissingTrigger | BuildError::MissingTimer => 3,
        };
    }
    if err.downcast_ref::<dimmer_hardware::HwError>().is_some() {
        return 3;
    }
    let lower = err.to_string().to_ascii_lowercase();
    if lower.contains("timing.")
        || lower.contains("power.")
        || lower.contains("demo.")
        || lower.contains("config")
    {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = if err.downcast_ref::<dimmer_core::BuildError>().is_some() {
        "BuildError"
    } else if err.downcast_ref::<dimmer_hardware::HwError>().is_some() {
        "HwError"
    } else {
        "Error"
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
