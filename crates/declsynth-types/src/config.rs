//! Environment configuration.
//!
//! Scanner and synthesizer options read their defaults from these variables;
//! command line flags take precedence over them.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `DECLSYNTH_ONLY_EXPORTED` | scan exported declarations only |
//! | `DECLSYNTH_STRICT_TYPES` | argument type mismatches abort the action |
//! | `DECLSYNTH_LOG` | log filter for the CLI |

pub const ONLY_EXPORTED_ENV: &str = "DECLSYNTH_ONLY_EXPORTED";
pub const STRICT_TYPES_ENV: &str = "DECLSYNTH_STRICT_TYPES";
pub const LOG_ENV: &str = "DECLSYNTH_LOG";

/// Whether `value` is one of `1`, `true`, `yes`, `on` (case-insensitive).
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Truthiness of an environment variable, `default` when unset.
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => is_truthy(&v),
        None => default,
    }
}

pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Log filter directives for the CLI: `debug` when verbose, else the
/// configured filter, else `warn`.
pub fn log_directives(verbose: bool, configured: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    configured.unwrap_or_else(|| "warn".to_string())
}
