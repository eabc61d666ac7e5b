use crate::api::parse_base;
use crate::config;

/// Load settings, falling back to defaults when the config is unusable.
///
/// Logging is not set up yet at this point, so problems are handed back as
/// warnings for the caller to log. `base_url` (first CLI argument) overrides
/// `server.base_url`; an unusable override is dropped on its own.
pub fn load_settings(base_url: Option<String>) -> (config::Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let loaded = config::Settings::load().map_err(|e| e.to_string());
    let mut settings = apply_loaded(loaded, &mut warnings);

    if let Some(url) = base_url {
        apply_base_url(&mut settings, url, &mut warnings);
    }

    (settings, warnings)
}

fn apply_base_url(settings: &mut config::Settings, url: String, warnings: &mut Vec<String>) {
    match parse_base(&url) {
        Ok(_) => settings.server.base_url = url,
        Err(e) => warnings.push(format!("ignoring base url argument: {e}")),
    }
}

fn apply_loaded(
    loaded: Result<config::Settings, String>,
    warnings: &mut Vec<String>,
) -> config::Settings {
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => s,
            Err(msg) => {
                warnings.push(format!("invalid config, using defaults: {msg}"));
                config::Settings::default()
            }
        },
        Err(e) => {
            warnings.push(format!("failed to load config, using defaults: {e}"));
            config::Settings::default()
        }
    }
}
