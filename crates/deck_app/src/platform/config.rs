//! Environment-based configuration, mirroring the backend's own variable
//! names: `BACKEND_URL` and `BACKEND_API_KEY`.

use deck_client::ClientSettings;
use deck_logging::deck_info;

/// Loads `.env` (when present) and reads the client settings from the
/// process environment.
pub fn load() -> ClientSettings {
    let _ = dotenvy::dotenv();
    let settings = settings_from(|key| std::env::var(key).ok());
    deck_info!(
        "backend {} ({})",
        settings.base_url,
        if settings.api_key.is_some() {
            "api key configured"
        } else {
            "no api key, auth disabled"
        }
    );
    settings
}

/// An unset or blank key disables authorization entirely, matching the
/// backend's dev posture.
fn settings_from(var: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let defaults = ClientSettings::default();
    let base_url = var("BACKEND_URL")
        .map(|url| url.trim().trim_end_matches('/').to_owned())
        .filter(|url| !url.is_empty())
        .unwrap_or(defaults.base_url);
    let api_key = var("BACKEND_API_KEY")
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty());
    ClientSettings {
        base_url,
        api_key,
        ..defaults
    }
}
