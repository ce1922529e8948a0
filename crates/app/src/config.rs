//! Client configuration.

use std::path::PathBuf;

use clap::Parser;

/// Commerce client configuration, from CLI arguments and environment.
#[derive(Debug, Parser)]
#[command(name = "kiosk", about = "Headless kiosk commerce client", long_about = None)]
pub struct AppConfig {
    /// Remote API base URL.
    #[arg(long, env = "KIOSK_API_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub api_base_url: String,

    /// Path of the local state file (session, tokens, baskets).
    #[arg(long, env = "KIOSK_STATE_PATH", default_value = "kiosk-state.json")]
    pub state_path: PathBuf,

    /// Log filter (trace, debug, info, warn, error).
    #[arg(short, long, env = "KIOSK_LOG", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let config = AppConfig::parse_from(["kiosk"]);

        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.state_path, PathBuf::from("kiosk-state.json"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::parse_from([
            "kiosk",
            "--api-base-url",
            "https://api.example.test",
            "--state-path",
            "/tmp/kiosk.json",
        ]);

        assert_eq!(config.api_base_url, "https://api.example.test");
        assert_eq!(config.state_path, PathBuf::from("/tmp/kiosk.json"));
    }
}
