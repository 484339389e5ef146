use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Recipe generator: "template" or "remote"
    #[arg(long, env = "RECIPE_GENERATOR")]
    pub generator: Option<String>,

    /// Base URL of the remote recipe backend
    #[arg(long, env = "RECIPE_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Simulated generation latency in milliseconds
    #[arg(long, env = "SIMULATED_DELAY_MS")]
    pub simulated_delay_ms: Option<u64>,

    /// Favorites storage file
    #[arg(long, env = "FAVORITES_PATH")]
    pub favorites_path: Option<String>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    pub favorites: FavoritesConfig,
    pub sessions: SessionConfig,
    pub resilience: ResilienceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// "template" (local synthesis) or "remote".
    pub provider: String,
    pub simulated_delay_ms: u64,
    /// Recipes asked for per generation; generators cap this at 5.
    pub max_recipes: usize,
    /// Fixes the template generator's random stream.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Remote backend base URL (required for "remote").
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl GenerationConfig {
    #[must_use]
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FavoritesConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("generation.provider", "template")?
            .set_default("generation.simulated_delay_ms", 2000)?
            .set_default("generation.max_recipes", 5)?
            .set_default("generation.timeout_secs", 30)?
            .set_default("favorites.path", "data/storage.json")?
            .set_default("sessions.idle_timeout_secs", 30 * 60)?
            .set_default("sessions.cleanup_interval_secs", 5 * 60)?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.request_timeout_secs", 30)?;

        // 2. Config file: explicit path, else ./config.yaml when present
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config.yaml"));
        }

        // 3. Environment variables (prefixed with PANTRY_)
        // E.g. PANTRY_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("PANTRY")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (clap also fills these from their own env vars)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(generator) = cli.generator {
            builder = builder.set_override("generation.provider", generator)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("generation.base_url", url)?;
        }
        if let Some(delay) = cli.simulated_delay_ms {
            builder = builder.set_override("generation.simulated_delay_ms", delay)?;
        }
        if let Some(path) = cli.favorites_path {
            builder = builder.set_override("favorites.path", path)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_defaults() {
        let config = AppConfig::load_from_args([
            "pantry-chef",
            "--port",
            "4100",
            "--generator",
            "remote",
            "--backend-url",
            "http://127.0.0.1:9000",
            "--simulated-delay-ms",
            "0",
        ])
        .unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.generation.provider, "remote");
        assert_eq!(
            config.generation.base_url.as_deref(),
            Some("http://127.0.0.1:9000")
        );
        assert_eq!(config.generation.simulated_delay(), Duration::ZERO);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let result = AppConfig::load_from_args(["pantry-chef", "--no-such-flag"]);
        assert!(result.is_err());
    }
}
