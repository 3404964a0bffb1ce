pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::GuardConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "versioning-guard")]
#[command(about = "Replay a bucket change event and enforce object versioning")]
pub struct CliConfig {
    #[arg(long, help = "Path to a CloudTrail event JSON file")]
    pub event: String,

    #[arg(long, help = "TOML settings file (takes precedence over --webhook-url)")]
    pub config: Option<String>,

    #[arg(long, env = "N8N_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    #[arg(long, help = "AWS region override")]
    pub region: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Resolves the settings for this run. A missing webhook URL comes back
    /// as an error so the handler can report it the same way Lambda does.
    pub fn guard_config(&self) -> crate::utils::error::Result<GuardConfig> {
        use crate::utils::validation::{validate_required_field, Validate};

        let mut config = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?,
            None => {
                let url = validate_required_field(settings::WEBHOOK_URL_VAR, &self.webhook_url)?;
                GuardConfig::new(url.trim())
            }
        };

        if let Some(region) = &self.region {
            config.region = Some(region.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args() {
        let cli = CliConfig::parse_from([
            "versioning-guard",
            "--event",
            "event.json",
            "--webhook-url",
            "https://hooks.example.com/a",
            "--region",
            "us-west-2",
        ]);

        let config = cli.guard_config().unwrap();
        assert_eq!(config.webhook_url, "https://hooks.example.com/a");
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn test_cli_without_webhook() {
        let cli = CliConfig {
            event: "event.json".to_string(),
            config: None,
            webhook_url: None,
            region: None,
            verbose: false,
        };

        let err = cli.guard_config().unwrap_err();
        assert_eq!(
            err.to_string(),
            "N8N_WEBHOOK_URL not set in environment variables."
        );
    }
}
