use crate::config::settings::GuardConfig;
use crate::utils::error::{GuardError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// On-disk form of the guard settings, used by the CLI.
///
/// ```toml
/// [guard]
/// webhook_url = "${N8N_WEBHOOK_URL}"
/// region = "eu-west-1"
/// webhook_timeout_secs = 15
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub guard: GuardConfig,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<GuardConfig> {
        let content = std::fs::read_to_string(&path).map_err(GuardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<GuardConfig> {
        let processed_content = substitute_env_vars(content);

        let parsed: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| GuardError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        parsed.guard.validate()?;
        Ok(parsed.guard)
    }
}

/// Replaces `${VAR}` with the environment value. Unknown variables are left as is.
fn substitute_env_vars(content: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_toml_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[guard]
webhook_url = "https://n8n.example.com/webhook/security"
region = "ap-southeast-2"
"#,
        )
        .unwrap();

        assert_eq!(config.webhook_url, "https://n8n.example.com/webhook/security");
        assert_eq!(config.region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(config.webhook_timeout_secs, 10);
        assert!(config.s3_endpoint.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GUARD_TEST_WEBHOOK", "https://substituted.example.com/hook");

        let config = TomlConfig::from_toml_str(
            r#"
[guard]
webhook_url = "${GUARD_TEST_WEBHOOK}"
"#,
        )
        .unwrap();

        assert_eq!(config.webhook_url, "https://substituted.example.com/hook");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let result = TomlConfig::from_toml_str(
            r#"
[guard]
webhook_url = "${GUARD_TEST_UNSET_WEBHOOK_VARIABLE}"
"#,
        );

        assert!(matches!(
            result,
            Err(GuardError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[guard]\nwebhook_url = \"http://localhost:5678/webhook\"\nwebhook_timeout_secs = 3"
        )
        .unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.webhook_timeout_secs, 3);
    }

    #[test]
    fn test_missing_section() {
        let result = TomlConfig::from_toml_str("webhook_url = \"https://example.com\"");
        assert!(matches!(result, Err(GuardError::ConfigError { .. })));
    }
}
