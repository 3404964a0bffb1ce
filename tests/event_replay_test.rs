use anyhow::Result;
use httpmock::prelude::*;
use tempfile::TempDir;
use versioning_guard::config::cli::read_event_file;
use versioning_guard::config::toml_config::TomlConfig;
use versioning_guard::core::{ConfigChangeEvent, Incident};
use versioning_guard::domain::ports::Notifier;
use versioning_guard::WebhookNotifier;

/// A saved event plus a TOML settings file drive a single notification.
#[tokio::test]
async fn test_replay_saved_event_through_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hooks/guard")
            .body_contains("Target: legacy-exports");
        then.status(202);
    });

    let config_path = temp_dir.path().join("guard.toml");
    tokio::fs::write(
        &config_path,
        format!(
            "[guard]\nwebhook_url = \"{}\"\nwebhook_timeout_secs = 5\n",
            server.url("/hooks/guard")
        ),
    )
    .await?;

    let event_path = temp_dir.path().join("event.json");
    tokio::fs::write(
        &event_path,
        r#"{
            "detail": {
                "userIdentity": {"type": "Root"},
                "sourceIPAddress": "192.0.2.200",
                "requestParameters": {"bucketName": "legacy-exports"}
            }
        }"#,
    )
    .await?;

    let config = TomlConfig::from_file(&config_path)?;
    let payload = read_event_file(event_path.to_str().unwrap())?;
    let event = ConfigChangeEvent::from_value(payload)?;

    let notifier = WebhookNotifier::new(
        reqwest::Client::new(),
        config.webhook_url.clone(),
        config.webhook_timeout(),
    );
    let status = notifier.notify(&Incident::from_event(&event)).await?;

    hook.assert();
    assert_eq!(status, 202);
    Ok(())
}
