use crate::adapters::{build_s3_client, S3VersioningStore, WebhookNotifier};
use crate::config::GuardConfig;
use crate::core::{
    ConfigChangeEvent, HandlerOutcome, Incident, Notifier, Verdict, VersioningStore,
};
use crate::utils::error::Result;
use reqwest::Client;

/// Enforces object versioning on the bucket named by a change event.
pub struct Remediator<S: VersioningStore, N: Notifier> {
    store: S,
    notifier: N,
}

impl<S: VersioningStore, N: Notifier> Remediator<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Runs one event through the guard. Errors never escape: they are
    /// logged and reported in the returned outcome.
    pub async fn handle(&self, payload: serde_json::Value) -> HandlerOutcome {
        let result = match ConfigChangeEvent::from_value(payload) {
            Ok(event) => self.evaluate(&event).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(verdict) => verdict.into(),
            Err(e) => {
                tracing::error!("Error: {} (category: {:?})", e, e.category());
                HandlerOutcome::failed(&e)
            }
        }
    }

    pub async fn evaluate(&self, event: &ConfigChangeEvent) -> Result<Verdict> {
        let bucket = event.bucket_name();
        tracing::info!(
            "Checking bucket {} (event: {}, id: {}, region: {}, at: {})",
            bucket,
            event.event_name().unwrap_or("unknown"),
            event.id.as_deref().unwrap_or("-"),
            event.region.as_deref().unwrap_or("-"),
            event
                .time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string())
        );

        let status = self.store.versioning_status(bucket).await?;
        if status.is_compliant() {
            tracing::info!("[SAFE] Bucket {} is compliant.", bucket);
            return Ok(Verdict::Compliant {
                bucket: bucket.to_string(),
            });
        }

        tracing::warn!(
            "[RISK] Bucket {} unversioned ({}). Enabling now...",
            bucket,
            status
        );
        self.store.enable_versioning(bucket).await?;

        let incident = Incident::from_event(event);
        let webhook_status = self.notifier.notify(&incident).await?;
        tracing::info!(
            "Remediated bucket {} changed by {} from {}; webhook answered {}",
            bucket,
            incident.actor,
            incident.source_ip,
            webhook_status
        );

        Ok(Verdict::Remediated {
            bucket: bucket.to_string(),
            webhook_status,
        })
    }
}

/// Top-level entry shared by the Lambda and CLI binaries.
///
/// A configuration error is reported before the store or the webhook is
/// touched.
pub async fn dispatch<S: VersioningStore>(
    config: Result<GuardConfig>,
    store: S,
    http_client: Client,
    payload: serde_json::Value,
) -> HandlerOutcome {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return HandlerOutcome::failed(&e);
        }
    };

    let notifier = WebhookNotifier::new(
        http_client,
        config.webhook_url.clone(),
        config.webhook_timeout(),
    );
    Remediator::new(store, notifier).handle(payload).await
}

/// Local replay against real S3. The AWS provider chain is only consulted
/// once the settings are known to be valid.
pub async fn replay(
    config: Result<GuardConfig>,
    payload: serde_json::Value,
) -> HandlerOutcome {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            return HandlerOutcome::failed(&e);
        }
    };

    let s3_client =
        build_s3_client(config.region.as_deref(), config.s3_endpoint.as_deref()).await;
    dispatch(
        Ok(config),
        S3VersioningStore::new(s3_client),
        Client::new(),
        payload,
    )
    .await
}
