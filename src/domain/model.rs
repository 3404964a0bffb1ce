use crate::utils::error::{GuardError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A CloudTrail bucket configuration change as delivered by EventBridge.
///
/// Only `detail.userIdentity.type`, `detail.sourceIPAddress` and
/// `detail.requestParameters.bucketName` are required. The envelope fields
/// are only logged: absent or oddly typed values read as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigChangeEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<String>,
    pub detail: EventDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub event_name: Option<String>,
    pub user_identity: UserIdentity,
    #[serde(rename = "sourceIPAddress")]
    pub source_ip_address: String,
    pub request_parameters: RequestParameters,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdentity {
    #[serde(rename = "type")]
    pub identity_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    pub bucket_name: String,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl ConfigChangeEvent {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let event: Self =
            serde_json::from_value(value).map_err(|e| GuardError::malformed(e.to_string()))?;

        validate_non_empty_string(
            "detail.requestParameters.bucketName",
            &event.detail.request_parameters.bucket_name,
        )
        .map_err(|e| GuardError::malformed(e.to_string()))?;

        Ok(event)
    }

    pub fn bucket_name(&self) -> &str {
        &self.detail.request_parameters.bucket_name
    }

    pub fn actor(&self) -> &str {
        &self.detail.user_identity.identity_type
    }

    pub fn source_ip(&self) -> &str {
        &self.detail.source_ip_address
    }

    pub fn event_name(&self) -> Option<&str> {
        self.detail.event_name.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersioningStatus {
    Enabled,
    Suspended,
    /// Versioning has never been configured on the bucket.
    Unversioned,
}

impl VersioningStatus {
    pub fn is_compliant(self) -> bool {
        self == VersioningStatus::Enabled
    }
}

impl std::fmt::Display for VersioningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersioningStatus::Enabled => write!(f, "Enabled"),
            VersioningStatus::Suspended => write!(f, "Suspended"),
            VersioningStatus::Unversioned => write!(f, "Unversioned"),
        }
    }
}

/// What the chat-ops channel is told after a remediation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub bucket: String,
    pub actor: String,
    pub source_ip: String,
    pub event_name: Option<String>,
}

impl Incident {
    pub fn from_event(event: &ConfigChangeEvent) -> Self {
        Self {
            bucket: event.bucket_name().to_string(),
            actor: event.actor().to_string(),
            source_ip: event.source_ip().to_string(),
            event_name: event.event_name().map(str::to_string),
        }
    }

    pub fn message(&self) -> String {
        let mut lines = vec![
            "🚨 SECURITY INCIDENT AUTO-RESOLVED 🚨".to_string(),
            format!("• Target: {}", self.bucket),
            format!("• User: {}", self.actor),
            format!("• IP: {}", self.source_ip),
        ];
        if let Some(event_name) = &self.event_name {
            lines.push(format!("• Trigger: {}", event_name));
        }
        lines.push("• Action: Versioning enabled by SecurityBot.".to_string());
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub message: String,
}

impl From<&Incident> for WebhookPayload {
    fn from(incident: &Incident) -> Self {
        Self {
            message: incident.message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Compliant { bucket: String },
    Remediated { bucket: String, webhook_status: u16 },
}

/// The value returned to the invoker. Serializes to the same shapes the
/// chat-ops runbooks already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HandlerOutcome {
    Safe(String),
    Remediated { status: String, webhook_status: u16 },
    Failed { error: String },
}

impl HandlerOutcome {
    pub fn failed(error: &GuardError) -> Self {
        HandlerOutcome::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, HandlerOutcome::Failed { .. })
    }
}

impl From<Verdict> for HandlerOutcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Compliant { bucket } => {
                HandlerOutcome::Safe(format!("[SAFE] Bucket {} is compliant.", bucket))
            }
            Verdict::Remediated { webhook_status, .. } => HandlerOutcome::Remediated {
                status: "Remediation Successful".to_string(),
                webhook_status,
            },
        }
    }
}
