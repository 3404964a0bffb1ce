pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_s3_client, S3VersioningStore, WebhookNotifier};
pub use config::GuardConfig;
pub use crate::core::remediation::{dispatch, replay, Remediator};
pub use domain::model::HandlerOutcome;
pub use utils::error::{GuardError, Result};
