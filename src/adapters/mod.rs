// Adapters layer: concrete implementations of the domain ports.

pub mod s3;
pub mod webhook;

pub use s3::{build_s3_client, S3VersioningStore};
pub use webhook::WebhookNotifier;
