use crate::domain::model::VersioningStatus;
use crate::domain::ports::VersioningStore;
use crate::utils::error::{GuardError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types::{BucketVersioningStatus, VersioningConfiguration};
use aws_sdk_s3::Client as S3Client;

/// Builds an S3 client from the default provider chain.
///
/// `region` overrides whatever the chain resolves. `endpoint` points the
/// client at an S3-compatible service and switches to path-style addressing.
pub async fn build_s3_client(region: Option<&str>, endpoint: Option<&str>) -> S3Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    let shared_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
    if let Some(endpoint) = endpoint {
        tracing::debug!("Using custom S3 endpoint {}", endpoint);
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    S3Client::from_conf(builder.build())
}

#[derive(Debug, Clone)]
pub struct S3VersioningStore {
    client: S3Client,
}

impl S3VersioningStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

impl VersioningStore for S3VersioningStore {
    async fn versioning_status(&self, bucket: &str) -> Result<VersioningStatus> {
        let output = self
            .client
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| s3_error("GetBucketVersioning", bucket, e))?;

        let status = versioning_status_from(output.status());
        tracing::debug!("Bucket {} versioning status: {}", bucket, status);
        Ok(status)
    }

    async fn enable_versioning(&self, bucket: &str) -> Result<()> {
        let configuration = VersioningConfiguration::builder()
            .status(BucketVersioningStatus::Enabled)
            .build();

        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(configuration)
            .send()
            .await
            .map_err(|e| s3_error("PutBucketVersioning", bucket, e))?;

        tracing::debug!("Versioning enabled on bucket {}", bucket);
        Ok(())
    }
}

/// Maps the SDK status onto the compliance model. Anything but `Enabled`
/// is non-compliant; a missing status means versioning was never configured.
fn versioning_status_from(status: Option<&BucketVersioningStatus>) -> VersioningStatus {
    match status {
        Some(BucketVersioningStatus::Enabled) => VersioningStatus::Enabled,
        Some(BucketVersioningStatus::Suspended) => VersioningStatus::Suspended,
        Some(other) => {
            tracing::warn!("Unrecognised versioning status {:?}", other.as_str());
            VersioningStatus::Suspended
        }
        None => VersioningStatus::Unversioned,
    }
}

fn s3_error<E>(operation: &'static str, bucket: &str, err: E) -> GuardError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = match err.code() {
        Some(code) => format!("{} ({})", DisplayErrorContext(&err), code),
        None => DisplayErrorContext(&err).to_string(),
    };

    GuardError::S3 {
        operation,
        bucket: bucket.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::put_bucket_versioning::PutBucketVersioningError;

    #[test]
    fn test_versioning_status_mapping() {
        assert_eq!(
            versioning_status_from(Some(&BucketVersioningStatus::Enabled)),
            VersioningStatus::Enabled
        );
        assert_eq!(
            versioning_status_from(Some(&BucketVersioningStatus::Suspended)),
            VersioningStatus::Suspended
        );
        assert_eq!(versioning_status_from(None), VersioningStatus::Unversioned);

        let unknown = BucketVersioningStatus::from("Paused");
        let mapped = versioning_status_from(Some(&unknown));
        assert_eq!(mapped, VersioningStatus::Suspended);
        assert!(!mapped.is_compliant());
    }

    #[test]
    fn test_s3_error_includes_service_code() {
        let service_error = PutBucketVersioningError::generic(
            ErrorMetadata::builder()
                .code("AccessDenied")
                .message("Access Denied")
                .build(),
        );

        match s3_error("PutBucketVersioning", "audit-trail", service_error) {
            GuardError::S3 {
                operation,
                bucket,
                message,
            } => {
                assert_eq!(operation, "PutBucketVersioning");
                assert_eq!(bucket, "audit-trail");
                assert!(message.ends_with("(AccessDenied)"));
            }
            other => panic!("expected S3 error, got {:?}", other),
        }
    }

    #[test]
    fn test_s3_error_without_code() {
        let service_error = || {
            PutBucketVersioningError::generic(
                ErrorMetadata::builder().message("connection reset").build(),
            )
        };

        match s3_error("GetBucketVersioning", "audit-trail", service_error()) {
            GuardError::S3 { message, .. } => {
                assert_eq!(message, DisplayErrorContext(&service_error()).to_string());
            }
            other => panic!("expected S3 error, got {:?}", other),
        }
    }
}
