use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::Instrument;
use versioning_guard::config::settings::{REGION_VAR, S3_ENDPOINT_VAR};
use versioning_guard::utils::logger;
use versioning_guard::{build_s3_client, dispatch, GuardConfig, HandlerOutcome, S3VersioningStore};

async fn function_handler(
    event: LambdaEvent<Value>,
    store: &S3VersioningStore,
    http_client: &reqwest::Client,
) -> Result<HandlerOutcome, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);

    // Read per invocation so a fixed environment takes effect without a cold start.
    let config = GuardConfig::from_env();

    let outcome = dispatch(config, store.clone(), http_client.clone(), event.payload)
        .instrument(span)
        .await;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let non_blank = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
    let region = non_blank(REGION_VAR);
    let endpoint = non_blank(S3_ENDPOINT_VAR);
    let s3_client = build_s3_client(region.as_deref(), endpoint.as_deref()).await;
    let store = S3VersioningStore::new(s3_client);
    let http_client = reqwest::Client::new();

    run(service_fn(|event| function_handler(event, &store, &http_client))).await
}
