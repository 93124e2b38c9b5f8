//! # Example: Stream a Block Range
//!
//! Streams a small irreversible block range from a local plaintext endpoint
//! and prints the end-of-run summary. Expects a server on localhost:13042.
use bstream_client::{
    endpoint_uri, ApiKeyCredentials, ConnectOptions, ConsumerConfig, GrpcTransport,
    ResumableConsumer,
};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    const RANGE: &str = "100-200";

    let uri = endpoint_uri("localhost:13042", true)?;
    let config = ConsumerConfig::new(RANGE.parse()?, "");

    let transport = GrpcTransport::new(
        uri,
        ConnectOptions {
            plaintext: true,
            ..Default::default()
        },
    );

    let consumer =
        ResumableConsumer::new(transport, ApiKeyCredentials::optional_from_env(), config);

    let (_shutdown, signal) = watch::channel(false);
    let summary = consumer.run(signal).await?;

    eprintln!("{summary}");

    Ok(())
}
