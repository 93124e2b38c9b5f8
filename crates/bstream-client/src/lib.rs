//! # Resumable Block-Stream Client
//!
//! Client for Firehose-style block-streaming gRPC endpoints: opens one
//! stream over a block range with a server-side filter expression, decodes
//! each received block, and transparently reconnects from the last
//! acknowledged position whenever the stream drops before the range is
//! covered.
//!
//! ## Streaming a range of blocks
//!
//! ```no_run
//! # use bstream_client::{
//! #     ApiKeyCredentials, BlockRange, ConnectOptions, ConsumerConfig, GrpcTransport,
//! #     ResumableConsumer,
//! # };
//! # use tokio::sync::watch;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let range: BlockRange = "150000000-150010000".parse()?;
//! let config = ConsumerConfig::new(range, r#"action == "transfer""#);
//!
//! let transport = GrpcTransport::new(
//!     "https://mainnet.example.com:443".parse()?,
//!     ConnectOptions::default(),
//! );
//!
//! let consumer = ResumableConsumer::new(transport, ApiKeyCredentials::from_env(), config);
//!
//! let (_shutdown, signal) = watch::channel(false);
//! let summary = consumer.run(signal).await?;
//! eprintln!("{summary}");
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod consumer;
mod error;
mod range;
mod sink;
mod stats;
mod tls;
mod transport;

pub use auth::{ApiKeyCredentials, Credential, CredentialProvider, NoCredentials, API_KEY_ENV_VAR};
pub use client::{build_and_connect_channel, endpoint_uri, ConnectOptions};
pub use config::{
    ConsumerConfig, DetailLevel, ForkMode, ResumeStrategy, RetryPolicy, DEFAULT_RETRY_DELAY,
    DEFAULT_STATUS_INTERVAL,
};
pub use consumer::ResumableConsumer;
pub use error::{AuthError, ClientError, ConsumerError, SinkError};
pub use range::{BlockRange, RangeError};
pub use sink::{BlockSink, JsonLinesSink};
pub use stats::{RateCounter, SessionStats, Summary};
pub use transport::{BlockStreamTransport, GrpcTransport};
