use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context;
use bstream_client::{
    endpoint_uri, ApiKeyCredentials, BlockRange, ConnectOptions, ConsumerConfig, DetailLevel,
    ForkMode, GrpcTransport, JsonLinesSink, ResumableConsumer, ResumeStrategy, RetryPolicy,
    Summary,
};
use clap::Parser;
use tokio::sync::watch;
use tracing::{error, level_filters::LevelFilter, subscriber::set_global_default};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Streams a range of blocks from a Firehose-style endpoint and prints
/// consumption stats: time to first block, bytes received, throughput.
/// Reconnects and resumes from the last received position on stream drops.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Endpoint to stream from, e.g. mainnet.example.com:443
    endpoint: String,

    /// Server-side CEL inclusion filter expression
    filter: String,

    /// Block range of the form <start>-<stop>; a trailing '-' streams
    /// forever (spaces are accepted anywhere)
    range: BlockRange,

    /// Talk over a plain-text unencrypted connection
    #[clap(short = 'i', long)]
    plaintext: bool,

    /// Trust only this PEM certificate, for endpoints with self-signed
    /// certificates
    #[clap(long)]
    ca_cert: Option<PathBuf>,

    /// Stream full blocks including all trace fields; the default is light
    /// blocks carrying only ids, numbers, inputs and outputs
    #[clap(short, long)]
    full: bool,

    /// Stream live head blocks as new/undo steps instead of irreversible
    /// blocks only
    #[clap(short, long)]
    live: bool,

    /// Write each block as one JSON line to this file; '-' writes to
    /// standard output and '{range}' is replaced by the block range
    #[clap(short, long)]
    output: Option<String>,

    /// Resume after a disconnect by block number only instead of by the
    /// server's opaque cursor
    #[clap(long)]
    resume_by_block_number: bool,

    /// Seconds to wait between reconnect attempts
    #[clap(long, default_value_t = 5)]
    retry_delay: u64,

    /// Give up after this many reconnect attempts; unlimited when unset
    #[clap(long)]
    max_attempts: Option<u32>,

    /// Multiply the retry delay by this factor after every attempt
    #[clap(long)]
    backoff: Option<f64>,

    /// Do not require BSTREAM_API_KEY; attach it only when present
    #[clap(long)]
    no_auth: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(summary) => {
            eprintln!("\n{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("stream failed: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    set_global_default(FmtSubscriber::builder().with_env_filter(filter).finish())
        .expect("Failed to set up the global default subscriber for logging");
}

async fn run() -> anyhow::Result<Summary> {
    let cli = Cli::parse();

    let uri = endpoint_uri(&cli.endpoint, cli.plaintext)
        .with_context(|| format!("invalid endpoint {:?}", cli.endpoint))?;

    let mut config = ConsumerConfig::new(cli.range, cli.filter.clone());
    config.fork_mode = if cli.live {
        ForkMode::Live
    } else {
        ForkMode::IrreversibleOnly
    };
    config.details = if cli.full {
        DetailLevel::Full
    } else {
        DetailLevel::Light
    };
    config.resume = if cli.resume_by_block_number {
        ResumeStrategy::BlockNumber
    } else {
        ResumeStrategy::Cursor
    };
    config.retry = RetryPolicy {
        delay: Duration::from_secs(cli.retry_delay),
        max_attempts: cli.max_attempts,
        backoff: cli.backoff,
    };

    let transport = GrpcTransport::new(
        uri,
        ConnectOptions {
            plaintext: cli.plaintext,
            ca_certificate: cli.ca_cert.clone(),
        },
    );

    let credentials = if cli.no_auth {
        ApiKeyCredentials::optional_from_env()
    } else {
        ApiKeyCredentials::from_env()
    };

    let mut consumer = ResumableConsumer::new(transport, credentials, config);
    if let Some(output) = &cli.output {
        let sink = JsonLinesSink::create(output, &cli.range)
            .with_context(|| format!("unable to open output {output:?}"))?;
        consumer = consumer.with_sink(Box::new(sink));
    }

    let (shutdown, signal) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(true);
        }
    });

    let summary = consumer.run(signal).await?;
    Ok(summary)
}
