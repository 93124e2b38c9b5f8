//! Consumer loop scenarios against scripted transports: clean completion,
//! mid-stream drops, resume positioning, retry budgets, fatal errors.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use bstream_client::{
    AuthError, BlockStreamTransport, ClientError, ConsumerConfig, ConsumerError, Credential,
    CredentialProvider, JsonLinesSink, NoCredentials, ResumableConsumer, ResumeStrategy,
};
use bstream_protos::{Block, BlockResponseV2, BlocksRequestV2, ForkStep};
use tokio::sync::watch;
use tonic::Status;

enum Attempt {
    Messages(Vec<Result<BlockResponseV2, Status>>),
    ConnectFailure,
}

/// Transport yielding a pre-scripted stream per connection attempt, and
/// recording every request the consumer sends.
struct ScriptedTransport {
    attempts: VecDeque<Attempt>,
    requests: Arc<Mutex<Vec<BlocksRequestV2>>>,
}

impl ScriptedTransport {
    fn new(attempts: Vec<Attempt>) -> (Self, Arc<Mutex<Vec<BlocksRequestV2>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                attempts: attempts.into(),
                requests: Arc::clone(&requests),
            },
            requests,
        )
    }
}

impl BlockStreamTransport for ScriptedTransport {
    type Stream = tokio_stream::Iter<std::vec::IntoIter<Result<BlockResponseV2, Status>>>;

    async fn open(
        &mut self,
        request: BlocksRequestV2,
        _credential: Option<Credential>,
    ) -> Result<Self::Stream, ClientError> {
        self.requests.lock().unwrap().push(request);

        match self.attempts.pop_front() {
            Some(Attempt::Messages(messages)) => Ok(tokio_stream::iter(messages)),
            Some(Attempt::ConnectFailure) => Err(ClientError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            None => panic!("consumer opened more connection attempts than scripted"),
        }
    }
}

struct FailingCredentials;

impl CredentialProvider for FailingCredentials {
    async fn credential(&mut self) -> Result<Option<Credential>, AuthError> {
        Err(AuthError::MissingApiKey("BSTREAM_API_KEY"))
    }
}

fn block(number: u64) -> Block {
    Block {
        id: format!("{number:08x}aa"),
        number,
        previous_id: format!("{:08x}aa", number - 1),
        timestamp: 1600000000 + number,
        transaction_count: 3,
        payload: vec![0xab; 32],
    }
}

fn response(number: u64) -> Result<BlockResponseV2, Status> {
    Ok(BlockResponseV2 {
        block: Some(block(number).to_any()),
        step: ForkStep::StepIrreversible as i32,
        cursor: format!("cursor-{number}"),
    })
}

fn responses(numbers: impl IntoIterator<Item = u64>) -> Vec<Result<BlockResponseV2, Status>> {
    numbers.into_iter().map(response).collect()
}

/// Config with a zero retry delay so failure scenarios run instantly.
fn fast_config(range: &str) -> ConsumerConfig {
    let mut config = ConsumerConfig::new(range.parse().unwrap(), "");
    config.retry.delay = Duration::ZERO;
    config
}

fn signal() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

#[tokio::test]
async fn clean_run_counts_all_blocks() {
    let (transport, requests) =
        ScriptedTransport::new(vec![Attempt::Messages(responses(100..=104))]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"));
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 5);
    assert_eq!(summary.restart_count, 0);
    assert!(summary.bytes_total > 0);
    assert!(summary.time_to_first_block.is_some());

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].start_block_num, 100);
    assert_eq!(requests[0].stop_block_num, 105);
    assert!(requests[0].start_cursor.is_empty());
}

#[tokio::test]
async fn resumes_after_mid_stream_error() {
    let mut first = responses(100..=102);
    first.push(Err(Status::unavailable("stream reset")));

    let (transport, requests) = ScriptedTransport::new(vec![
        Attempt::Messages(first),
        Attempt::Messages(responses(103..=104)),
    ]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"));
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 5);
    assert_eq!(summary.restart_count, 1);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    // The resumed request starts right after the last processed block and
    // carries its cursor.
    assert_eq!(requests[1].start_block_num, 103);
    assert_eq!(requests[1].start_cursor, "cursor-102");
}

#[tokio::test]
async fn resume_start_never_regresses() {
    let failing_after = |number: u64| {
        let mut messages = responses([number]);
        messages.push(Err(Status::unavailable("stream reset")));
        Attempt::Messages(messages)
    };

    let (transport, requests) = ScriptedTransport::new(vec![
        failing_after(100),
        failing_after(101),
        Attempt::Messages(responses(102..=104)),
    ]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"));
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 5);
    assert_eq!(summary.restart_count, 2);

    let requests = requests.lock().unwrap();
    let starts: Vec<i64> = requests.iter().map(|r| r.start_block_num).collect();
    assert_eq!(starts, vec![100, 101, 102]);
}

#[tokio::test]
async fn premature_end_of_stream_is_retried() {
    let (transport, _requests) = ScriptedTransport::new(vec![
        Attempt::Messages(responses(100..=101)),
        Attempt::Messages(responses(102..=104)),
    ]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"));
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 5);
    assert_eq!(summary.restart_count, 1);
}

#[tokio::test]
async fn open_ended_range_completes_on_clean_end() {
    let (transport, requests) =
        ScriptedTransport::new(vec![Attempt::Messages(responses(100..=101))]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-"));
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 2);
    assert_eq!(summary.restart_count, 0);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].stop_block_num, 0);
}

#[tokio::test]
async fn malformed_payload_is_fatal() {
    let mut messages = responses([100]);
    messages.push(Ok(BlockResponseV2 {
        block: Some(prost_types::Any {
            type_url: bstream_protos::BLOCK_TYPE_URL.to_string(),
            value: vec![0x0a, 0x05],
        }),
        step: ForkStep::StepIrreversible as i32,
        cursor: "cursor-bad".to_string(),
    }));

    let (transport, _requests) = ScriptedTransport::new(vec![Attempt::Messages(messages)]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"));
    let (_hold, shutdown) = signal();

    assert!(matches!(
        consumer.run(shutdown).await,
        Err(ConsumerError::Decode(_))
    ));
}

#[tokio::test]
async fn credential_failure_is_fatal_and_never_connects() {
    let (transport, requests) = ScriptedTransport::new(vec![]);

    let consumer = ResumableConsumer::new(transport, FailingCredentials, fast_config("100-105"));
    let (_hold, shutdown) = signal();

    assert!(matches!(
        consumer.run(shutdown).await,
        Err(ConsumerError::Auth(_))
    ));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn retry_budget_is_honored() {
    let (transport, requests) = ScriptedTransport::new(vec![
        Attempt::ConnectFailure,
        Attempt::ConnectFailure,
        Attempt::ConnectFailure,
    ]);

    let mut config = fast_config("100-105");
    config.retry.max_attempts = Some(2);

    let consumer = ResumableConsumer::new(transport, NoCredentials, config);
    let (_hold, shutdown) = signal();

    assert!(matches!(
        consumer.run(shutdown).await,
        Err(ConsumerError::RetriesExhausted { attempts: 2 })
    ));
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn block_number_resume_omits_cursor() {
    let mut first = responses(100..=102);
    first.push(Err(Status::unavailable("stream reset")));

    let (transport, requests) = ScriptedTransport::new(vec![
        Attempt::Messages(first),
        Attempt::Messages(responses(103..=104)),
    ]);

    let mut config = fast_config("100-105");
    config.resume = ResumeStrategy::BlockNumber;

    let consumer = ResumableConsumer::new(transport, NoCredentials, config);
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 5);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[1].start_block_num, 103);
    assert!(requests[1].start_cursor.is_empty());
}

#[tokio::test]
async fn raised_shutdown_stops_before_connecting() {
    let (transport, requests) = ScriptedTransport::new(vec![]);

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"));
    let (_hold, shutdown) = watch::channel(true);

    let summary = consumer.run(shutdown).await.unwrap();
    assert_eq!(summary.blocks_total, 0);
    assert_eq!(summary.restart_count, 0);
    assert!(summary.time_to_first_block.is_none());
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blocks_are_forwarded_to_the_sink_across_restarts() {
    let mut first = responses(100..=102);
    first.push(Err(Status::unavailable("stream reset")));

    let (transport, _requests) = ScriptedTransport::new(vec![
        Attempt::Messages(first),
        Attempt::Messages(responses(103..=104)),
    ]);

    let dir = tempfile::tempdir().unwrap();
    let destination = dir
        .path()
        .join("blocks-{range}.jsonl")
        .to_string_lossy()
        .into_owned();
    let range = "100-105".parse().unwrap();
    let sink = JsonLinesSink::create(&destination, &range).unwrap();

    let consumer = ResumableConsumer::new(transport, NoCredentials, fast_config("100-105"))
        .with_sink(Box::new(sink));
    let (_hold, shutdown) = signal();
    let summary = consumer.run(shutdown).await.unwrap();

    assert_eq!(summary.blocks_total, 5);

    let written = std::fs::read_to_string(dir.path().join("blocks-100-105.jsonl")).unwrap();
    let numbers: Vec<u64> = written
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["number"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(numbers, vec![100, 101, 102, 103, 104]);
}
