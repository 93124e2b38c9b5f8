use std::future::Future;

use bstream_protos::{BlockResponseV2, BlockStreamV2Client, BlocksRequestV2};
use futures::Stream;
use tonic::{codec::Streaming, transport::Channel, Status};

use crate::{
    auth::Credential,
    client::{build_and_connect_channel, ConnectOptions},
    error::ClientError,
};

/// Seam between the consumer loop and the remote streaming service: one
/// operation, opening a stream of response envelopes for a request.
pub trait BlockStreamTransport {
    type Stream: Stream<Item = Result<BlockResponseV2, Status>> + Unpin;

    fn open(
        &mut self,
        request: BlocksRequestV2,
        credential: Option<Credential>,
    ) -> impl Future<Output = Result<Self::Stream, ClientError>>;
}

/// gRPC-backed transport. The channel is established lazily on the first
/// open and reused across reconnect attempts.
pub struct GrpcTransport {
    uri: tonic::transport::Uri,
    options: ConnectOptions,
    client: Option<BlockStreamV2Client<Channel>>,
}

impl GrpcTransport {
    pub fn new(uri: tonic::transport::Uri, options: ConnectOptions) -> Self {
        Self {
            uri,
            options,
            client: None,
        }
    }

    async fn client(&mut self) -> Result<&mut BlockStreamV2Client<Channel>, ClientError> {
        if self.client.is_none() {
            let channel = build_and_connect_channel(self.uri.clone(), &self.options).await?;
            self.client = Some(BlockStreamV2Client::new(channel));
        }

        match self.client.as_mut() {
            Some(client) => Ok(client),
            None => unreachable!("client was just connected"),
        }
    }
}

impl BlockStreamTransport for GrpcTransport {
    type Stream = Streaming<BlockResponseV2>;

    async fn open(
        &mut self,
        request: BlocksRequestV2,
        credential: Option<Credential>,
    ) -> Result<Self::Stream, ClientError> {
        let client = self.client().await?;

        let mut request = tonic::Request::new(request);
        if let Some(credential) = &credential {
            credential.apply(&mut request);
        }

        Ok(client.blocks(request).await?.into_inner())
    }
}
