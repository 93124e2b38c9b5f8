use std::path::PathBuf;

use tonic::transport::{Channel, Uri};

use crate::{error::ClientError, tls};

/// How the underlying gRPC channel should be established.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Talk over a plain-text unencrypted connection.
    pub plaintext: bool,
    /// Trust only this PEM certificate instead of the native roots, for
    /// endpoints running with self-signed certificates.
    pub ca_certificate: Option<PathBuf>,
}

pub async fn build_and_connect_channel(
    uri: Uri,
    options: &ConnectOptions,
) -> Result<Channel, ClientError> {
    if options.plaintext || uri.scheme_str() != Some("https") {
        return Ok(Channel::builder(uri).connect().await?);
    }

    let config = match &options.ca_certificate {
        Some(path) => {
            let pem = std::fs::read(path)?;
            tls::config_with_ca(&pem)
        }
        None => tls::config().clone(),
    };

    Ok(Channel::builder(uri).tls_config(config)?.connect().await?)
}

/// Turn a CLI endpoint argument into a full URI, defaulting the scheme when
/// only `host:port` was given.
pub fn endpoint_uri(endpoint: &str, plaintext: bool) -> Result<Uri, ClientError> {
    let uri = if endpoint.contains("://") {
        endpoint.parse::<Uri>()?
    } else if plaintext {
        format!("http://{endpoint}").parse::<Uri>()?
    } else {
        format!("https://{endpoint}").parse::<Uri>()?
    };

    Ok(uri)
}
