use std::future::Future;

use tonic::metadata::{Ascii, MetadataValue};

use crate::error::AuthError;

/// Environment variable holding the API key attached to stream requests.
pub const API_KEY_ENV_VAR: &str = "BSTREAM_API_KEY";

/// A resolved credential, applied as one metadata header on the request that
/// opens a stream.
#[derive(Debug, Clone)]
pub struct Credential {
    header: &'static str,
    value: MetadataValue<Ascii>,
}

impl Credential {
    pub fn api_key(key: &str) -> Result<Self, AuthError> {
        // Header values tolerate opaque high bytes, but keys and tokens are
        // ASCII by contract; anything else is a misconfiguration.
        if !key.is_ascii() {
            return Err(AuthError::NonAsciiCredential);
        }
        Ok(Self {
            header: "x-api-key",
            value: key.parse()?,
        })
    }

    pub fn bearer(token: &str) -> Result<Self, AuthError> {
        if !token.is_ascii() {
            return Err(AuthError::NonAsciiCredential);
        }
        Ok(Self {
            header: "authorization",
            value: format!("Bearer {token}").parse()?,
        })
    }

    pub fn apply<T>(&self, request: &mut tonic::Request<T>) {
        request.metadata_mut().insert(self.header, self.value.clone());
    }
}

/// Source of short-lived stream credentials. Resolved once per connection
/// attempt, so expiring tokens refresh naturally across reconnects.
pub trait CredentialProvider {
    fn credential(&mut self) -> impl Future<Output = Result<Option<Credential>, AuthError>>;
}

/// Reads an API key from the environment (or a `.env` file) on every
/// connection attempt.
#[derive(Debug, Clone)]
pub struct ApiKeyCredentials {
    var: &'static str,
    required: bool,
}

impl ApiKeyCredentials {
    /// Fails the run when the key is absent.
    pub fn from_env() -> Self {
        Self {
            var: API_KEY_ENV_VAR,
            required: true,
        }
    }

    /// Attaches the key only when present, for endpoints that accept
    /// anonymous streams.
    pub fn optional_from_env() -> Self {
        Self {
            var: API_KEY_ENV_VAR,
            required: false,
        }
    }
}

impl CredentialProvider for ApiKeyCredentials {
    async fn credential(&mut self) -> Result<Option<Credential>, AuthError> {
        match dotenvy::var(self.var) {
            Ok(key) => Ok(Some(Credential::api_key(&key)?)),
            Err(_) if !self.required => Ok(None),
            Err(_) => Err(AuthError::MissingApiKey(self.var)),
        }
    }
}

/// Never attaches a credential; plaintext and development endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    async fn credential(&mut self) -> Result<Option<Credential>, AuthError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_header_is_well_formed() {
        let credential = Credential::api_key("server_abcdef123456").unwrap();
        let mut request = tonic::Request::new(());
        credential.apply(&mut request);

        assert_eq!(
            request.metadata().get("x-api-key").unwrap(),
            "server_abcdef123456"
        );
    }

    #[test]
    fn bearer_header_is_prefixed() {
        let credential = Credential::bearer("token123").unwrap();
        let mut request = tonic::Request::new(());
        credential.apply(&mut request);

        assert_eq!(
            request.metadata().get("authorization").unwrap(),
            "Bearer token123"
        );
    }

    #[test]
    fn non_ascii_key_is_rejected() {
        assert!(matches!(
            Credential::api_key("clé\u{e9}"),
            Err(AuthError::NonAsciiCredential)
        ));
        assert!(matches!(
            Credential::bearer("clé\u{e9}"),
            Err(AuthError::NonAsciiCredential)
        ));
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(matches!(
            Credential::api_key("server\nabc"),
            Err(AuthError::InvalidCredential(_))
        ));
    }

    #[tokio::test]
    async fn no_credentials_yields_none() {
        let mut provider = NoCredentials;
        assert!(provider.credential().await.unwrap().is_none());
    }
}
