// Copyright 2025 Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use once_cell::sync::Lazy;
use tonic::transport::{Certificate, ClientTlsConfig};

static CRYPTO_PROVIDER: Lazy<()> = Lazy::new(|| {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");
});

static TLS_CONFIG: Lazy<ClientTlsConfig> = Lazy::new(|| {
    Lazy::force(&CRYPTO_PROVIDER);

    ClientTlsConfig::new()
        .with_native_roots()
        .assume_http2(true)
});

pub fn config() -> &'static ClientTlsConfig {
    &TLS_CONFIG
}

/// TLS configuration trusting only the given PEM certificate, for endpoints
/// running with self-signed or private-CA certificates.
pub fn config_with_ca(pem: &[u8]) -> ClientTlsConfig {
    Lazy::force(&CRYPTO_PROVIDER);

    ClientTlsConfig::new()
        .ca_certificate(Certificate::from_pem(pem))
        .assume_http2(true)
}
