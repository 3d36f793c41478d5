// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tallyconv::application::ConverterService;
use tallyconv::config::ConverterConfig;
use tallyconv::domain::{Amount, ConversionRate};
use tallyconv::rates::{RateError, RateProvider};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Helper to build a rate from a decimal literal
pub fn rate(value: &str) -> ConversionRate {
    ConversionRate::from_decimal(Amount::from_str(value).unwrap()).unwrap()
}

/// Provider that returns a fixed rate and counts how often it was asked
#[derive(Clone)]
pub struct CountingProvider {
    rate: ConversionRate,
    calls: Arc<AtomicUsize>,
}

impl CountingProvider {
    pub fn new(rate: ConversionRate) -> Self {
        Self {
            rate,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for CountingProvider {
    async fn get_rate(&self) -> Result<ConversionRate, RateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rate)
    }
}

/// Provider that always fails the way an unreachable endpoint does
#[derive(Clone, Default)]
pub struct FailingProvider {
    calls: Arc<AtomicUsize>,
}

impl FailingProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for FailingProvider {
    async fn get_rate(&self) -> Result<ConversionRate, RateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RateError::Unreachable("connection refused".into()))
    }
}

/// Helper to create a service backed by a counting provider
pub fn test_service(rate_value: &str) -> (ConverterService, CountingProvider) {
    let provider = CountingProvider::new(rate(rate_value));
    let service = ConverterService::with_provider(provider.clone(), ConverterConfig::default());
    (service, provider)
}

/// Helper to create a service whose rate fetch always fails
pub fn failing_service() -> (ConverterService, FailingProvider) {
    let provider = FailingProvider::default();
    let service = ConverterService::with_provider(provider.clone(), ConverterConfig::default());
    (service, provider)
}

/// A one-shot HTTP server answering a single request with a canned response.
/// Returns the endpoint URL and a receiver for the request line it saw.
pub async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> Result<(String, oneshot::Receiver<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap_or(0);
        let request = String::from_utf8_lossy(&buf[..n]);
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    Ok((format!("http://{addr}/api/latest.json"), rx))
}

/// An endpoint on a port nobody listens on
pub async fn closed_endpoint() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/api/latest.json"))
}
