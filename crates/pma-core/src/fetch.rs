//! Remote record lookup against UniProt
//!
//! All HTTP goes through the narrow [`Transport`] trait so the pipeline
//! depends only on a `{result count, body}` reply shape, not on any
//! particular HTTP client. The production implementation wraps
//! `reqwest::Client` with the configured timeout.
//!
//! Fetch failures are recoverable per item: the aggregator records the
//! entity as unresolved and moves on. A zero-hit response is not a
//! failure; it is an explicit empty result.

use crate::config::PipelineConfig;
use async_trait::async_trait;
use pma_common::AccessionId;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Header carrying the remote result count.
const TOTAL_RESULTS_HEADER: &str = "X-Total-Results";

/// Recoverable per-item lookup failure.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network/transport error from the HTTP client
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with an unexpected status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// What a single remote request yields: a result-count signal (when the
/// service sends one) and the raw body text.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub result_count: Option<u64>,
    pub body: String,
}

impl TransportReply {
    /// True when the service explicitly reported zero results, or sent
    /// nothing at all.
    pub fn is_zero_hit(&self) -> bool {
        self.result_count == Some(0) || self.body.trim().is_empty()
    }
}

/// Minimal transport interface the pipeline needs from an HTTP client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<TransportReply, FetchError>;
}

/// Production transport over `reqwest` with a bounded timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<TransportReply, FetchError> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let result_count = response
            .headers()
            .get(TOTAL_RESULTS_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response.text().await?;

        Ok(TransportReply { result_count, body })
    }
}

/// Client for the two logical UniProt operations: gene-name search and
/// per-accession record lookup.
pub struct UniProtClient {
    transport: Box<dyn Transport>,
    uniprot_url: String,
    features_url: String,
    organism: String,
}

impl UniProtClient {
    /// Create a client with the production HTTP transport.
    pub fn new(config: &PipelineConfig) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.timeout_secs)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: &PipelineConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            uniprot_url: config.uniprot_url.clone(),
            features_url: config.features_url.clone(),
            organism: config.organism.clone(),
        }
    }

    /// Search UniProt for a gene name within the configured organism and
    /// return the accessions of all hits. Zero hits is an empty list.
    pub async fn search_gene(&self, gene: &str) -> Result<Vec<AccessionId>, FetchError> {
        let query = format!("organism:{} AND gene:{}", self.organism, gene);
        let reply = self
            .transport
            .get(&self.uniprot_url, &[("format", "list"), ("query", &query)])
            .await?;

        if reply.is_zero_hit() {
            debug!(gene = %gene, "No accessions for gene");
            return Ok(Vec::new());
        }

        let accessions: Vec<AccessionId> = reply
            .body
            .split_whitespace()
            .map(AccessionId::from)
            .collect();

        debug!(gene = %gene, count = accessions.len(), "Resolved accessions");
        Ok(accessions)
    }

    /// Fetch the full text record for an accession. `None` means the
    /// service reported no record for it.
    pub async fn fetch_record(&self, acc: &AccessionId) -> Result<Option<String>, FetchError> {
        let reply = self
            .transport
            .get(
                &self.uniprot_url,
                &[("format", "txt"), ("query", acc.as_str())],
            )
            .await?;

        if reply.is_zero_hit() {
            debug!(accession = %acc, "No record for accession");
            return Ok(None);
        }

        Ok(Some(reply.body))
    }

    /// Fetch the feature record for an accession. `None` means the service
    /// reported no record for it.
    pub async fn fetch_features(&self, acc: &AccessionId) -> Result<Option<String>, FetchError> {
        let reply = self
            .transport
            .get(
                &self.features_url,
                &[("accession", acc.as_str()), ("format", "txt")],
            )
            .await?;

        if reply.is_zero_hit() {
            debug!(accession = %acc, "No feature record for accession");
            return Ok(None);
        }

        Ok(Some(reply.body))
    }
}
