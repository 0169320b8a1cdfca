//! Result aggregation
//!
//! The aggregator drives the whole pipeline over an ordered input of
//! entities, one remote lookup chain at a time, and collects per-entity
//! outcomes into an insertion-ordered mapping. Recoverable lookup failures
//! mark the entity unresolved and the run continues; a malformed report
//! aborts immediately. The run always ends with a complete (possibly
//! partial) report plus summary counters.

use crate::fetch::{FetchError, UniProtClient};
use crate::parse;
use pma_common::{AccessionId, Annotation, FeatureSet, Result, TaxonomyChain};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Per-entity result.
///
/// `Annotated` covers genuine empty annotations ("nothing found") as well
/// as populated ones; `Unresolved` is the distinct marker for a lookup
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "annotation", rename_all = "lowercase")]
pub enum EntityOutcome {
    Annotated(Annotation),
    Unresolved,
}

impl EntityOutcome {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, EntityOutcome::Unresolved)
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        match self {
            EntityOutcome::Annotated(ann) => Some(ann),
            EntityOutcome::Unresolved => None,
        }
    }
}

/// One profiled entity: its key, the accessions it resolved to, and what
/// came back for it.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    pub key: String,
    pub accessions: Vec<AccessionId>,
    #[serde(flatten)]
    pub outcome: EntityOutcome,
}

/// Insertion-ordered mapping from entity key to outcome.
///
/// Keys are unique; inserting an existing key replaces the record at its
/// original position instead of appending a duplicate.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    entries: Vec<EntityRecord>,
    index: HashMap<String, usize>,
}

impl AggregateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, accessions: Vec<AccessionId>, outcome: EntityOutcome) {
        let key = key.into();
        let record = EntityRecord {
            key: key.clone(),
            accessions,
            outcome,
        };
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos] = record,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(record);
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&EntityRecord> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AggregateReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Run-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Entities taken from the input (after the cap)
    pub processed: usize,

    /// Entities with at least one resolved accession; excludes unresolved
    pub resolved: usize,

    /// Entities whose annotation contains the query term, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<usize>,
}

impl RunSummary {
    fn new(with_query: bool) -> Self {
        Self {
            matched: with_query.then_some(0),
            ..Self::default()
        }
    }

    fn record_match(&mut self, term: Option<&str>, annotation: &Annotation) {
        if let (Some(term), Some(matched)) = (term, self.matched.as_mut()) {
            if annotation.contains(term) {
                *matched += 1;
            }
        }
    }
}

/// A finished run: the ordered report plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub report: AggregateReport,
    pub summary: RunSummary,
}

/// Drives extraction, fetching and parsing over an ordered input.
pub struct Aggregator<'a> {
    client: &'a UniProtClient,
    cap: Option<usize>,
}

impl<'a> Aggregator<'a> {
    pub fn new(client: &'a UniProtClient) -> Self {
        Self { client, cap: None }
    }

    /// Stop after at most `cap` entities. Early termination, not an error.
    pub fn with_cap(mut self, cap: Option<usize>) -> Self {
        self.cap = cap;
        self
    }

    /// Profile gene-name candidates: resolve each name to accessions, then
    /// union the unique features across them.
    ///
    /// A name with zero accessions is processed with an empty feature set.
    /// Any lookup failure marks the name unresolved and the run continues.
    pub async fn annotate_genes<I>(&self, names: I, query_term: Option<&str>) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = String>,
    {
        let mut report = AggregateReport::new();
        let mut summary = RunSummary::new(query_term.is_some());

        for name in names.into_iter().take(self.cap.unwrap_or(usize::MAX)) {
            summary.processed += 1;

            let accessions = match self.client.search_gene(&name).await {
                Ok(accessions) => accessions,
                Err(err) => {
                    warn!(entity = %name, error = %err, "Gene search failed, marking unresolved");
                    report.insert(name, Vec::new(), EntityOutcome::Unresolved);
                    continue;
                }
            };

            if accessions.is_empty() {
                debug!(entity = %name, "No accessions, recording empty annotation");
                report.insert(
                    name,
                    accessions,
                    EntityOutcome::Annotated(Annotation::Features(FeatureSet::new())),
                );
                continue;
            }

            match self.collect_features(&accessions).await {
                Ok(features) => {
                    summary.resolved += 1;
                    let annotation = Annotation::Features(features);
                    summary.record_match(query_term, &annotation);
                    report.insert(name, accessions, EntityOutcome::Annotated(annotation));
                }
                Err(err) => {
                    warn!(entity = %name, error = %err, "Feature lookup failed, marking unresolved");
                    report.insert(name, accessions, EntityOutcome::Unresolved);
                }
            }
        }

        info!(
            processed = summary.processed,
            resolved = summary.resolved,
            "Gene annotation run complete"
        );
        Ok(RunOutcome { report, summary })
    }

    /// Profile report-derived accessions: fetch each record and parse its
    /// taxonomy chain.
    ///
    /// The input items are extraction results, so a malformed report line
    /// aborts the run here. A duplicate accession is queried only once.
    pub async fn annotate_report<I>(
        &self,
        accessions: I,
        query_term: Option<&str>,
    ) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = Result<AccessionId>>,
    {
        let mut report = AggregateReport::new();
        let mut summary = RunSummary::new(query_term.is_some());

        for item in accessions.into_iter().take(self.cap.unwrap_or(usize::MAX)) {
            let acc = item?;

            if report.contains_key(acc.as_str()) {
                debug!(accession = %acc, "Duplicate accession in report, skipping");
                continue;
            }
            summary.processed += 1;

            match self.client.fetch_record(&acc).await {
                Ok(Some(body)) => {
                    summary.resolved += 1;
                    let annotation = Annotation::Taxonomy(parse::parse_taxonomy(&body));
                    summary.record_match(query_term, &annotation);
                    let key = acc.as_str().to_string();
                    report.insert(key, vec![acc], EntityOutcome::Annotated(annotation));
                }
                Ok(None) => {
                    debug!(accession = %acc, "Zero-hit record, recording empty annotation");
                    let key = acc.as_str().to_string();
                    report.insert(
                        key,
                        vec![acc],
                        EntityOutcome::Annotated(Annotation::Taxonomy(TaxonomyChain::new())),
                    );
                }
                Err(err) => {
                    warn!(accession = %acc, error = %err, "Record fetch failed, marking unresolved");
                    let key = acc.as_str().to_string();
                    report.insert(key, vec![acc], EntityOutcome::Unresolved);
                }
            }
        }

        info!(
            processed = summary.processed,
            resolved = summary.resolved,
            "Report annotation run complete"
        );
        Ok(RunOutcome { report, summary })
    }

    /// Fetch and union the features of every accession of one entity.
    async fn collect_features(&self, accessions: &[AccessionId]) -> std::result::Result<FeatureSet, FetchError> {
        let mut features = FeatureSet::new();
        for acc in accessions {
            if let Some(body) = self.client.fetch_features(acc).await? {
                features.merge(parse::parse_features(&body));
            }
        }
        Ok(features)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::fetch::{Transport, TransportReply};
    use async_trait::async_trait;
    use pma_common::PmaError;
    use std::collections::HashMap;

    enum StubReply {
        Body { count: Option<u64>, body: &'static str },
        Fail,
    }

    /// Transport stub keyed on the query/accession request parameter.
    /// Unknown keys answer as explicit zero-hits.
    struct StubTransport {
        replies: HashMap<String, StubReply>,
    }

    impl StubTransport {
        fn new() -> Self {
            Self {
                replies: HashMap::new(),
            }
        }

        fn on(mut self, key: &str, count: Option<u64>, body: &'static str) -> Self {
            self.replies
                .insert(key.to_string(), StubReply::Body { count, body });
            self
        }

        fn failing(mut self, key: &str) -> Self {
            self.replies.insert(key.to_string(), StubReply::Fail);
            self
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(
            &self,
            url: &str,
            params: &[(&str, &str)],
        ) -> std::result::Result<TransportReply, FetchError> {
            let key = params
                .iter()
                .find(|(k, _)| *k == "query" || *k == "accession")
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();

            match self.replies.get(&key) {
                Some(StubReply::Body { count, body }) => Ok(TransportReply {
                    result_count: *count,
                    body: body.to_string(),
                }),
                Some(StubReply::Fail) => Err(FetchError::Status {
                    status: 500,
                    url: url.to_string(),
                }),
                None => Ok(TransportReply {
                    result_count: Some(0),
                    body: String::new(),
                }),
            }
        }
    }

    fn client_with(stub: StubTransport) -> UniProtClient {
        UniProtClient::with_transport(&PipelineConfig::default(), Box::new(stub))
    }

    fn gene_query(name: &str) -> String {
        format!("organism:Saccharomyces cerevisiae AND gene:{}", name)
    }

    #[tokio::test]
    async fn test_gene_flow_unions_features_across_accessions() {
        let stub = StubTransport::new()
            .on(&gene_query("Atg1"), Some(2), "P11111\nP22222\n")
            .on("P11111", None, r#"{"type":"DOMAIN"}"#)
            .on("P22222", None, r#"{"type":"DOMAIN"},{"type":"SITE"}"#);
        let client = client_with(stub);

        let outcome = Aggregator::new(&client)
            .annotate_genes(vec!["Atg1".to_string()], Some("SITE"))
            .await
            .unwrap();

        assert_eq!(outcome.summary.processed, 1);
        assert_eq!(outcome.summary.resolved, 1);
        assert_eq!(outcome.summary.matched, Some(1));

        let record = outcome.report.get("Atg1").unwrap();
        assert_eq!(record.accessions.len(), 2);
        let annotation = record.outcome.annotation().unwrap();
        assert_eq!(annotation.render(), "DOMAIN, SITE");
    }

    #[tokio::test]
    async fn test_gene_with_zero_hits_is_processed_not_unresolved() {
        let client = client_with(StubTransport::new());

        let outcome = Aggregator::new(&client)
            .annotate_genes(vec!["Atg9".to_string()], None)
            .await
            .unwrap();

        assert_eq!(outcome.summary.processed, 1);
        assert_eq!(outcome.summary.resolved, 0);

        let record = outcome.report.get("Atg9").unwrap();
        assert!(!record.outcome.is_unresolved());
        assert!(record.outcome.annotation().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gene_fetch_failure_marks_unresolved() {
        let stub = StubTransport::new().failing(&gene_query("Atg1"));
        let client = client_with(stub);

        let outcome = Aggregator::new(&client)
            .annotate_genes(vec!["Atg1".to_string(), "Atg2".to_string()], None)
            .await
            .unwrap();

        // The failure is absorbed; the run continues to Atg2.
        assert_eq!(outcome.summary.processed, 2);
        assert_eq!(outcome.summary.resolved, 0);
        assert!(outcome.report.get("Atg1").unwrap().outcome.is_unresolved());
        assert!(!outcome.report.get("Atg2").unwrap().outcome.is_unresolved());
    }

    #[tokio::test]
    async fn test_feature_failure_mid_entity_marks_unresolved() {
        let stub = StubTransport::new()
            .on(&gene_query("Atg1"), Some(1), "P11111\n")
            .failing("P11111");
        let client = client_with(stub);

        let outcome = Aggregator::new(&client)
            .annotate_genes(vec!["Atg1".to_string()], None)
            .await
            .unwrap();

        assert_eq!(outcome.summary.resolved, 0);
        assert!(outcome.report.get("Atg1").unwrap().outcome.is_unresolved());
    }

    #[tokio::test]
    async fn test_cap_stops_processing_early() {
        let client = client_with(StubTransport::new());
        let names: Vec<String> = (1..=5).map(|n| format!("Atg{}", n)).collect();

        let outcome = Aggregator::new(&client)
            .with_cap(Some(2))
            .annotate_genes(names, None)
            .await
            .unwrap();

        assert_eq!(outcome.summary.processed, 2);
        assert_eq!(outcome.report.len(), 2);
    }

    #[tokio::test]
    async fn test_report_flow_parses_taxonomy() {
        let stub = StubTransport::new()
            .on("P11111", None, "OC   Eukaryota; Fungi;\nOC   Saccharomycetes;\n")
            .on("P22222", Some(0), "");
        let client = client_with(stub);

        let accessions = vec![
            Ok(AccessionId::from("P11111")),
            Ok(AccessionId::from("P22222")),
        ];
        let outcome = Aggregator::new(&client)
            .annotate_report(accessions, Some("Fungi"))
            .await
            .unwrap();

        assert_eq!(outcome.summary.processed, 2);
        assert_eq!(outcome.summary.resolved, 1);
        assert_eq!(outcome.summary.matched, Some(1));

        let hit = outcome.report.get("P11111").unwrap();
        assert_eq!(
            hit.outcome.annotation().unwrap().render(),
            "Eukaryota, Fungi, Saccharomycetes"
        );

        // Zero-hit record: processed with an empty chain, not unresolved.
        let miss = outcome.report.get("P22222").unwrap();
        assert!(!miss.outcome.is_unresolved());
        assert!(miss.outcome.annotation().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_flow_queries_duplicates_once() {
        let stub = StubTransport::new().on("P11111", None, "OC   Eukaryota;\n");
        let client = client_with(stub);

        let accessions = vec![
            Ok(AccessionId::from("P11111")),
            Ok(AccessionId::from("P11111")),
        ];
        let outcome = Aggregator::new(&client)
            .annotate_report(accessions, None)
            .await
            .unwrap();

        assert_eq!(outcome.summary.processed, 1);
        assert_eq!(outcome.report.len(), 1);
    }

    #[tokio::test]
    async fn test_report_flow_aborts_on_malformed_input() {
        let client = client_with(StubTransport::new());

        let accessions = vec![
            Ok(AccessionId::from("P11111")),
            Err(PmaError::malformed_report(7, "  3 UniRef100-broken")),
        ];
        let err = Aggregator::new(&client)
            .annotate_report(accessions, None)
            .await
            .unwrap_err();

        assert!(matches!(err, PmaError::MalformedReport { line: 7, .. }));
    }

    #[test]
    fn test_aggregate_report_overwrites_in_place() {
        let mut report = AggregateReport::new();
        report.insert("A", Vec::new(), EntityOutcome::Unresolved);
        report.insert(
            "B",
            Vec::new(),
            EntityOutcome::Annotated(Annotation::Features(FeatureSet::new())),
        );
        report.insert(
            "A",
            Vec::new(),
            EntityOutcome::Annotated(Annotation::Features(FeatureSet::new())),
        );

        assert_eq!(report.len(), 2);
        let keys: Vec<&str> = report.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert!(!report.get("A").unwrap().outcome.is_unresolved());
    }
}
