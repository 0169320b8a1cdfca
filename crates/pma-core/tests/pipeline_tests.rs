//! Integration tests for the aggregation pipeline
//!
//! These run both flows against a mock UniProt server and validate:
//! - gene-name search, feature union, and membership counting
//! - zero-hit handling (valid empty results, not failures)
//! - per-item failure absorption (unresolved markers, counters)
//! - report extraction feeding the taxonomy flow, including the fatal
//!   malformed-input path

use pma_core::aggregate::Aggregator;
use pma_core::config::PipelineConfig;
use pma_core::extract::{ReportFormat, ReportScan};
use pma_core::fetch::UniProtClient;
use pma_common::PmaError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> PipelineConfig {
    PipelineConfig::default()
        .with_uniprot_url(format!("{}/uniprot", server.uri()))
        .with_features_url(format!("{}/features", server.uri()))
}

fn gene_query(name: &str) -> String {
    format!("organism:Saccharomyces cerevisiae AND gene:{}", name)
}

#[tokio::test]
async fn test_gene_flow_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/uniprot"))
        .and(query_param("format", "list"))
        .and(query_param("query", gene_query("Atg1")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Results", "1")
                .set_body_string("P12345\n"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/uniprot"))
        .and(query_param("format", "list"))
        .and(query_param("query", gene_query("Atg2")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Results", "0")
                .set_body_string(""),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/features"))
        .and(query_param("accession", "P12345"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"accession":"P12345","features":[{"type":"DOMAIN"},{"type":"SITE"},{"type":"DOMAIN"}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server);
    let client = UniProtClient::new(&config).unwrap();

    let outcome = Aggregator::new(&client)
        .annotate_genes(vec!["Atg1".to_string(), "Atg2".to_string()], Some("DOMAIN"))
        .await
        .unwrap();

    assert_eq!(outcome.summary.processed, 2);
    assert_eq!(outcome.summary.resolved, 1);
    assert_eq!(outcome.summary.matched, Some(1));

    let atg1 = outcome.report.get("Atg1").unwrap();
    assert_eq!(atg1.outcome.annotation().unwrap().render(), "DOMAIN, SITE");

    // Zero-hit search: processed with an empty set, distinct from unresolved.
    let atg2 = outcome.report.get("Atg2").unwrap();
    assert!(!atg2.outcome.is_unresolved());
    assert!(atg2.outcome.annotation().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_flow_absorbs_per_item_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/uniprot"))
        .and(query_param("format", "txt"))
        .and(query_param("query", "P12345"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Results", "1")
                .set_body_string("OC   Eukaryota; Fungi;\nOC   Saccharomycetes;\n"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/uniprot"))
        .and(query_param("format", "txt"))
        .and(query_param("query", "Q99999"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let report_text = "\
 No Hit                       Prob
  1 UniRef100_P12345 one      99.9
  2 UniRef100_Q99999 two      98.0
";
    let scan = ReportScan::new(report_text, ReportFormat::HitBlock);

    let config = test_config(&mock_server);
    let client = UniProtClient::new(&config).unwrap();

    let outcome = Aggregator::new(&client)
        .annotate_report(scan.accessions(), Some("Fungi"))
        .await
        .unwrap();

    assert_eq!(outcome.summary.processed, 2);
    assert_eq!(outcome.summary.resolved, 1);
    assert_eq!(outcome.summary.matched, Some(1));

    // Insertion order follows the report, failures included.
    let keys: Vec<&str> = outcome.report.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["P12345", "Q99999"]);

    let hit = outcome.report.get("P12345").unwrap();
    assert_eq!(
        hit.outcome.annotation().unwrap().render(),
        "Eukaryota, Fungi, Saccharomycetes"
    );

    let failed = outcome.report.get("Q99999").unwrap();
    assert!(failed.outcome.is_unresolved());
}

#[tokio::test]
async fn test_report_flow_respects_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/uniprot"))
        .and(query_param("query", "P11111"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Results", "1")
                .set_body_string("OC   Eukaryota;\n"),
        )
        .mount(&mock_server)
        .await;

    let report_text = "\
 No Hit
  1 UniRef100_P11111 one
  2 UniRef100_P22222 two
  3 UniRef100_P33333 three
";
    let scan = ReportScan::new(report_text, ReportFormat::HitBlock);

    let config = test_config(&mock_server);
    let client = UniProtClient::new(&config).unwrap();

    let outcome = Aggregator::new(&client)
        .with_cap(Some(1))
        .annotate_report(scan.accessions(), None)
        .await
        .unwrap();

    assert_eq!(outcome.summary.processed, 1);
    assert_eq!(outcome.report.len(), 1);
    assert!(outcome.report.contains_key("P11111"));
}

#[tokio::test]
async fn test_malformed_report_aborts_run() {
    let mock_server = MockServer::start().await;

    let report_text = " No Hit\n  1 UniRef100-broken token\n";
    let scan = ReportScan::new(report_text, ReportFormat::HitBlock);

    let config = test_config(&mock_server);
    let client = UniProtClient::new(&config).unwrap();

    let err = Aggregator::new(&client)
        .annotate_report(scan.accessions(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, PmaError::MalformedReport { line: 2, .. }));

    // Nothing was fetched for the malformed input.
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
