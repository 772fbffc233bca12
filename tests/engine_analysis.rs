//! End-to-end analysis against a local registry and an in-process resolver.

mod helpers;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use domain_intel::dns::DnsAnswer;
use domain_intel::engine::{REGISTRY_ORIGIN, REPUTATION_ORIGIN};
use domain_intel::{BlocklistStatus, DomainIntelligenceEngine, ErrorKind};

use helpers::{fixed_clock, local_config, registry_record, spawn_registry, MockDns, RegistryReply};

const PROVIDERS: [&str; 3] = ["one.example", "two.example", "three.example"];
const HOST_IP: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

fn engine(port: u16, dns: MockDns) -> DomainIntelligenceEngine {
    DomainIntelligenceEngine::new(&local_config(port, &PROVIDERS), Arc::new(dns), fixed_clock())
}

async fn example_registry() -> (u16, Arc<std::sync::Mutex<Vec<String>>>) {
    spawn_registry(|query| RegistryReply::Text(registry_record(query, "1995-08-14T04:00:00Z"))).await
}

#[tokio::test]
async fn test_end_to_end_url_input() {
    let (port, queries) = example_registry().await;
    let dns = MockDns::new().host("example.com", HOST_IP);

    let report = engine(port, dns)
        .analyze("https://www.example.com")
        .await
        .unwrap();

    assert_eq!(report.domain.as_str(), "example.com");
    assert_eq!(queries.lock().unwrap().as_slice(), ["example.com"]);

    let registration = report.registration.as_ref().expect("registration populated");
    assert_eq!(registration.registry, "127.0.0.1");
    assert_eq!(report.creation_display(), "1995-08-14 04:00:00 UTC");
    assert_eq!(report.age_display(), "28 years, 9 months, 28 days");

    let reputation = report.reputation.as_ref().expect("reputation populated");
    assert_eq!(reputation.ip_address, HOST_IP);
    assert_eq!(reputation.total_providers, PROVIDERS.len());
    assert_eq!(report.reputation_summary(), "Not listed on common spam lists.");
    assert_eq!(report.score_display(), "0%");
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_dns_failure_keeps_registry_half() {
    let (port, _) = example_registry().await;
    // No A record for the domain at all
    let report = engine(port, MockDns::new())
        .analyze("example.com")
        .await
        .unwrap();

    assert!(report.registration.is_some());
    assert!(report.reputation.is_none());
    assert!(report.has_error(ErrorKind::DnsResolutionFailed));
    assert_eq!(report.annotations_from(REPUTATION_ORIGIN).count(), 1);
    assert_eq!(report.score_display(), "N/A");
}

#[tokio::test]
async fn test_provider_timeout_scores_zero() {
    let (port, _) = example_registry().await;
    let dns = MockDns::new().host("example.com", HOST_IP).delayed(
        "1.2.0.192.two.example",
        Duration::from_secs(10),
        DnsAnswer::NoSuchName,
    );

    let report = engine(port, dns).analyze("example.com").await.unwrap();
    let reputation = report.reputation.as_ref().unwrap();

    assert_eq!(reputation.results[0].status, BlocklistStatus::NotListed);
    assert_eq!(reputation.results[1].status, BlocklistStatus::Indeterminate);
    assert_eq!(reputation.results[2].status, BlocklistStatus::NotListed);
    assert_eq!(reputation.score_percent, Some(0.0));
    assert_eq!(report.score_display(), "0%");

    assert!(report.has_error(ErrorKind::Timeout));
    let annotations: Vec<_> = report.annotations_from("two.example").collect();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].kind, ErrorKind::Timeout);
    assert!(report.registration.is_some());
}

#[tokio::test]
async fn test_listed_provider() {
    let (port, _) = example_registry().await;
    let dns = MockDns::new()
        .host("example.com", HOST_IP)
        .host("1.2.0.192.three.example", Ipv4Addr::new(127, 0, 0, 2));

    let report = engine(port, dns).analyze("example.com").await.unwrap();
    assert_eq!(report.reputation_summary(), "Listed on 1 out of 3 spam lists");
    assert_eq!(report.score_display(), "33.33%");
}

#[tokio::test]
async fn test_registry_protocol_error_keeps_reputation() {
    let (port, _) = spawn_registry(|_| RegistryReply::Text(String::new())).await;
    let dns = MockDns::new().host("example.com", HOST_IP);

    let report = engine(port, dns).analyze("example.com").await.unwrap();
    assert!(report.registration.is_none());
    assert!(report.has_error(ErrorKind::RegistryProtocolError));
    assert_eq!(report.annotations_from(REGISTRY_ORIGIN).count(), 1);
    assert_eq!(report.reputation.unwrap().total_providers, 3);
}

#[tokio::test]
async fn test_no_match_record_is_not_an_error() {
    let (port, _) =
        spawn_registry(|q| RegistryReply::Text(format!("No match for \"{}\".\r\n", q.to_uppercase())))
            .await;
    let dns = MockDns::new().host("example.com", HOST_IP);

    let report = engine(port, dns).analyze("example.com").await.unwrap();
    let registration = report.registration.as_ref().unwrap();
    assert!(registration.creation_date.is_none());
    assert_eq!(report.creation_display(), "unknown");
    assert_eq!(report.age_display(), "unknown");
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_overall_deadline() {
    let (port, _) = spawn_registry(|_| RegistryReply::Stall).await;
    let dns = MockDns::new().host("example.com", HOST_IP).delayed(
        "1.2.0.192.two.example",
        Duration::from_secs(10),
        DnsAnswer::NoSuchName,
    );
    let mut config = local_config(port, &PROVIDERS);
    config.registry_timeout_secs = 5;
    config.dns_timeout_ms = 2_000;
    config.deadline_ms = 400;
    // dns_timeout > deadline is rejected by validate(); build directly
    let engine = DomainIntelligenceEngine::new(&config, Arc::new(dns), fixed_clock());

    let started = Instant::now();
    let report = engine.analyze("example.com").await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));

    assert!(report.registration.is_none());
    let registry_errors: Vec<_> = report.annotations_from(REGISTRY_ORIGIN).collect();
    assert_eq!(registry_errors.len(), 1);
    assert_eq!(registry_errors[0].kind, ErrorKind::Timeout);

    let reputation = report.reputation.as_ref().unwrap();
    assert_eq!(reputation.results[0].status, BlocklistStatus::NotListed);
    assert_eq!(reputation.results[1].status, BlocklistStatus::Indeterminate);
    assert_eq!(reputation.results[1].failure, Some(ErrorKind::Timeout));
    assert_eq!(reputation.results[2].status, BlocklistStatus::NotListed);
}

#[tokio::test]
async fn test_malformed_inputs_fail() {
    let (port, queries) = example_registry().await;
    let engine = engine(port, MockDns::new());
    let long_label = format!("{}.com", "a".repeat(64));
    for input in ["", "   ", "exa mple.com", &long_label, "a..com", "192.0.2.1", "ftp://example.com"] {
        let err = engine.analyze(input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDomainFormat, "{input:?}");
    }
    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_many_in_input_order() {
    let (port, _) = example_registry().await;
    let dns = MockDns::new()
        .host("example.com", HOST_IP)
        .host("example.org", Ipv4Addr::new(198, 51, 100, 9));
    let inputs = vec![
        "http://example.org/".to_string(),
        "bad..input".to_string(),
        "www.example.com".to_string(),
    ];

    let results = engine(port, dns).analyze_many(&inputs).await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().domain.as_str(), "example.org");
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().domain.as_str(), "example.com");
}
