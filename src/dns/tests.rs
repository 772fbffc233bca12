//! DNS module tests.

use super::resolution::classify_resolve_error;
use super::*;
use crate::error_handling::ErrorKind;
use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Answers every query with the same canned response after an optional delay.
struct FixedBackend {
    answer: DnsAnswer,
    delay: Duration,
}

#[async_trait]
impl DnsBackend for FixedBackend {
    async fn lookup_ipv4(&self, _name: &str) -> DnsAnswer {
        tokio::time::sleep(self.delay).await;
        self.answer.clone()
    }
}

fn backend(answer: DnsAnswer) -> FixedBackend {
    FixedBackend {
        answer,
        delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_resolve_returns_first_address() {
    let dns = backend(DnsAnswer::Addresses(vec![
        Ipv4Addr::new(93, 184, 216, 34),
        Ipv4Addr::new(93, 184, 216, 35),
    ]));
    let ip = resolve_host_to_ipv4(&dns, "example.com", Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(ip, Ipv4Addr::new(93, 184, 216, 34));
}

#[tokio::test]
async fn test_resolve_empty_answer_fails() {
    let dns = backend(DnsAnswer::Addresses(Vec::new()));
    let err = resolve_host_to_ipv4(&dns, "example.com", Duration::from_secs(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DnsResolutionFailed);
}

#[tokio::test]
async fn test_resolve_nxdomain_fails() {
    let dns = backend(DnsAnswer::NoSuchName);
    let err = resolve_host_to_ipv4(&dns, "nope.example", Duration::from_secs(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DnsResolutionFailed);
    assert!(err.to_string().contains("nope.example"));
}

#[tokio::test]
async fn test_resolve_slow_backend_fails_after_timeout() {
    let dns = FixedBackend {
        answer: DnsAnswer::Addresses(vec![Ipv4Addr::LOCALHOST]),
        delay: Duration::from_secs(5),
    };
    let err = resolve_host_to_ipv4(&dns, "slow.example", Duration::from_millis(20))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DnsResolutionFailed);
}

#[test]
fn test_classify_timeout() {
    let err = ResolveError::from(ResolveErrorKind::Timeout);
    assert_eq!(classify_resolve_error(&err), DnsAnswer::TimedOut);
}

#[test]
fn test_classify_other_failure() {
    let err = ResolveError::from(ResolveErrorKind::Message("connection refused"));
    match classify_resolve_error(&err) {
        DnsAnswer::Failed(reason) => assert!(reason.contains("connection refused")),
        other => panic!("unexpected answer: {other:?}"),
    }
}
