// Domain module tests.

use super::*;
use crate::error_handling::ErrorKind;

fn normalized(input: &str) -> String {
    normalize_domain(input).unwrap().as_str().to_string()
}

fn assert_invalid(input: &str) {
    let err = normalize_domain(input).expect_err(input);
    assert_eq!(err.kind(), ErrorKind::InvalidDomainFormat, "{input}: {err}");
}

#[test]
fn test_normalize_bare_domain() {
    assert_eq!(normalized("example.com"), "example.com");
}

#[test]
fn test_normalize_strips_scheme_and_www() {
    for input in [
        "https://www.example.com",
        "http://www.example.com",
        "HTTPS://WWW.Example.COM",
        "www.example.com",
        "https://example.com",
        "  example.com  ",
    ] {
        assert_eq!(normalized(input), "example.com", "input: {input:?}");
    }
}

#[test]
fn test_normalize_drops_path_port_and_query() {
    assert_eq!(normalized("https://www.example.com/path?q=1#top"), "example.com");
    assert_eq!(normalized("example.com:8080"), "example.com");
    assert_eq!(normalized("user@example.com"), "example.com");
}

#[test]
fn test_normalize_trailing_dot() {
    assert_eq!(normalized("example.com."), "example.com");
}

#[test]
fn test_normalize_keeps_subdomains() {
    assert_eq!(normalized("https://mail.example.co.uk"), "mail.example.co.uk");
}

#[test]
fn test_normalize_www_only_when_labels_remain() {
    assert_eq!(normalized("www.com"), "www.com");
    assert_eq!(normalized("www.www.example.com"), "example.com");
}

#[test]
fn test_normalize_idn_to_punycode() {
    assert_eq!(normalized("bücher.de"), "xn--bcher-kva.de");
}

#[test]
fn test_normalize_is_idempotent() {
    for input in [
        "https://www.example.com",
        "http://sub.Example.org/",
        "www.www.com",
        "bücher.de",
        "example.com.",
    ] {
        let once = normalize_domain(input).unwrap();
        let twice = normalize_domain(once.as_str()).unwrap();
        assert_eq!(once, twice, "input: {input:?}");
    }
}

#[test]
fn test_normalize_rejects_malformed() {
    assert_invalid("");
    assert_invalid("   ");
    assert_invalid("exa mple.com");
    assert_invalid("example..com");
    assert_invalid(".example.com");
    assert_invalid("localhost");
    assert_invalid("under_score.com");
    assert_invalid("-leading.com");
    assert_invalid("ftp://example.com");
    assert_invalid("https://");
}

#[test]
fn test_normalize_rejects_long_label() {
    let label = "a".repeat(64);
    assert_invalid(&format!("{label}.com"));
    let ok = "a".repeat(63);
    assert_eq!(normalized(&format!("{ok}.com")), format!("{ok}.com"));
}

#[test]
fn test_normalize_rejects_long_hostname() {
    let name = format!("{}.com", vec!["abcdefghij"; 23].join("."));
    assert!(name.len() > 253);
    assert_invalid(&name);
}

#[test]
fn test_normalize_rejects_ip_literals() {
    assert_invalid("192.0.2.1");
    assert_invalid("http://192.0.2.1/");
    assert_invalid("[2001:db8::1]");
}

#[test]
fn test_invalid_error_mentions_input() {
    let err = normalize_domain("exa mple.com").unwrap_err();
    assert!(err.to_string().contains("exa mple.com"));
}

#[test]
fn test_domain_from_str() {
    let domain: Domain = "https://www.example.com".parse().unwrap();
    assert_eq!(domain.to_string(), "example.com");
    assert!("not a domain".parse::<Domain>().is_err());
}

#[test]
fn test_registrable_and_tld() {
    let domain = normalize_domain("mail.example.co.uk").unwrap();
    assert_eq!(domain.registrable(), "example.co.uk");
    assert_eq!(domain.tld(), "uk");

    let domain = normalize_domain("example.com").unwrap();
    assert_eq!(domain.registrable(), "example.com");
    assert_eq!(domain.tld(), "com");
}

#[test]
fn test_validate_hostname_reasons() {
    assert!(validate_hostname("zen.spamhaus.org").is_ok());
    assert!(validate_hostname("a-b.example").is_ok());
    assert!(validate_hostname("example.123").unwrap_err().contains("numeric"));
    assert!(validate_hostname("bad-.com").unwrap_err().contains("hyphen"));
    assert!(validate_hostname("a..b").unwrap_err().contains("empty label"));
    assert!(validate_hostname("single").unwrap_err().contains("two labels"));
}
