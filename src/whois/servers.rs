//! Registry server selection.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Authoritative WHOIS servers for common TLDs.
static REGISTRY_SERVERS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("com", "whois.verisign-grs.com"),
        ("net", "whois.verisign-grs.com"),
        ("org", "whois.pir.org"),
        ("info", "whois.nic.info"),
        ("biz", "whois.nic.biz"),
        ("io", "whois.nic.io"),
        ("co", "whois.nic.co"),
        ("me", "whois.nic.me"),
        ("tv", "whois.nic.tv"),
        ("cc", "ccwhois.verisign-grs.com"),
        ("app", "whois.nic.google"),
        ("dev", "whois.nic.google"),
        ("xyz", "whois.nic.xyz"),
        ("online", "whois.nic.online"),
        ("site", "whois.nic.site"),
        ("top", "whois.nic.top"),
        ("us", "whois.nic.us"),
        ("uk", "whois.nic.uk"),
        ("de", "whois.denic.de"),
        ("fr", "whois.nic.fr"),
        ("nl", "whois.domain-registry.nl"),
        ("eu", "whois.eu"),
        ("ca", "whois.cira.ca"),
        ("au", "whois.auda.org.au"),
        ("jp", "whois.jprs.jp"),
        ("cn", "whois.cnnic.cn"),
        ("ru", "whois.tcinet.ru"),
        ("br", "whois.registro.br"),
        ("in", "whois.registry.in"),
        ("it", "whois.nic.it"),
        ("ch", "whois.nic.ch"),
        ("se", "whois.iis.se"),
    ])
});

/// Looks up the statically known registry for `tld`.
pub(crate) fn known_registry(tld: &str) -> Option<&'static str> {
    REGISTRY_SERVERS.get(tld.to_ascii_lowercase().as_str()).copied()
}

/// Extracts the delegated WHOIS server from an IANA TLD record.
///
/// IANA answers carry `refer:` (preferred) and `whois:` lines; either may be
/// missing or empty for TLDs without a public WHOIS service.
pub(crate) fn parse_iana_referral(text: &str) -> Option<String> {
    let mut whois = None;
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "refer" => return Some(value.to_ascii_lowercase()),
            "whois" if whois.is_none() => whois = Some(value.to_ascii_lowercase()),
            _ => {}
        }
    }
    whois
}
