// Shared test helpers: an in-process DNS backend and a local WHOIS registry.
//
// Nothing here touches the public network.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use domain_intel::dns::{DnsAnswer, DnsBackend};
use domain_intel::engine::FixedClock;
use domain_intel::Config;

/// Analysis time used by every integration test.
#[allow(dead_code)]
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
}

/// DNS backend answering from a table with a per-name delay.
///
/// Names not in the table answer `NoSuchName` immediately.
#[derive(Default)]
pub struct MockDns {
    answers: HashMap<String, (Duration, DnsAnswer)>,
}

#[allow(dead_code)]
impl MockDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, name: &str, answer: DnsAnswer) -> Self {
        self.delayed(name, Duration::ZERO, answer)
    }

    pub fn delayed(mut self, name: &str, delay: Duration, answer: DnsAnswer) -> Self {
        self.answers.insert(name.to_string(), (delay, answer));
        self
    }

    pub fn host(self, name: &str, ip: Ipv4Addr) -> Self {
        self.answer(name, DnsAnswer::Addresses(vec![ip]))
    }
}

#[async_trait]
impl DnsBackend for MockDns {
    async fn lookup_ipv4(&self, name: &str) -> DnsAnswer {
        match self.answers.get(name) {
            Some((delay, answer)) => {
                tokio::time::sleep(*delay).await;
                answer.clone()
            }
            None => DnsAnswer::NoSuchName,
        }
    }
}

/// What the mock registry sends back for one query.
#[allow(dead_code)]
pub enum RegistryReply {
    Text(String),
    /// Hold the connection open without answering
    Stall,
}

/// WHOIS server on a random local port; returns the port and the queries
/// received so far.
#[allow(dead_code)]
pub async fn spawn_registry<F>(reply: F) -> (u16, Arc<Mutex<Vec<String>>>)
where
    F: Fn(&str) -> RegistryReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let queries = Arc::new(Mutex::new(Vec::new()));
    let seen = queries.clone();
    let reply = Arc::new(reply);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let seen = seen.clone();
            let reply = reply.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(stream);
                let mut line = String::new();
                if reader.read_line(&mut line).await.is_err() {
                    return;
                }
                let query = line.trim_end().to_string();
                seen.lock().unwrap().push(query.clone());
                match reply(&query) {
                    RegistryReply::Text(text) => {
                        let mut stream = reader.into_inner();
                        let _ = stream.write_all(text.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                    RegistryReply::Stall => tokio::time::sleep(Duration::from_secs(30)).await,
                }
            });
        }
    });
    (port, queries)
}

/// Verisign-style record with a single creation date.
#[allow(dead_code)]
pub fn registry_record(domain: &str, created: &str) -> String {
    format!(
        "   Domain Name: {}\r\n   Updated Date: 2023-08-14T07:01:38Z\r\n   Creation Date: {created}\r\n   Registry Expiry Date: 2030-08-13T04:00:00Z\r\n",
        domain.to_uppercase()
    )
}

/// Config pointing the registry branch at a local mock on `port`.
#[allow(dead_code)]
pub fn local_config(port: u16, blocklists: &[&str]) -> Config {
    Config {
        blocklists: blocklists.iter().map(|b| b.to_string()).collect(),
        registry_host: Some("127.0.0.1".to_string()),
        whois_port: port,
        registry_timeout_secs: 1,
        dns_timeout_ms: 300,
        deadline_ms: 3_000,
        iana_discovery: false,
        ..Config::default()
    }
}
