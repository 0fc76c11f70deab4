// src/core/models.rs

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

// --- Grades ---

/// Qualitative outcome of a single server-side check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Grade {
    Good,
    Warning,
    Bad,
    Unknown,
}

impl Grade {
    /// Maps the API's grade string. Anything unrecognised becomes `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Good" => Grade::Good,
            "Warning" => Grade::Warning,
            "Bad" => Grade::Bad,
            _ => Grade::Unknown,
        }
    }
}

// Missing, null and empty grades all count as "no grade".
fn deserialize_grade<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|label| !label.is_empty())
        .map(|label| Grade::from_label(&label)))
}

/// One check of a scan: a grade plus whatever the check produced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Check<T> {
    #[serde(default, deserialize_with = "deserialize_grade")]
    pub grade: Option<Grade>,
    pub output: Option<T>,
}

impl<T> Default for Check<T> {
    fn default() -> Self {
        Self { grade: None, output: None }
    }
}

// A check reported as `null` reads the same as one left out.
fn check_or_default<'de, D, T>(deserializer: D) -> Result<Check<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Check<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<T> Check<T> {
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}

// --- Cipher suite matrix ---

/// The protocol columns of the cipher suite matrix, in display order.
pub const PROTOCOLS: [&str; 4] = ["TLS 1.2", "TLS 1.1", "TLS 1.0", "SSL 3.0"];

/// What the server reported for one cipher.
///
/// The API sends one of two untagged shapes; the variant is decided once here,
/// at the deserialisation boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CipherSupport {
    /// Names of the protocols the cipher was accepted on.
    Protocols(Vec<String>),
    /// One object per protocol, each mapping the protocol name to its labels
    /// (typically the negotiated curves).
    PerProtocol(Vec<BTreeMap<String, Option<Vec<String>>>>),
}

impl CipherSupport {
    pub fn supports(&self, protocol: &str) -> bool {
        match self {
            CipherSupport::Protocols(names) => names.iter().any(|name| name == protocol),
            CipherSupport::PerProtocol(_) => self.first_label(protocol).is_some(),
        }
    }

    /// First non-empty label recorded for `protocol`, if any.
    pub fn first_label(&self, protocol: &str) -> Option<&str> {
        match self {
            CipherSupport::Protocols(_) => None,
            CipherSupport::PerProtocol(entries) => entries
                .iter()
                .find_map(|entry| entry.get(protocol))
                .and_then(|labels| labels.as_ref())
                .and_then(|labels| labels.first())
                .map(String::as_str)
                .filter(|label| !label.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CipherRow {
    pub cipher: String,
    pub support: CipherSupport,
}

/// Rows of the cipher suite matrix, in the order the server listed them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Vec<BTreeMap<String, CipherSupport>>")]
pub struct CipherSuiteMatrix {
    pub rows: Vec<CipherRow>,
}

impl From<Vec<BTreeMap<String, CipherSupport>>> for CipherSuiteMatrix {
    fn from(entries: Vec<BTreeMap<String, CipherSupport>>) -> Self {
        let rows = entries
            .into_iter()
            .flat_map(|entry| entry.into_iter())
            .map(|(cipher, support)| CipherRow { cipher, support })
            .collect();
        Self { rows }
    }
}

// --- Scan result ---

/// A completed scan, flattened from the API's nested sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanResult {
    pub domain: String,
    pub intermediate_cas: Check<Value>,
    pub dns_lookup: Check<Vec<String>>,
    pub tcp_dial: Check<Value>,
    pub tls_dial: Check<Value>,
    pub chain_expiration: Check<String>,
    pub chain_validation: Check<Value>,
    pub cipher_suite: Check<CipherSuiteMatrix>,
    pub session_resume: Check<BTreeMap<String, bool>>,
}

impl ScanResult {
    /// Builds the display model from the `result` object of a successful
    /// envelope. `Broad` may be absent; the other sections are required.
    pub fn from_api(domain: &str, result: Value) -> Result<Self, serde_json::Error> {
        let raw: RawScanResult = serde_json::from_value(result)?;
        Ok(Self {
            domain: domain.to_string(),
            intermediate_cas: raw.broad.unwrap_or_default().intermediate_cas,
            dns_lookup: raw.connectivity.dns_lookup,
            tcp_dial: raw.connectivity.tcp_dial,
            tls_dial: raw.connectivity.tls_dial,
            chain_expiration: raw.pki.chain_expiration,
            chain_validation: raw.pki.chain_validation,
            cipher_suite: raw.tls_handshake.cipher_suite,
            session_resume: raw.tls_session.session_resume,
        })
    }
}

// --- Wire format ---

/// The response envelope every CFSSL API endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

/// Joins API messages or errors into one human readable line.
///
/// CFSSL reports these as `{code, message}` objects; plain strings are also
/// accepted, and anything else is shown as compact JSON.
pub fn join_messages(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            Value::Object(fields) => match fields.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => value.to_string(),
            },
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Default, Deserialize)]
struct RawBroad {
    #[serde(rename = "IntermediateCAs", default, deserialize_with = "check_or_default")]
    intermediate_cas: Check<Value>,
}

#[derive(Debug, Deserialize)]
struct RawConnectivity {
    #[serde(rename = "DNSLookup", default, deserialize_with = "check_or_default")]
    dns_lookup: Check<Vec<String>>,
    #[serde(rename = "TCPDial", default, deserialize_with = "check_or_default")]
    tcp_dial: Check<Value>,
    #[serde(rename = "TLSDial", default, deserialize_with = "check_or_default")]
    tls_dial: Check<Value>,
}

#[derive(Debug, Deserialize)]
struct RawPki {
    #[serde(rename = "ChainExpiration", default, deserialize_with = "check_or_default")]
    chain_expiration: Check<String>,
    #[serde(rename = "ChainValidation", default, deserialize_with = "check_or_default")]
    chain_validation: Check<Value>,
}

#[derive(Debug, Deserialize)]
struct RawTlsHandshake {
    #[serde(rename = "CipherSuite", default, deserialize_with = "check_or_default")]
    cipher_suite: Check<CipherSuiteMatrix>,
}

#[derive(Debug, Deserialize)]
struct RawTlsSession {
    #[serde(rename = "SessionResume", default, deserialize_with = "check_or_default")]
    session_resume: Check<BTreeMap<String, bool>>,
}

#[derive(Debug, Deserialize)]
struct RawScanResult {
    #[serde(rename = "Broad", default)]
    broad: Option<RawBroad>,
    #[serde(rename = "Connectivity")]
    connectivity: RawConnectivity,
    #[serde(rename = "PKI")]
    pki: RawPki,
    #[serde(rename = "TLSHandshake")]
    tls_handshake: RawTlsHandshake,
    #[serde(rename = "TLSSession")]
    tls_session: RawTlsSession,
}
