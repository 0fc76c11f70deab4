// src/ui/components.rs

use crate::core::models::{Check, CipherSuiteMatrix, Grade, ScanResult, PROTOCOLS};
use chrono::{DateTime, Utc};
use ratatui::style::Color;
use serde_json::Value;
use std::collections::BTreeMap;

/// Visual class of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelClass {
    Success,
    Warning,
    Danger,
    Default,
}

/// Icon shown in a panel heading or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Ok,
    Exclamation,
    Remove,
    Question,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Ok => "✔",
            Icon::Exclamation => "!",
            Icon::Remove => "✘",
            Icon::Question => "?",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Icon::Ok => Color::Green,
            Icon::Exclamation => Color::Yellow,
            Icon::Remove => Color::Red,
            Icon::Question => Color::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    pub class: PanelClass,
    pub icon: Icon,
}

impl PanelStyle {
    pub fn for_grade(grade: Option<Grade>) -> Self {
        let (class, icon) = match grade {
            Some(Grade::Good) => (PanelClass::Success, Icon::Ok),
            Some(Grade::Warning) => (PanelClass::Warning, Icon::Exclamation),
            Some(Grade::Bad) => (PanelClass::Danger, Icon::Remove),
            _ => (PanelClass::Default, Icon::Question),
        };
        Self { class, icon }
    }

    pub fn border_color(&self) -> Color {
        match self.class {
            PanelClass::Success => Color::Green,
            PanelClass::Warning => Color::Yellow,
            PanelClass::Danger => Color::Red,
            PanelClass::Default => Color::Gray,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Check,
    Cross,
    Dash,
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Check => Icon::Ok.glyph(),
            Cell::Cross => Icon::Remove.glyph(),
            Cell::Dash => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGroup {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Table(Table),
    List(ListGroup),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub grade: Option<Grade>,
    pub title: String,
    pub body: Vec<String>,
    pub content: Option<PanelContent>,
}

impl Panel {
    fn new(grade: Option<Grade>, title: &str, body: &[&str]) -> Self {
        Self {
            grade,
            title: title.to_string(),
            body: body.iter().map(|line| line.to_string()).collect(),
            content: None,
        }
    }

    fn with_content(mut self, content: Option<PanelContent>) -> Self {
        self.content = content;
        self
    }

    pub fn style(&self) -> PanelStyle {
        PanelStyle::for_grade(self.grade)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub panels: Vec<Panel>,
}

impl Section {
    /// Builds a section only when at least one of its checks carries a grade.
    fn graded(heading: &str, graded: &[bool], panels: impl FnOnce() -> Vec<Panel>) -> Option<Self> {
        graded.iter().any(|g| *g).then(|| Section {
            heading: heading.to_string(),
            panels: panels(),
        })
    }
}

/// Everything shown below the scan form once a result is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub heading: String,
    pub sections: Vec<Section>,
}

pub fn results_view(scan: &ScanResult) -> ResultsView {
    let sections = [
        broad_section(scan),
        connectivity_section(scan),
        tls_session_section(scan),
        pki_section(scan),
        tls_handshake_section(scan),
    ]
    .into_iter()
    .flatten()
    .collect();

    ResultsView {
        heading: format!("Results for {}", scan.domain),
        sections,
    }
}

pub fn broad_section(scan: &ScanResult) -> Option<Section> {
    Section::graded("Broad", &[scan.intermediate_cas.is_graded()], || {
        vec![Panel::new(
            scan.intermediate_cas.grade,
            "Intermediate Certificate Authorities",
            &["There were no intermediate certificate authorities to verify."],
        )]
    })
}

pub fn connectivity_section(scan: &ScanResult) -> Option<Section> {
    let graded = [
        scan.dns_lookup.is_graded(),
        scan.tcp_dial.is_graded(),
        scan.tls_dial.is_graded(),
    ];
    Section::graded("Connectivity", &graded, || {
        vec![
            Panel::new(
                scan.dns_lookup.grade,
                "DNS Lookup",
                &["We were able to retrieve DNS records for the domain."],
            )
            .with_content(dns_addresses(&scan.dns_lookup)),
            Panel::new(
                scan.tcp_dial.grade,
                "TCP Dial",
                &["Checks that a TCP connection can be opened to the host."],
            ),
            Panel::new(
                scan.tls_dial.grade,
                "TLS Dial",
                &["Checks that a TLS handshake completes with the host."],
            ),
        ]
    })
}

pub fn tls_session_section(scan: &ScanResult) -> Option<Section> {
    Section::graded("TLS Session", &[scan.session_resume.is_graded()], || {
        vec![Panel::new(
            scan.session_resume.grade,
            "Session Resumption",
            &["Test to confirm if your server successfully resumes a TLS session."],
        )
        .with_content(
            scan.session_resume
                .output
                .as_ref()
                .map(|servers| PanelContent::Table(session_resume_table(servers))),
        )]
    })
}

pub fn pki_section(scan: &ScanResult) -> Option<Section> {
    let graded = [
        scan.chain_expiration.is_graded(),
        scan.chain_validation.is_graded(),
    ];
    Section::graded("Public-Key Infrastructure (PKI)", &graded, || {
        vec![
            Panel::new(
                scan.chain_expiration.grade,
                "Chain Expiration",
                &["The chain expiration date is the date on which the first certificate in the chain, for your server, intermediary, or root, expires."],
            )
            .with_content(scan.chain_expiration.output.as_deref().map(|expiry| {
                PanelContent::List(ListGroup { items: vec![format_expiration(expiry)] })
            })),
            Panel::new(
                scan.chain_validation.grade,
                "Chain Validation",
                &["Checks that the certificate chain verifies up to a trusted root."],
            )
            .with_content(validation_messages(&scan.chain_validation)),
        ]
    })
}

pub fn tls_handshake_section(scan: &ScanResult) -> Option<Section> {
    Section::graded("TLS Handshake", &[scan.cipher_suite.is_graded()], || {
        vec![Panel::new(
            scan.cipher_suite.grade,
            "Cipher Suite Matrix",
            &["Cipher suites the server accepted, per protocol version."],
        )
        .with_content(
            scan.cipher_suite
                .output
                .as_ref()
                .map(|matrix| PanelContent::Table(cipher_suite_table(matrix))),
        )]
    })
}

fn dns_addresses(check: &Check<Vec<String>>) -> Option<PanelContent> {
    check.output.as_ref().map(|addresses| {
        let mut items = addresses.clone();
        items.sort();
        PanelContent::List(ListGroup { items })
    })
}

fn validation_messages(check: &Check<Value>) -> Option<PanelContent> {
    let items = match check.output.as_ref()? {
        Value::String(text) if text.is_empty() => return None,
        Value::String(text) => vec![text.clone()],
        Value::Array(values) if values.is_empty() => return None,
        Value::Array(values) => values
            .iter()
            .map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::Bool(false) => return None,
        other => vec![other.to_string()],
    };
    Some(PanelContent::List(ListGroup { items }))
}

/// Servers sorted by address, each with a check or cross.
pub fn session_resume_table(servers: &BTreeMap<String, bool>) -> Table {
    Table {
        headers: vec!["Server".to_string(), "Supports TLS Resumption".to_string()],
        rows: servers
            .iter()
            .map(|(ip, supported)| {
                vec![
                    Cell::Text(ip.clone()),
                    if *supported { Cell::Check } else { Cell::Cross },
                ]
            })
            .collect(),
    }
}

/// One row per cipher, one column per protocol.
///
/// For plain protocol lists a listed TLS version is a check while a listed
/// SSL 3.0 is a cross: accepting a cipher on SSL 3.0 is itself a finding.
pub fn cipher_suite_table(matrix: &CipherSuiteMatrix) -> Table {
    use crate::core::models::CipherSupport;

    let mut headers = vec!["Cipher".to_string()];
    headers.extend(PROTOCOLS.iter().map(|p| p.to_string()));

    let rows = matrix
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![Cell::Text(row.cipher.clone())];
            cells.extend(PROTOCOLS.iter().map(|protocol| match &row.support {
                CipherSupport::Protocols(_) if !row.support.supports(protocol) => Cell::Dash,
                CipherSupport::Protocols(_) if *protocol == "SSL 3.0" => Cell::Cross,
                CipherSupport::Protocols(_) => Cell::Check,
                CipherSupport::PerProtocol(_) => row
                    .support
                    .first_label(protocol)
                    .map_or(Cell::Dash, |label| Cell::Text(label.to_string())),
            }));
            cells
        })
        .collect();

    Table { headers, rows }
}

/// Long-form UTC rendering of the chain expiry, e.g.
/// `Wednesday, January 2, 2030, 03:04:05 UTC`. Unparsable input is returned as is.
pub fn format_expiration(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(expiry) => expiry
            .with_timezone(&Utc)
            .format("%A, %B %-d, %Y, %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
