// src/core/view_model.rs

use crate::core::error::ScanError;
use crate::core::models::ScanResult;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

// Shared across view-model instances so a completion can never be mistaken
// for a request issued by a later instance.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// A scan the view-model wants run. The caller performs the fetch and hands
/// the outcome back through [`ScanViewModel::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTicket {
    pub id: u64,
    pub domain: String,
}

/// A finished fetch, as it travels back to the event loop.
#[derive(Debug)]
pub struct ScanCompletion {
    pub id: u64,
    pub outcome: Result<ScanResult, ScanError>,
}

/// The submit event of the scan form.
#[derive(Debug, Default)]
pub struct FormEvent {
    default_prevented: bool,
}

impl FormEvent {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// State behind the Scan page.
#[derive(Debug, Default)]
pub struct ScanViewModel {
    pub domain: String,
    loading: bool,
    result: Option<ScanResult>,
    error: Option<String>,
    latest_request: Option<u64>,
}

impl ScanViewModel {
    /// Fresh state for a page visit. A non-empty `domain` starts a scan right away.
    pub fn init(domain: Option<&str>) -> (Self, Option<ScanTicket>) {
        let mut vm = Self {
            domain: domain.unwrap_or_default().to_string(),
            ..Self::default()
        };
        let ticket = if vm.domain.trim().is_empty() {
            None
        } else {
            vm.scan(None)
        };
        (vm, ticket)
    }

    /// Submits the form. Ignored while a scan is loading, matching the
    /// disabled submit button.
    pub fn scan(&mut self, event: Option<&mut FormEvent>) -> Option<ScanTicket> {
        if let Some(event) = event {
            event.prevent_default();
        }
        if self.loading {
            debug!(domain = %self.domain, "Scan already in flight, ignoring submit.");
            return None;
        }

        let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        self.loading = true;
        self.result = None;
        self.error = None;
        self.latest_request = Some(id);
        info!(id, domain = %self.domain, "Scan requested.");

        Some(ScanTicket { id, domain: self.domain.clone() })
    }

    /// Applies a finished fetch. Only the most recent request may update the page.
    pub fn complete(&mut self, completion: ScanCompletion) -> bool {
        if self.latest_request != Some(completion.id) {
            debug!(id = completion.id, latest = ?self.latest_request, "Discarding stale scan response.");
            return false;
        }

        self.loading = false;
        match completion.outcome {
            Ok(result) => {
                info!(id = completion.id, domain = %result.domain, "Scan result stored.");
                self.result = Some(result);
            }
            Err(e) => {
                warn!(id = completion.id, error = %e, "Scan failed.");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(id: u64, domain: &str) -> ScanCompletion {
        ScanCompletion {
            id,
            outcome: Ok(ScanResult { domain: domain.to_string(), ..ScanResult::default() }),
        }
    }

    #[test]
    fn init_without_domain_is_idle() {
        let (vm, ticket) = ScanViewModel::init(None);
        assert!(ticket.is_none());
        assert!(!vm.loading());
        assert!(vm.result().is_none());
        assert_eq!(vm.domain, "");
    }

    #[test]
    fn init_with_domain_starts_scan() {
        let (vm, ticket) = ScanViewModel::init(Some("cfssl.org"));
        let ticket = ticket.unwrap();
        assert_eq!(ticket.domain, "cfssl.org");
        assert!(vm.loading());
    }

    #[test]
    fn submit_prevents_default_and_clears_previous_result() {
        let (mut vm, ticket) = ScanViewModel::init(Some("cfssl.org"));
        assert!(vm.complete(finished(ticket.unwrap().id, "cfssl.org")));
        assert!(vm.result().is_some());

        let mut event = FormEvent::default();
        let ticket = vm.scan(Some(&mut event)).unwrap();
        assert!(event.default_prevented());
        assert!(vm.loading());
        assert!(vm.result().is_none());

        assert!(vm.complete(finished(ticket.id, "cfssl.org")));
        assert!(!vm.loading());
        assert_eq!(vm.result().unwrap().domain, "cfssl.org");
    }

    #[test]
    fn submit_is_ignored_while_loading() {
        let (mut vm, _) = ScanViewModel::init(Some("cfssl.org"));
        let mut event = FormEvent::default();
        assert!(vm.scan(Some(&mut event)).is_none());
        assert!(event.default_prevented());
    }

    #[test]
    fn only_latest_request_updates_state() {
        let (mut vm, first) = ScanViewModel::init(Some("old.example"));
        let first = first.unwrap();
        // Simulate the first response being lost before a resubmit.
        vm.complete(ScanCompletion { id: first.id, outcome: Err(ScanError::EmptyDomain) });
        vm.domain = "new.example".to_string();
        let second = vm.scan(None).unwrap();
        assert!(second.id > first.id);

        assert!(!vm.complete(finished(first.id, "old.example")));
        assert!(vm.loading());
        assert!(vm.result().is_none());

        assert!(vm.complete(finished(second.id, "new.example")));
        assert_eq!(vm.result().unwrap().domain, "new.example");
    }

    #[test]
    fn failure_clears_loading_and_surfaces_message() {
        let (mut vm, ticket) = ScanViewModel::init(Some("cfssl.org"));
        vm.complete(ScanCompletion {
            id: ticket.unwrap().id,
            outcome: Err(ScanError::Rejected("host unreachable".to_string())),
        });
        assert!(!vm.loading());
        assert!(vm.result().is_none());
        assert_eq!(vm.error(), Some("Scan failed: host unreachable"));
    }

    #[test]
    fn new_instance_ignores_completions_for_old_one() {
        let (_old, ticket) = ScanViewModel::init(Some("cfssl.org"));
        let (mut fresh, _) = ScanViewModel::init(None);
        assert!(!fresh.complete(finished(ticket.unwrap().id, "cfssl.org")));
        assert!(fresh.result().is_none());
    }
}
