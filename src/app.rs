// src/app.rs

use crate::core::view_model::{FormEvent, ScanCompletion, ScanTicket, ScanViewModel};
use crate::router::Route;
use ratatui::widgets::ScrollbarState;
use tracing::{debug, info};
use url::Url;

pub const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The page currently on screen, with whatever state it owns.
#[derive(Debug)]
pub enum Page {
    Home,
    Scan(ScanViewModel),
}

pub struct App {
    pub should_quit: bool,
    pub route: Route,
    pub page: Page,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
    pub spinner_frame: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            route: Route::Home,
            page: Page::Home,
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
            spinner_frame: 0,
        }
    }

    /// Replaces the current page. Entering a scan route with a domain
    /// returns the scan to start.
    pub fn navigate(&mut self, route: Route) -> Option<ScanTicket> {
        info!(route = %route, "Navigating.");
        let ticket = match &route {
            Route::Home => {
                self.page = Page::Home;
                None
            }
            Route::Scan { domain } => {
                let (vm, ticket) = ScanViewModel::init(domain.as_deref());
                self.page = Page::Scan(vm);
                ticket
            }
        };
        self.route = route;
        self.reset_scroll();
        ticket
    }

    /// Cycles through the nav bar entries.
    pub fn next_tab(&mut self) -> Option<ScanTicket> {
        match self.route {
            Route::Home => self.navigate(Route::Scan { domain: None }),
            Route::Scan { .. } => self.navigate(Route::Home),
        }
    }

    /// Submits the scan form with the host currently typed in.
    pub fn submit_scan(&mut self) -> Option<ScanTicket> {
        let Page::Scan(vm) = &mut self.page else {
            return None;
        };
        vm.domain = normalize_host(&vm.domain);
        let mut event = FormEvent::default();
        let ticket = vm.scan(Some(&mut event));
        debug!(prevented = event.default_prevented(), "Scan form submitted.");
        if ticket.is_some() {
            self.reset_scroll();
        }
        ticket
    }

    pub fn complete_scan(&mut self, completion: ScanCompletion) {
        match &mut self.page {
            Page::Scan(vm) => {
                vm.complete(completion);
            }
            Page::Home => debug!(id = completion.id, "Scan finished after leaving the page."),
        }
    }

    pub fn scan_view_model(&self) -> Option<&ScanViewModel> {
        match &self.page {
            Page::Scan(vm) => Some(vm),
            Page::Home => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Page::Scan(vm) = &mut self.page {
            vm.domain.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Page::Scan(vm) = &mut self.page {
            vm.domain.pop();
        }
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    /// Caps the offset at `max_offset` and sizes the scrollbar to match.
    pub fn clamp_scroll(&mut self, content_length: usize, max_offset: usize) {
        self.scroll_offset = self.scroll_offset.min(max_offset);
        self.report_scroll_state = self
            .report_scroll_state
            .content_length(content_length)
            .position(self.scroll_offset);
    }

    pub fn on_tick(&mut self) {
        if self.scan_view_model().is_some_and(|vm| vm.loading()) {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
    }
}

/// Reduces whatever was typed (a bare host, `host:port` or a URL) to the
/// `host[:port]` the scan endpoint expects.
pub fn normalize_host(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    Url::parse(&with_scheme)
        .ok()
        .and_then(|url| {
            let host = url.host_str()?.to_string();
            Some(match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host,
            })
        })
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ScanResult;

    #[test]
    fn normalizes_typed_hosts() {
        assert_eq!(normalize_host("  cfssl.org "), "cfssl.org");
        assert_eq!(normalize_host("https://cfssl.org/scan?x=1"), "cfssl.org");
        assert_eq!(normalize_host("cfssl.org:8443"), "cfssl.org:8443");
        assert_eq!(normalize_host("http://cfssl.org:8080"), "cfssl.org:8080");
        assert_eq!(normalize_host(""), "");
    }

    #[test]
    fn scan_route_with_domain_auto_scans() {
        let mut app = App::new();
        let ticket = app.navigate(Route::Scan { domain: Some("cfssl.org".to_string()) });
        assert_eq!(ticket.map(|t| t.domain), Some("cfssl.org".to_string()));
        assert!(app.scan_view_model().unwrap().loading());
    }

    #[test]
    fn typing_and_submitting() {
        let mut app = App::new();
        assert!(app.next_tab().is_none());
        for c in "https://cfssl.orgx".chars() {
            app.push_char(c);
        }
        app.pop_char();
        let ticket = app.submit_scan().unwrap();
        assert_eq!(ticket.domain, "cfssl.org");
        assert_eq!(app.scan_view_model().unwrap().domain, "cfssl.org");

        app.complete_scan(ScanCompletion {
            id: ticket.id,
            outcome: Ok(ScanResult { domain: ticket.domain.clone(), ..ScanResult::default() }),
        });
        let vm = app.scan_view_model().unwrap();
        assert!(!vm.loading());
        assert!(vm.result().is_some());
    }

    #[test]
    fn leaving_the_page_drops_scan_state() {
        let mut app = App::new();
        let ticket = app.navigate(Route::Scan { domain: Some("cfssl.org".to_string()) }).unwrap();
        app.navigate(Route::Home);
        assert!(app.scan_view_model().is_none());

        app.complete_scan(ScanCompletion {
            id: ticket.id,
            outcome: Ok(ScanResult::default()),
        });
        app.navigate(Route::Scan { domain: None });
        assert!(app.scan_view_model().unwrap().result().is_none());
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut app = App::new();
        app.scroll_down(10);
        app.clamp_scroll(20, 4);
        assert_eq!(app.scroll_offset, 4);
        app.scroll_up(10);
        assert_eq!(app.scroll_offset, 0);
    }
}
