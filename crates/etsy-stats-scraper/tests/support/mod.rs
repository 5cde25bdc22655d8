//! Scripted in-memory browser for driving the scraper without Chrome.
//!
//! Pages are keyed by URL. Each page is a list of views; clicking an
//! "advancing" node moves to the next view, the way a paginated table
//! re-renders. Selectors are matched as exact strings, so fixtures are built
//! from the crate's own selector constants. Handles from an earlier view or
//! an earlier page are stale.

#![allow(dead_code)]

pub mod etsy;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use etsy_stats_core::RecordFailurePolicy;
use etsy_stats_scraper::{
    Browser, BrowserError, DelayPolicy, Element, EtsyScraper, ScrapeSettings,
};

#[derive(Clone, Default)]
pub struct FakeNode {
    text: String,
    attrs: HashMap<String, String>,
    hidden: bool,
    disabled: bool,
    selected: bool,
    advances: bool,
    children: HashMap<String, Vec<FakeNode>>,
    stale_reads: Arc<AtomicUsize>,
}

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_owned(), value.into());
        self
    }

    pub fn with_child(mut self, selector: impl Into<String>, child: FakeNode) -> Self {
        self.children.entry(selector.into()).or_default().push(child);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Clicking this node turns the current page to its next view.
    pub fn advancing(mut self) -> Self {
        self.advances = true;
        self
    }

    /// The first `reads` reads through any handle to this node fail stale.
    pub fn stale_for(self, reads: usize) -> Self {
        self.stale_reads.store(reads, Ordering::SeqCst);
        self
    }
}

#[derive(Clone, Default)]
pub struct FakeView {
    nodes: HashMap<String, Vec<FakeNode>>,
}

impl FakeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, selector: impl Into<String>, node: FakeNode) -> Self {
        self.nodes.entry(selector.into()).or_default().push(node);
        self
    }

    pub fn with_all(mut self, selector: impl Into<String>, nodes: Vec<FakeNode>) -> Self {
        self.nodes.entry(selector.into()).or_default().extend(nodes);
        self
    }
}

#[derive(Clone, Default)]
pub struct FakePage {
    views: Vec<FakeView>,
    render_after: usize,
}

impl FakePage {
    pub fn new(view: FakeView) -> Self {
        Self::paged(vec![view])
    }

    pub fn paged(views: Vec<FakeView>) -> Self {
        Self {
            views,
            render_after: 0,
        }
    }

    /// The first `queries` lookups after navigation see an empty document.
    pub fn render_after(mut self, queries: usize) -> Self {
        self.render_after = queries;
        self
    }
}

struct LoadedPage {
    page: FakePage,
    view: usize,
    pending_queries: usize,
}

#[derive(Default)]
struct State {
    pages: HashMap<String, FakePage>,
    failing: HashMap<String, String>,
    current: Option<LoadedPage>,
    generation: u64,
    visited: Vec<String>,
    clicks: usize,
}

#[derive(Clone, Default)]
pub struct FakeBrowser {
    state: Arc<Mutex<State>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, page: FakePage) -> Self {
        self.state.lock().unwrap().pages.insert(url.into(), page);
        self
    }

    /// Navigating to `url` fails like a dropped WebDriver session.
    pub fn failing_at(self, url: impl Into<String>, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(url.into(), message.to_owned());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    pub fn clicks(&self) -> usize {
        self.state.lock().unwrap().clicks
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.failing.get(url) {
            return Err(BrowserError::Command(message.clone()));
        }
        state.visited.push(url.to_owned());
        state.generation += 1;
        let page = state.pages.get(url).cloned().unwrap_or_default();
        state.current = Some(LoadedPage {
            pending_queries: page.render_after,
            page,
            view: 0,
        });
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<FakeElement>, BrowserError> {
        let mut state = self.state.lock().unwrap();
        let generation = state.generation;
        let Some(current) = state.current.as_mut() else {
            return Ok(Vec::new());
        };
        if current.pending_queries > 0 {
            current.pending_queries -= 1;
            return Ok(Vec::new());
        }
        let nodes = current
            .page
            .views
            .get(current.view)
            .and_then(|view| view.nodes.get(xpath))
            .cloned()
            .unwrap_or_default();
        Ok(nodes
            .into_iter()
            .map(|node| FakeElement {
                state: Arc::clone(&self.state),
                node,
                generation,
            })
            .collect())
    }
}

pub struct FakeElement {
    state: Arc<Mutex<State>>,
    node: FakeNode,
    generation: u64,
}

impl FakeElement {
    fn check(&self) -> Result<(), BrowserError> {
        if self.state.lock().unwrap().generation != self.generation {
            return Err(BrowserError::Stale);
        }
        let remaining = self.node.stale_reads.load(Ordering::SeqCst);
        if remaining > 0 {
            self.node.stale_reads.store(remaining - 1, Ordering::SeqCst);
            return Err(BrowserError::Stale);
        }
        Ok(())
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn text(&self) -> Result<String, BrowserError> {
        self.check()?;
        Ok(self.node.text.clone())
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, BrowserError> {
        self.check()?;
        Ok(self.node.attrs.get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool, BrowserError> {
        self.check()?;
        Ok(!self.node.hidden)
    }

    async fn is_enabled(&self) -> Result<bool, BrowserError> {
        self.check()?;
        Ok(!self.node.disabled)
    }

    async fn is_selected(&self) -> Result<bool, BrowserError> {
        self.check()?;
        Ok(self.node.selected)
    }

    async fn click(&self) -> Result<(), BrowserError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        if self.node.advances {
            if let Some(current) = state.current.as_mut() {
                if current.view + 1 < current.page.views.len() {
                    current.view += 1;
                }
            }
            state.generation += 1;
        }
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<FakeElement>, BrowserError> {
        self.check()?;
        Ok(self
            .node
            .children
            .get(xpath)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|node| FakeElement {
                state: Arc::clone(&self.state),
                node,
                generation: self.generation,
            })
            .collect())
    }
}

/// Short deadlines so failing waits finish quickly.
pub fn fast_settings() -> ScrapeSettings {
    ScrapeSettings {
        wait_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(5),
        stale_retries: 3,
        max_pages: 20,
        record_failure_policy: RecordFailurePolicy::Skip,
    }
}

pub fn scraper(browser: &FakeBrowser, settings: ScrapeSettings) -> EtsyScraper<'_, FakeBrowser> {
    EtsyScraper::new(browser, settings, DelayPolicy::none())
}
