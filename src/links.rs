//! Opening outbound links (project repos, live demos, social profiles).

use std::cell::RefCell;
use std::rc::Rc;

/// Something that can open a URL outside the scene.
pub trait LinkOpener {
    /// Fire and forget; failures are logged, never surfaced.
    fn open(&mut self, url: &str);
}

/// Opens links in the system browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) {
        log::info!("opening {}", url);
        if let Err(e) = open::that(url) {
            log::warn!("failed to open {}: {}", url, e);
        }
    }
}

/// Remembers every URL instead of opening it. Clones share the log.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}
