//! Navigator for a terminal session
//!
//! There is no router in the terminal, so routes are logged and remembered
//! for the summary printed on exit.

use log::info;
use mail3::{Navigator, Route};
use std::sync::Mutex;

#[derive(Default)]
pub struct LogNavigator {
    history: Mutex<Vec<String>>,
}

impl LogNavigator {
    /// Paths navigated to, with "back" for history pops
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    fn push(&self, entry: String) {
        if let Ok(mut history) = self.history.lock() {
            history.push(entry);
        }
    }
}

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        let path = route.path();
        info!("Navigate to {}", path);
        self.push(path);
    }

    fn back(&self) {
        info!("Navigate back");
        self.push("back".to_string());
    }
}
