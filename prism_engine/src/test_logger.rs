//! Capturing logger shared by the unit tests
//!
//! Entries are tagged with the thread that logged them so a test only sees
//! its own diagnostics even when other tests log concurrently.

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use crate::engine::Engine;
use crate::log::{LogEntry, Logger};

type Captured = Arc<Mutex<Vec<(ThreadId, LogEntry)>>>;

struct CapturingLogger {
    entries: Captured,
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push((thread::current().id(), entry.clone()));
    }
}

/// Installs a capturing logger; restores the default logger on drop
pub struct LogCapture {
    entries: Captured,
}

impl LogCapture {
    pub fn install() -> Self {
        let entries: Captured = Arc::new(Mutex::new(Vec::new()));
        Engine::set_logger(CapturingLogger { entries: entries.clone() });
        Self { entries }
    }

    /// Entries logged by the calling thread
    pub fn entries(&self) -> Vec<LogEntry> {
        let me = thread::current().id();
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == me)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        Engine::reset_logger();
    }
}
