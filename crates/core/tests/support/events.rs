use std::sync::Mutex;

use registrar_core::{EventLevel, EventSink};

/// Event sink that keeps every recorded message for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(EventLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.lock().unwrap().iter().map(|(_, message)| message.clone()).collect()
    }

    pub fn count(&self, level: EventLevel) -> usize {
        self.events.lock().unwrap().iter().filter(|(lvl, _)| *lvl == level).count()
    }

    /// Messages at `level` that mention `needle`.
    pub fn matching(&self, level: EventLevel, needle: &str) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(lvl, message)| *lvl == level && message.contains(needle))
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, level: EventLevel, message: &str) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}
