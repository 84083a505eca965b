use prodsec_query::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter for testing that captures messages
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn start(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("start: {}", message));
    }

    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn finish(&self) {
        self.messages.lock().unwrap().push("finish".to_string());
    }
}
