use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// StderrProgressReporter adapter showing a spinner on stderr
///
/// Uses indicatif, which hides the spinner when stderr is not a terminal.
pub struct StderrProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn start(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn report(&self, message: &str) {
        if let Ok(slot) = self.spinner.lock() {
            if let Some(spinner) = slot.as_ref() {
                spinner.set_message(message.to_string());
            }
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

/// SilentProgressReporter adapter used when output is redirected or muted
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&self, _message: &str) {}

    fn report(&self, _message: &str) {}

    fn finish(&self) {}
}
