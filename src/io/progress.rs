//! Per-solve progress display driven by search progress events

use crate::algorithm::search::ProgressEvent;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Coordinates spinner display for batch solves
///
/// One spinner is active at a time; the search core feeds it a snapshot
/// every few thousand decision nodes.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    active: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            active: None,
        }
    }

    /// Begin a spinner for one problem
    pub fn start_solve(&mut self, name: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SOLVE_STYLE.clone());
        bar.set_prefix(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.active = Some(self.multi_progress.add(bar));
    }

    /// Update the active spinner from a search progress event
    pub fn update(&self, event: ProgressEvent) {
        if let Some(bar) = &self.active {
            bar.set_message(format!(
                "{} nodes, {} layouts",
                event.nodes, event.found
            ));
        }
    }

    /// Finish the active spinner with a closing message
    pub fn finish_solve(&mut self, message: &str) {
        if let Some(bar) = self.active.take() {
            bar.finish_with_message(message.to_string());
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
