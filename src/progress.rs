//! Progress bar wiring for the collection loop.

use indicatif::{ProgressBar, ProgressStyle};

use jobharvest_core::ProgressSink;

/// An indicatif bar sized to the requested job count.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(target: usize) -> Self {
        let bar = ProgressBar::new(target as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} jobs ({elapsed})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// Finishes the bar, leaving it on screen.
    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl ProgressSink for BarProgress {
    fn on_progress(&self, collected: usize, _target: usize) {
        self.bar.set_position(collected as u64);
    }
}
