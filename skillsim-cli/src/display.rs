//! Indicatif-based progress display for one dialog turn.

use indicatif::{ProgressBar, ProgressStyle};
use skillsim_core::TurnObserver;
use std::time::Duration;

/// Spinner shown while a turn is being simulated.
///
/// Started before submit, relabeled once the simulation id is known, and
/// always finished before any caption or error is printed.
pub struct TurnSpinner {
    bar: ProgressBar,
}

impl TurnSpinner {
    /// Start the spinner with its pre-submit label.
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message("Simulating your utterance...");
        Self { bar }
    }

    /// Stop and erase the spinner.
    pub fn finish(self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl TurnObserver for TurnSpinner {
    fn on_submitted(&mut self, simulation_id: &str) {
        self.bar.set_message(format!(
            "Simulation {} submitted, waiting for the result...",
            simulation_id
        ));
    }
}
