//! Spinner shown while a history is analyzed.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a steady-ticking spinner with `message`. Call `finish_and_clear` when done.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
