//! Progress bar and console output utilities.
//!
//! Per-file lines go through [`Console`] so they print above the progress
//! bar instead of tearing it. In log-only mode the bar is hidden and lines
//! are written straight to stdout/stderr for tail-friendly output.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}";

/// Elapsed time for the summary banner: `850ms`, `12.3s`, `2m 05s`.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    match millis {
        0..=999 => format!("{millis}ms"),
        1_000..=59_999 => format!("{:.1}s", d.as_secs_f64()),
        _ => {
            let secs = d.as_secs();
            format!("{}m {:02}s", secs / 60, secs % 60)
        }
    }
}

/// Line output that cooperates with an optional progress bar.
pub struct Console {
    pb: ProgressBar,
}

impl Console {
    /// Bar over `len` files; hidden entirely in log-only mode.
    pub fn new(len: u64, msg: &str, log_only: bool) -> Self {
        let pb = if log_only {
            ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden())
        } else {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        };
        pb.set_message(msg.to_string());
        Self { pb }
    }

    pub fn is_log_only(&self) -> bool {
        self.pb.is_hidden()
    }

    /// One more file handled.
    pub fn advance(&self) {
        self.pb.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    /// Print a line to stdout.
    pub fn line(&self, msg: &str) {
        if self.is_log_only() {
            println!("{msg}");
        } else {
            self.pb.println(msg);
        }
    }

    /// Print a line to stderr.
    pub fn error(&self, msg: &str) {
        self.pb.suspend(|| eprintln!("{msg}"));
    }

    pub fn finish(&self, msg: String) {
        self.pb.finish_with_message(msg);
    }
}
