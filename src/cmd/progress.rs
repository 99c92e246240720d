//! Simulated compile progress
//!
//! The transform itself is instant; the progress bar only paces the CLI
//! the way the interactive tool did. It never delays `--json` output.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::thread;
use std::time::Duration;

/// Stage labels shown while compiling
pub const STAGES: [&str; 5] = [
    "Analyzing code...",
    "Applying obfuscation...",
    "Encrypting strings...",
    "Finalizing...",
    "Complete!",
];

/// Whether the progress bar should run
pub fn enabled(animations: bool, delay_ms: u64, no_progress: bool, json: bool) -> bool {
    animations && delay_ms > 0 && !no_progress && !json
}

/// Step through [`STAGES`] over `delay_ms`, drawing to stderr
pub fn simulate(delay_ms: u64) {
    run(delay_ms, ProgressDrawTarget::stderr());
}

fn run(delay_ms: u64, target: ProgressDrawTarget) {
    let pb = ProgressBar::with_draw_target(Some(100), target);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }

    let step = Duration::from_millis(delay_ms / STAGES.len() as u64);
    for (i, label) in STAGES.iter().enumerate() {
        pb.set_message(*label);
        pb.set_position(((i + 1) * 100 / STAGES.len()) as u64);
        thread::sleep(step);
    }
    pb.finish_and_clear();
}
