//! QAML-Z Demo Suite
//!
//! This crate provides end-to-end demonstrations of zoom-annealing
//! classifier training against the classical simulated-annealing sampler:
//!
//! - **Zoom training**: the full pipeline from synthetic dataset and
//!   covariance environment through the anneal/flip/select loop
//! - **Sampler baseline**: ground-state search on a hand-built Ising chain
//!
//! # Synthetic data
//!
//! Demos train on datasets from [`dataset::separable_dataset`]: weak-
//! classifier scores labelled by a hidden ±1 weight vector, with optional
//! label noise:
//!
//! ```ignore
//! use qamlz_demos::dataset::separable_dataset;
//! use qamlz_train::TrainEnv;
//!
//! let data = separable_dataset(64, 12, 0.0, 42);
//! let env = TrainEnv::new(data.x, data.y, 1)?;
//! ```

pub mod dataset;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for a known number of anneal steps.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {msg} |{bar:32.magenta/blue}| {pos:>3}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("=> "),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print a banner sized to the demo title.
pub fn print_header(title: &str) {
    let rule = "━".repeat(title.len() + 4);
    println!();
    println!("{}", style(&rule).magenta());
    println!("{}", style(format!("  {title}")).magenta().bold());
    println!("{}", style(&rule).magenta());
    println!();
}

/// Print a section marker.
pub fn print_section(title: &str) {
    println!();
    println!("{} {}", style("::").cyan().bold(), style(title).bold());
}

/// Print a labelled value, values aligned in a column.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    let label = format!("{label}:");
    println!("  {} {}", style(format!("{label:<24}")).dim(), value);
}

/// Print a success line.
pub fn print_success(message: &str) {
    println!("{}", style(format!("* {message}")).green());
}

/// Print a context line.
pub fn print_info(message: &str) {
    println!("{}", style(format!("- {message}")).dim());
}
