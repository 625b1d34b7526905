//! Output formatting for CLI

use std::time::Duration;

use crate::pipeline::MetricsSummary;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a duration as seconds with millisecond precision
pub fn format_duration(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the headline numbers of a training run
pub fn print_metrics_summary(summary: &MetricsSummary) {
    print_kv("Episodes", &format_number(summary.episodes));
    print_kv(
        "Successes",
        &format!(
            "{} ({:.1}%)",
            format_number(summary.successes),
            summary.success_rate * 100.0
        ),
    );
    print_kv("Failures", &format_number(summary.failures));
    print_kv("Mean reward", &format!("{:.4}", summary.mean_reward));
    print_kv("Mean steps", &format!("{:.1}", summary.mean_steps));
}
