//! Output formatting for CLI

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
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

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{key}:"), value);
}

/// Print win/draw/loss counts with percentages
pub fn print_result(result: &TrainingResult) {
    let pct = |rate: f64| format!("{:.1}%", rate * 100.0);
    print_kv("Episodes", &format_number(result.total_episodes));
    print_kv(
        "Wins",
        &format!("{} ({})", format_number(result.wins), pct(result.win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", format_number(result.draws), pct(result.draw_rate)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", format_number(result.losses), pct(result.loss_rate)),
    );
    print_kv("Played as X", &format_number(result.played_as_x));
}
