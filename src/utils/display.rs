//! Console rendering shared by the binaries.

use crate::core::percentile;
use crate::domain::model::QualifyingOfferReport;

/// `$1,234,567.89` style, with `decimals` fraction digits.
pub fn format_currency(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{}${}.{}", sign, grouped, fraction),
        None => format!("{}${}", sign, grouped),
    }
}

pub fn print_summary(report: &QualifyingOfferReport, show_top: usize) {
    let stats = &report.statistics;
    let line = "=".repeat(60);

    println!("{}", line);
    println!("QUALIFYING OFFER: {}", format_currency(stats.qualifying_offer, 2));
    println!("{}", line);
    println!("  Median salary:  {}", format_currency(stats.median_salary, 2));
    println!("  Salary spread:  {}", format_currency(stats.salary_spread, 2));
    println!(
        "  Highest:        {} ({})",
        format_currency(stats.highest_salary.salary, 0),
        stats.highest_salary.player
    );
    println!(
        "  Cutoff (#{}):  {} ({})",
        stats.top_125.len(),
        format_currency(stats.cutoff_salary.salary, 0),
        stats.cutoff_salary.player
    );
    println!(
        "  Rows: {} total, {} valid, {} invalid",
        report.total_rows, stats.valid_salaries, stats.invalid_salaries
    );

    if show_top > 0 {
        println!();
        println!("Top {} Players:", show_top.min(stats.top_125.len()));
        println!("{}", "-".repeat(60));
        for (rank, record) in stats.top_125.iter_ranked().take(show_top) {
            println!(
                "{:>3}. {:<30} {:>15}",
                rank,
                record.player,
                format_currency(record.salary, 0)
            );
        }
    }

    println!();
    println!("Salary distribution:");
    for bucket in &report.distribution {
        println!("  {:<12} {:>4}", bucket.label, bucket.count);
    }
}

pub fn print_percentile(report: &QualifyingOfferReport, query: &str) {
    match percentile::lookup_str(&report.statistics.top_125, query) {
        Some(result) => println!(
            "🎯 {} would rank #{} ({:.1}th percentile of the top {})",
            query,
            result.rank,
            result.percentile,
            report.statistics.top_125.len()
        ),
        None => println!("⚠️  '{}' is not a positive salary, skipped", query),
    }
}
