//! Human-readable rendering of comparison results.
//!
//! Belief-update estimates are fractions and are scaled by 100 here, for
//! display only. The averages are already on the percentage scale.

use dnacompare_config::SortOrder;
use dnacompare_engine::group::ServiceGroup;
use dnacompare_engine::{Comparison, Estimates, Method};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub precision: usize,
    pub sort: SortOrder,
}

/// Pad `s` on the right to `width` display columns (CJK-aware).
fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

/// Format one estimate as a percentage string.
pub fn format_estimate(method: Method, value: f64, precision: usize) -> String {
    let pct = if method.is_fraction() { value * 100.0 } else { value };
    format!("{pct:.precision$}%")
}

fn sorted_rows(estimates: &Estimates, sort: SortOrder) -> Vec<(&str, f64)> {
    let mut rows: Vec<(&str, f64)> = estimates.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    if sort == SortOrder::Value {
        // Stable: ties keep alphabetical order.
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    }
    rows
}

/// All three method sections, separated by blank lines.
pub fn render_comparison(comparison: &Comparison, options: &DisplayOptions) -> String {
    let label_width = comparison
        .ethnicities()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);

    let sections: Vec<String> = Method::ALL
        .iter()
        .map(|&method| render_section(method, comparison.estimates(method), label_width, options))
        .collect();
    sections.join("\n")
}

/// Only the two average sections, for input the belief update rejects.
pub fn render_averages(average: &Estimates, weighted_average: &Estimates, options: &DisplayOptions) -> String {
    let label_width = average
        .keys()
        .map(|k| UnicodeWidthStr::width(k.as_str()))
        .max()
        .unwrap_or(0);

    [(Method::Average, average), (Method::WeightedAverage, weighted_average)]
        .iter()
        .map(|&(method, estimates)| render_section(method, estimates, label_width, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_section(method: Method, estimates: &Estimates, label_width: usize, options: &DisplayOptions) -> String {
    let mut out = format!("{}:\n", method.title());
    if estimates.is_empty() {
        out.push_str("  (no observations)\n");
        return out;
    }
    for (ethnicity, value) in sorted_rows(estimates, options.sort) {
        out.push_str(&format!(
            "  {}  {:>width$}\n",
            pad_right(ethnicity, label_width),
            format_estimate(method, value, options.precision),
            width = options.precision + 5,
        ));
    }
    out
}

/// Services in canonical (first-seen) order with their resolved rating.
pub fn render_services(groups: &[ServiceGroup<'_>]) -> String {
    let name_width = groups
        .iter()
        .map(|g| UnicodeWidthStr::width(g.service))
        .max()
        .unwrap_or(0)
        .max("SERVICE".len());

    let mut out = format!("{}  {:>8}  {:>5}\n", pad_right("SERVICE", name_width), "RATING", "ROWS");
    for g in groups {
        out.push_str(&format!(
            "{}  {:>8}  {:>5}",
            pad_right(g.service, name_width),
            g.rating,
            g.rows.len()
        ));
        if g.has_conflicting_ratings() {
            let ignored: Vec<String> = g.conflicting_ratings.iter().map(|r| r.to_string()).collect();
            out.push_str(&format!("  (ignored ratings: {})", ignored.join(", ")));
        }
        out.push('\n');
    }
    out
}
