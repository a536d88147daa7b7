//! Plain-text rendering of command results.

use std::fmt::Write;

use chrono::NaiveDate;
use shared::{BarTone, DashboardSummary, RecordBreakdown, RecordSummary, RestorePreview};

use crate::backend::domain::{
    chart::{self, CHART_MARGINS, VIEWPORT_HEIGHT},
    formatting::{self, AmountFormatter},
    models::{record::RECORD_DATE_FORMAT, structure::CustomExpenseStructure},
};

/// Widest text bar in the trend chart
const CHART_COLUMNS: f64 = 40.0;

fn label(date: &str, render: fn(NaiveDate) -> String) -> String {
    NaiveDate::parse_from_str(date, RECORD_DATE_FORMAT)
        .map(render)
        .unwrap_or_else(|_| date.to_string())
}

pub fn render_dashboard(summary: &DashboardSummary, formatter: &AmountFormatter, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard for {}", formatting::format_date_long(today));
    let _ = writeln!(out);

    if summary.is_empty {
        let _ = writeln!(out, "No records yet. Add one with `pnl records new`.");
        return out;
    }

    for average in [&summary.seven_day, &summary.thirty_day] {
        let _ = writeln!(
            out,
            "{}-day average profit: {}  ({} records)",
            average.window_days,
            formatter.format_rounded(average.average_profit),
            average.days_counted
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Profit/loss trend (last {} records)", summary.chart.len());
    out.push_str(&render_chart(summary, formatter));
    let _ = writeln!(out);

    let _ = writeln!(out, "Recent activity");
    out.push_str(&render_recent_rows(&summary.recent, formatter));
    out
}

/// Dashboard rows: `24 July`, weekday, then profit
fn render_recent_rows(records: &[RecordSummary], formatter: &AmountFormatter) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "  {:<12} {:<10} {:>14}",
            label(&record.date, formatting::format_month_day),
            label(&record.date, formatting::format_weekday),
            formatter.format_signed(record.profit)
        );
    }
    out
}

/// One text bar per point, scaled by the same geometry as the graphical chart
fn render_chart(summary: &DashboardSummary, formatter: &AmountFormatter) -> String {
    let Some(layout) = chart::layout(&summary.chart) else {
        return "Not enough data\n".to_string();
    };

    let inner_height = VIEWPORT_HEIGHT - CHART_MARGINS.top - CHART_MARGINS.bottom;
    let mut out = String::new();
    for bar in &layout.bars {
        let columns = (bar.height / inner_height * CHART_COLUMNS).round() as usize;
        let glyph = match bar.tone {
            BarTone::Positive => "█",
            BarTone::Negative => "░",
        };
        let _ = writeln!(
            out,
            "  {:<11} {:<40} {}",
            label(&bar.date, formatting::format_date_short),
            glyph.repeat(columns),
            formatter.format_signed(bar.point.profit)
        );
    }
    out
}

pub fn render_record_rows(records: &[RecordSummary], formatter: &AmountFormatter) -> String {
    if records.is_empty() {
        return "  No records found.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "  {}  {:<10}  sales {:>14}  expenses {:>14}  {}",
            label(&record.date, formatting::format_date_numeric),
            label(&record.date, formatting::format_weekday),
            formatter.format(record.total_sales),
            formatter.format(record.total_expenses),
            formatter.format_signed(record.profit)
        );
    }
    out
}

pub fn render_breakdown(breakdown: &RecordBreakdown, formatter: &AmountFormatter) -> String {
    let summary = &breakdown.summary;
    let mut out = String::new();
    let _ = writeln!(out, "{}", label(&summary.date, formatting::format_date_long));
    let _ = writeln!(out, "  Total sales:    {}", formatter.format(summary.total_sales));
    let _ = writeln!(out, "  Total expenses: {}", formatter.format(summary.total_expenses));
    let _ = writeln!(out, "  Profit:         {}", formatter.format_signed(summary.profit));

    if breakdown.categories.is_empty() {
        let _ = writeln!(out, "\n  No expenses recorded.");
        return out;
    }

    for category in &breakdown.categories {
        let _ = writeln!(out, "\n  {} ({})", category.name, formatter.format(category.total));
        for item in &category.items {
            let photo = if item.has_bill_photo { "  [bill]" } else { "" };
            let _ = writeln!(out, "    {:<45} {:>14}{}", item.name, formatter.format(item.amount), photo);
        }
    }
    out
}

pub fn render_structure(structure: &CustomExpenseStructure) -> String {
    let mut out = String::new();
    for (category, items) in structure.iter() {
        let _ = writeln!(out, "{}", category);
        for item in items {
            let _ = writeln!(out, "  - {}", item);
        }
    }
    out
}

pub fn render_preview(preview: &RestorePreview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "You are about to import {} records.", preview.record_count);
    if preview.restores_custom_structure {
        let _ = writeln!(out, "This will also restore your saved custom expense items.");
    }
    let _ = writeln!(out, "{}", preview.warning);
    out
}
