//! Aggregation over records: rolling averages, the dashboard and per-record
//! breakdowns. Everything here is derived on demand; nothing is persisted.

use chrono::{Duration, NaiveDate};
use shared::{
    CategoryBreakdown, DashboardSummary, ItemBreakdown, RecordBreakdown, RecordSummary,
    RollingAverage,
};
use tracing::debug;

use crate::backend::domain::{chart, models::record::DailyRecord};

pub const DEFAULT_CHART_WINDOW: usize = 30;
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct SummaryService {
    chart_window: usize,
    recent_activity_limit: usize,
}

impl SummaryService {
    pub fn new(chart_window: usize, recent_activity_limit: usize) -> Self {
        Self {
            chart_window,
            recent_activity_limit,
        }
    }

    /// Average profit of the records dated within the last `days` days,
    /// today included
    pub fn rolling_average(&self, records: &[DailyRecord], today: NaiveDate, days: u32) -> RollingAverage {
        let start = today - Duration::days(i64::from(days.saturating_sub(1)));
        let (total, count) = records
            .iter()
            .filter(|record| record.date >= start && record.date <= today)
            .fold((0.0, 0usize), |(total, count), record| (total + record.profit(), count + 1));

        let average_profit = if count == 0 { 0.0 } else { total / count as f64 };
        RollingAverage {
            window_days: days,
            average_profit,
            days_counted: count,
        }
    }

    /// `records_desc` must be sorted newest first
    pub fn dashboard(&self, records_desc: &[DailyRecord], today: NaiveDate) -> DashboardSummary {
        let summary = DashboardSummary {
            is_empty: records_desc.is_empty(),
            seven_day: self.rolling_average(records_desc, today, 7),
            thirty_day: self.rolling_average(records_desc, today, 30),
            chart: chart::chart_data(records_desc, self.chart_window),
            recent: records_desc
                .iter()
                .take(self.recent_activity_limit)
                .map(record_summary)
                .collect(),
        };

        debug!(
            "Dashboard for {}: {} records, 7-day avg over {} days, 30-day avg over {} days",
            today,
            records_desc.len(),
            summary.seven_day.days_counted,
            summary.thirty_day.days_counted
        );
        summary
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_WINDOW, DEFAULT_RECENT_ACTIVITY_LIMIT)
    }
}

pub fn record_summary(record: &DailyRecord) -> RecordSummary {
    RecordSummary {
        id: record.id.clone(),
        date: record.id.clone(),
        total_sales: record.total_sales,
        total_expenses: record.total_expenses(),
        profit: record.profit(),
    }
}

/// Totals plus the categories and items that actually cost something
pub fn record_breakdown(record: &DailyRecord) -> RecordBreakdown {
    let categories = record
        .expenses
        .iter()
        .filter(|category| category.total() != 0.0)
        .map(|category| CategoryBreakdown {
            name: category.name.clone(),
            total: category.total(),
            items: category
                .items
                .iter()
                .filter(|item| item.amount > 0.0)
                .map(|item| ItemBreakdown {
                    name: item.name.clone(),
                    amount: item.amount,
                    has_bill_photo: item.bill_photo.is_some(),
                })
                .collect(),
        })
        .collect();

    RecordBreakdown {
        summary: record_summary(record),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::record::{ExpenseCategory, ExpenseItem};

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn record(day: &str, sales: f64, cost: f64) -> DailyRecord {
        DailyRecord::new(
            date(day),
            sales,
            vec![ExpenseCategory::new("Gas", vec![ExpenseItem::new("Super Gas", cost)])],
        )
    }

    #[test]
    fn test_rolling_average_window_is_inclusive() {
        let service = SummaryService::default();
        let records = vec![
            record("2024-07-24", 1000.0, 0.0),
            record("2024-07-18", 500.0, 0.0),
            record("2024-07-17", 9000.0, 0.0),
        ];

        let week = service.rolling_average(&records, date("2024-07-24"), 7);
        assert_eq!(week.window_days, 7);
        assert_eq!(week.days_counted, 2);
        assert_eq!(week.average_profit, 750.0);
    }

    #[test]
    fn test_rolling_average_ignores_future_records() {
        let service = SummaryService::default();
        let records = vec![record("2024-07-25", 1000.0, 0.0), record("2024-07-24", 200.0, 300.0)];

        let week = service.rolling_average(&records, date("2024-07-24"), 7);
        assert_eq!(week.days_counted, 1);
        assert_eq!(week.average_profit, -100.0);
    }

    #[test]
    fn test_rolling_average_empty_window_is_zero() {
        let service = SummaryService::default();
        let records = vec![record("2024-05-01", 1000.0, 0.0)];
        let month = service.rolling_average(&records, date("2024-07-24"), 30);
        assert_eq!(month.days_counted, 0);
        assert_eq!(month.average_profit, 0.0);
    }

    #[test]
    fn test_dashboard_empty() {
        let summary = SummaryService::default().dashboard(&[], date("2024-07-24"));
        assert!(summary.is_empty);
        assert!(summary.chart.is_empty());
        assert!(summary.recent.is_empty());
        assert_eq!(summary.thirty_day.average_profit, 0.0);
    }

    #[test]
    fn test_dashboard_limits_recent_and_chart() {
        let service = SummaryService::new(3, 2);
        let records = vec![
            record("2024-07-24", 400.0, 100.0),
            record("2024-07-23", 300.0, 100.0),
            record("2024-07-22", 200.0, 100.0),
            record("2024-07-21", 100.0, 100.0),
        ];

        let summary = service.dashboard(&records, date("2024-07-24"));
        assert!(!summary.is_empty);
        assert_eq!(summary.recent.len(), 2);
        assert_eq!(summary.recent[0].date, "2024-07-24");
        assert_eq!(summary.recent[0].profit, 300.0);

        let chart_dates: Vec<&str> = summary.chart.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(chart_dates, vec!["2024-07-22", "2024-07-23", "2024-07-24"]);

        assert_eq!(summary.seven_day.days_counted, 4);
        assert_eq!(summary.seven_day.average_profit, 150.0);
    }

    #[test]
    fn test_record_breakdown_skips_zero_lines() {
        let mut beef = ExpenseItem::new("Beef", 4490.0);
        beef.bill_photo = Some("data:image/jpeg;base64,AA==".to_string());
        let record = DailyRecord::new(
            date("2024-07-24"),
            20000.0,
            vec![
                ExpenseCategory::new("Meat", vec![beef, ExpenseItem::new("Chicken", 0.0)]),
                ExpenseCategory::new("Gas", vec![ExpenseItem::new("Super Gas", 0.0)]),
            ],
        );

        let breakdown = record_breakdown(&record);
        assert_eq!(breakdown.summary.total_expenses, 4490.0);
        assert_eq!(breakdown.summary.profit, 15510.0);
        assert_eq!(breakdown.categories.len(), 1);
        assert_eq!(breakdown.categories[0].name, "Meat");
        assert_eq!(breakdown.categories[0].items.len(), 1);
        assert!(breakdown.categories[0].items[0].has_bill_photo);
    }
}
