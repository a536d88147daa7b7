//! Profit/loss trend: picks the points to plot and lays out the bars.

use shared::{BarTone, ChartBar, ChartDataPoint, ChartLayout};

use crate::backend::domain::models::record::DailyRecord;

pub const VIEWPORT_WIDTH: f64 = 500.0;
pub const VIEWPORT_HEIGHT: f64 = 200.0;

/// Space kept around the plotting area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const CHART_MARGINS: Margins = Margins {
    top: 20.0,
    right: 0.0,
    bottom: 20.0,
    left: 0.0,
};

/// Fraction of each slot taken by its bar; the rest is the gap
const BAR_FILL: f64 = 0.8;

/// The newest `window` records in chronological order.
///
/// `records_desc` must already be sorted newest first.
pub fn chart_data(records_desc: &[DailyRecord], window: usize) -> Vec<ChartDataPoint> {
    records_desc
        .iter()
        .take(window)
        .rev()
        .map(|record| ChartDataPoint {
            date: record.id.clone(),
            sales: record.total_sales,
            expenses: record.total_expenses(),
            profit: record.profit(),
        })
        .collect()
}

/// Bar geometry in the default 500x200 viewport. `None` when there is
/// nothing to plot.
pub fn layout(points: &[ChartDataPoint]) -> Option<ChartLayout> {
    layout_in(points, VIEWPORT_WIDTH, VIEWPORT_HEIGHT, CHART_MARGINS)
}

pub fn layout_in(
    points: &[ChartDataPoint],
    width: f64,
    height: f64,
    margins: Margins,
) -> Option<ChartLayout> {
    if points.is_empty() {
        return None;
    }

    let inner_width = width - margins.left - margins.right;
    let inner_height = height - margins.top - margins.bottom;

    let max_profit = points.iter().map(|p| p.profit).fold(0.0_f64, f64::max);
    let min_profit = points.iter().map(|p| p.profit).fold(0.0_f64, f64::min);
    let range = max_profit - min_profit;

    let has_zero_line = min_profit < 0.0 && max_profit > 0.0;
    let baseline_y = if has_zero_line {
        max_profit / range * inner_height + margins.top
    } else if min_profit < 0.0 {
        // Every bar is a loss, so they hang from the top
        margins.top
    } else {
        height - margins.bottom
    };

    let slot = inner_width / points.len() as f64;
    let bar_width = slot * BAR_FILL;

    let bars = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let bar_height = if range == 0.0 {
                0.0
            } else {
                point.profit.abs() / range * inner_height
            };
            let (y, tone) = if point.profit >= 0.0 {
                (baseline_y - bar_height, BarTone::Positive)
            } else {
                (baseline_y, BarTone::Negative)
            };

            ChartBar {
                date: point.date.clone(),
                x: margins.left + i as f64 * slot,
                y,
                width: bar_width,
                height: bar_height,
                tone,
                point: point.clone(),
            }
        })
        .collect();

    Some(ChartLayout {
        width,
        height,
        baseline_y,
        has_zero_line,
        max_profit,
        min_profit,
        bars,
    })
}
