use chrono::DateTime;

use crate::client::MarketChart;

/// One chart-ready sample: UTC calendar date and price rounded to 2 decimals.
///
/// Dates are formatted ISO 8601 (`%Y-%m-%d`) so rendering is reproducible
/// across environments instead of depending on an ambient locale.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

/// Maps the raw `[timestamp_millis, price]` sequence into chart-ready points,
/// preserving backend order. Samples whose timestamp falls outside chrono's
/// representable range are dropped.
pub fn price_points(chart: &MarketChart) -> Vec<PricePoint> {
    chart
        .prices
        .iter()
        .filter_map(|&(timestamp, price)| {
            let date = DateTime::from_timestamp_millis(timestamp)?;
            Some(PricePoint {
                date: date.format("%Y-%m-%d").to_string(),
                price: (price * 100.0).round() / 100.0,
            })
        })
        .collect()
}
