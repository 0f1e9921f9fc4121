use super::{BarRow, ValueRow};
use crate::plotting::{ChartRow, Series};
use crate::types::SupplyChainPerformance;
use crate::utils::{bar_fraction, format_count, max_normalized};

#[derive(Debug, Clone, PartialEq)]
pub struct SupplyChainPage {
    pub total_disruptions: u64,
    pub quality_scores: Vec<BarRow>,
    /// Bars scaled to the most disrupted facility
    pub disruptions: Vec<BarRow>,
    pub production_trends: Vec<Series>,
    /// `(facility / product line, rating)`
    pub sustainability: Vec<ValueRow>,
}

pub fn supply_chain_page(performance: &SupplyChainPerformance) -> SupplyChainPage {
    let disruption_shares =
        max_normalized(&performance.disruption_analysis, |d| d.disruptions as f64);

    SupplyChainPage {
        total_disruptions: performance
            .disruption_analysis
            .iter()
            .map(|d| d.disruptions)
            .sum(),
        quality_scores: performance
            .quality_scores
            .iter()
            .map(|q| BarRow {
                label: q.product_line.clone(),
                text: format!("{}%", q.quality_score),
                fraction: bar_fraction(q.quality_score),
            })
            .collect(),
        disruptions: performance
            .disruption_analysis
            .iter()
            .zip(disruption_shares)
            .map(|(d, share)| BarRow {
                label: d.facility.clone(),
                text: format_count(d.disruptions),
                fraction: share.bar_fraction(),
            })
            .collect(),
        production_trends: performance
            .production_trends
            .iter()
            .map(|trend| Series {
                name: trend.facility.clone(),
                points: trend
                    .data
                    .iter()
                    .map(|m| ChartRow::new(&m.month, m.volume as f64))
                    .collect(),
            })
            .collect(),
        sustainability: performance
            .sustainability_ratings
            .iter()
            .map(|s| {
                ValueRow::new(
                    &format!("{} / {}", s.facility, s.product_line),
                    s.rating.clone(),
                )
            })
            .collect(),
    }
}
