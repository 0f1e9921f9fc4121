use super::BarRow;
use crate::plotting::ChartRow;
use crate::types::FinancialOverview;
use crate::utils::{bar_fraction, sum};

#[derive(Debug, Clone, PartialEq)]
pub struct FinancePage {
    /// Revenue summed over every period, per division (millions)
    pub revenue_by_division: Vec<ChartRow>,
    pub market_share: Vec<ChartRow>,
    pub profit_margins: Vec<BarRow>,
    pub rd_investment: Vec<ChartRow>,
}

/// Total revenue of each division across all reported periods.
pub fn revenue_by_division(overview: &FinancialOverview) -> Vec<ChartRow> {
    overview
        .revenue_trends
        .iter()
        .map(|trend| ChartRow::new(&trend.division, sum(&trend.data, |p| p.value)))
        .collect()
}

pub fn finance_page(overview: &FinancialOverview) -> FinancePage {
    let market_share = overview
        .market_share
        .iter()
        .map(|m| ChartRow::new(&m.division, m.share))
        .collect();

    let profit_margins = overview
        .profit_margins
        .iter()
        .map(|m| BarRow {
            label: m.division.clone(),
            text: format!("{:.1}%", m.margin),
            fraction: bar_fraction(m.margin),
        })
        .collect();

    let rd_investment = overview
        .rd_investment_trends
        .iter()
        .map(|t| ChartRow::new(&t.period, t.investment))
        .collect();

    FinancePage {
        revenue_by_division: revenue_by_division(overview),
        market_share,
        profit_margins,
        rd_investment,
    }
}
