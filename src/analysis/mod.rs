//! Per-page view models.
//!
//! Each submodule turns one resource payload into the cards, bars and chart
//! rows its tab displays. Everything here is pure and computed once per
//! snapshot, not per frame.

mod executive;
mod finance;
mod research;
mod security;
mod supply_chain;
mod workforce;


pub use executive::summary_cards;
pub use finance::{finance_page, revenue_by_division, FinancePage};
pub use research::{research_page, ResearchPage};
pub use security::{security_page, security_stats, SecurityPage, SecurityStats};
pub use supply_chain::{supply_chain_page, SupplyChainPage};
pub use workforce::{workforce_page, WorkforcePage};

use crate::types::Snapshot;

/// Colour hint for a KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

/// A headline number with a short caption underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
    pub trend: Trend,
}

/// A labelled progress bar.
///
/// `text` is the unclamped value; `fraction` is the clamped bar width.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub text: String,
    pub fraction: f32,
}

/// A label with a formatted value and no bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    pub label: String,
    pub value: String,
}

impl ValueRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Everything the dashboard renders for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: Vec<KpiCard>,
    pub finance: FinancePage,
    pub security: SecurityPage,
    pub research: ResearchPage,
    pub supply_chain: SupplyChainPage,
    pub workforce: WorkforcePage,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            summary: summary_cards(&snapshot.executive_summary),
            finance: finance_page(&snapshot.financial_overview),
            security: security_page(&snapshot.security_metrics),
            research: research_page(&snapshot.rd_status),
            supply_chain: supply_chain_page(&snapshot.supply_chain),
            workforce: workforce_page(&snapshot.hr_analytics),
        }
    }
}
