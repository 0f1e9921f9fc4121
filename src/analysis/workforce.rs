use super::{BarRow, ValueRow};
use crate::plotting::{ChartRow, Series};
use crate::types::HrAnalytics;
use crate::utils::{bar_fraction, format_mean, max_normalized, mean};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkforcePage {
    pub avg_retention: Option<f64>,
    pub retention: Vec<BarRow>,
    /// Bars scaled to the department with the most training
    pub training: Vec<BarRow>,
    pub diversity: Vec<ValueRow>,
    pub satisfaction_trends: Vec<Series>,
}

pub fn workforce_page(hr: &HrAnalytics) -> WorkforcePage {
    let training_shares = max_normalized(&hr.training_data, |t| t.avg_training_hours);

    WorkforcePage {
        avg_retention: mean(&hr.retention_rates, |r| r.retention_rate),
        retention: hr
            .retention_rates
            .iter()
            .map(|r| BarRow {
                label: r.department.clone(),
                text: format!("{}%", r.retention_rate),
                fraction: bar_fraction(r.retention_rate),
            })
            .collect(),
        training: hr
            .training_data
            .iter()
            .zip(training_shares)
            .map(|(t, share)| BarRow {
                label: t.department.clone(),
                text: format!("{}h", t.avg_training_hours),
                fraction: share.bar_fraction(),
            })
            .collect(),
        diversity: hr
            .diversity_metrics
            .iter()
            .map(|d| ValueRow::new(&d.department, format!("{:.2}", d.diversity_index)))
            .collect(),
        satisfaction_trends: hr
            .satisfaction_trends
            .iter()
            .map(|trend| Series {
                name: trend.department.clone(),
                points: trend
                    .data
                    .iter()
                    .map(|m| ChartRow::new(&m.month, m.satisfaction))
                    .collect(),
            })
            .collect(),
    }
}

impl WorkforcePage {
    /// Mean retention formatted for the HR tab heading.
    pub fn retention_summary(&self) -> String {
        format_mean(self.avg_retention, "%")
    }
}
