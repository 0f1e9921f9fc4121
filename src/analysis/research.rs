use super::{BarRow, ValueRow};
use crate::types::RdStatus;
use crate::utils::{bar_fraction, format_count, format_mean, format_percent, normalized_share, sum};

#[derive(Debug, Clone, PartialEq)]
pub struct ResearchPage {
    pub total_projects: u64,
    /// Spent over allocated across all divisions; `None` with no budget
    pub overall_utilization: Option<f64>,
    pub project_status: Vec<ValueRow>,
    pub budget_utilization: Vec<BarRow>,
    pub commercialization: Vec<ValueRow>,
    pub timeline_adherence: Vec<BarRow>,
}

impl ResearchPage {
    pub fn utilization_summary(&self) -> String {
        format_mean(self.overall_utilization, "%")
    }
}

pub fn research_page(status: &RdStatus) -> ResearchPage {
    let total_projects: u64 = status.project_status.iter().map(|s| s.count).sum();

    let allocated = sum(&status.budget_analysis, |b| b.allocated);
    let spent = sum(&status.budget_analysis, |b| b.spent);
    let overall_utilization =
        (allocated > 0.0).then(|| normalized_share(&spent, |s| *s, allocated).percent);

    ResearchPage {
        total_projects,
        overall_utilization,
        project_status: status
            .project_status
            .iter()
            .map(|s| ValueRow::new(&s.status, format_count(s.count)))
            .collect(),
        budget_utilization: status
            .budget_analysis
            .iter()
            .map(|b| BarRow {
                label: b.division.clone(),
                text: format!("{}%", b.utilization),
                fraction: bar_fraction(b.utilization),
            })
            .collect(),
        commercialization: status
            .commercialization_potential
            .iter()
            .map(|c| ValueRow::new(&c.potential, format_count(c.count)))
            .collect(),
        timeline_adherence: status
            .timeline_adherence
            .iter()
            .map(|t| BarRow {
                label: t.division.clone(),
                text: format_percent(t.adherence),
                fraction: bar_fraction(t.adherence),
            })
            .collect(),
    }
}
