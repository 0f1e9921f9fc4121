use super::{KpiCard, Trend};
use crate::types::ExecutiveSummary;
use crate::utils::{format_count, format_currency, format_percent, format_signed_percent};

/// Incident counts above this are flagged red on the summary card.
const INCIDENT_ALERT_THRESHOLD: u64 = 50;

/// The eight headline cards shown above the tabs.
pub fn summary_cards(summary: &ExecutiveSummary) -> Vec<KpiCard> {
    let growth_trend = if summary.revenue_growth > 0.0 {
        Trend::Positive
    } else {
        Trend::Negative
    };
    let incident_trend = if summary.security_incidents > INCIDENT_ALERT_THRESHOLD {
        Trend::Negative
    } else {
        Trend::Positive
    };

    vec![
        KpiCard {
            title: "Total Revenue",
            value: format_currency(summary.total_revenue),
            caption: format_signed_percent(summary.revenue_growth),
            trend: growth_trend,
        },
        KpiCard {
            title: "Profit Margin",
            value: format_percent(summary.profit_margin),
            caption: "Current Quarter".to_string(),
            trend: Trend::Neutral,
        },
        KpiCard {
            title: "Total Employees",
            value: format_count(summary.total_employees),
            caption: "Active Personnel".to_string(),
            trend: Trend::Neutral,
        },
        KpiCard {
            title: "Active Projects",
            value: format_count(summary.active_projects),
            caption: format!("{} High Potential", summary.high_potential_projects),
            trend: Trend::Positive,
        },
        KpiCard {
            title: "Avg Response Time",
            value: format!("{:.1} min", summary.avg_response_time),
            caption: "Security Operations".to_string(),
            trend: Trend::Neutral,
        },
        KpiCard {
            title: "Security Incidents",
            value: format_count(summary.security_incidents),
            caption: "Recent Period".to_string(),
            trend: incident_trend,
        },
        KpiCard {
            title: "Employee Retention",
            value: format_percent(summary.employee_retention),
            caption: "Annual Rate".to_string(),
            trend: Trend::Positive,
        },
        KpiCard {
            title: "Employee Satisfaction",
            value: format!("{:.1}/10", summary.employee_satisfaction),
            caption: "Survey Score".to_string(),
            trend: Trend::Positive,
        },
    ]
}
