use super::{BarRow, KpiCard, Trend};
use crate::plotting::{ChartRow, Series};
use crate::types::SecurityMetrics;
use crate::utils::{format_count, format_mean, mean, normalized_share};

/// Scalar summaries for the security tab's stat cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecurityStats {
    /// Incidents summed over every district and month
    pub total_incidents: u64,
    /// Minutes; `None` when no district reported
    pub avg_response_time: Option<f64>,
    /// 0-10 scale; `None` when no district reported
    pub avg_safety_score: Option<f64>,
    pub total_deployments: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityPage {
    pub stats: SecurityStats,
    pub cards: Vec<KpiCard>,
    pub response_times: Vec<ChartRow>,
    pub safety_scores: Vec<ChartRow>,
    pub incident_trends: Vec<Series>,
    /// Each district's share of all deployments
    pub deployments: Vec<BarRow>,
}

pub fn security_stats(metrics: &SecurityMetrics) -> SecurityStats {
    let total_incidents: u64 = metrics
        .incident_trends
        .iter()
        .flat_map(|trend| trend.data.iter().map(|month| month.incidents))
        .sum();

    SecurityStats {
        total_incidents,
        avg_response_time: mean(&metrics.response_times, |r| r.avg_response_time),
        avg_safety_score: mean(&metrics.safety_scores, |s| s.safety_score),
        total_deployments: metrics.tech_deployments.iter().map(|d| d.deployments).sum(),
    }
}

pub fn security_page(metrics: &SecurityMetrics) -> SecurityPage {
    let stats = security_stats(metrics);

    let cards = vec![
        KpiCard {
            title: "Total Incidents",
            value: format_count(stats.total_incidents),
            caption: "All Districts".to_string(),
            trend: Trend::Negative,
        },
        KpiCard {
            title: "Avg Response Time",
            value: format_mean(stats.avg_response_time, " min"),
            caption: "Per District".to_string(),
            trend: Trend::Neutral,
        },
        KpiCard {
            title: "Avg Safety Score",
            value: format_mean(stats.avg_safety_score, "/10"),
            caption: "Public Safety".to_string(),
            trend: Trend::Positive,
        },
        KpiCard {
            title: "Tech Deployments",
            value: format_count(stats.total_deployments),
            caption: "Wayne Tech".to_string(),
            trend: Trend::Neutral,
        },
    ];

    let deployments = metrics
        .tech_deployments
        .iter()
        .map(|d| {
            let share = normalized_share(
                d,
                |d| d.deployments as f64,
                stats.total_deployments as f64,
            );
            BarRow {
                label: d.district.clone(),
                text: format_count(d.deployments),
                fraction: share.bar_fraction(),
            }
        })
        .collect();

    let incident_trends = metrics
        .incident_trends
        .iter()
        .map(|trend| Series {
            name: trend.district.clone(),
            points: trend
                .data
                .iter()
                .map(|m| ChartRow::new(&m.month, m.incidents as f64))
                .collect(),
        })
        .collect();

    SecurityPage {
        stats,
        cards,
        response_times: metrics
            .response_times
            .iter()
            .map(|r| ChartRow::new(&r.district, r.avg_response_time))
            .collect(),
        safety_scores: metrics
            .safety_scores
            .iter()
            .map(|s| ChartRow::new(&s.district, s.safety_score))
            .collect(),
        incident_trends,
        deployments,
    }
}
