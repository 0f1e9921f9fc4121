//! # Common Types
//!
//! Response shapes for the six dashboard resources, plus the [`Snapshot`]
//! that bundles one complete load of all of them.
//!
//! Field names follow the JSON produced by the metrics API, so every type
//! here deserializes straight from the response body and serializes back to
//! the same document.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Headline KPIs shown above the tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Revenue for the latest year, in millions
    pub total_revenue: f64,
    /// Year-over-year Q4 revenue growth, in percent
    pub revenue_growth: f64,
    /// Net profit over revenue, in percent
    pub profit_margin: f64,
    pub total_employees: u64,
    pub active_projects: u64,
    pub high_potential_projects: u64,
    /// Average security response time, in minutes
    pub avg_response_time: f64,
    pub security_incidents: u64,
    /// Average retention rate, in percent
    pub employee_retention: f64,
    /// Average satisfaction score on a 0-10 scale
    pub employee_satisfaction: f64,
}

/// One point of a per-period series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionTrend {
    pub division: String,
    pub data: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitMargin {
    pub division: String,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdInvestmentTrend {
    pub period: String,
    pub investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketShare {
    pub division: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialOverview {
    pub revenue_trends: Vec<DivisionTrend>,
    pub profit_margins: Vec<ProfitMargin>,
    pub rd_investment_trends: Vec<RdInvestmentTrend>,
    pub market_share: Vec<MarketShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncidents {
    pub month: String,
    pub incidents: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictIncidentTrend {
    pub district: String,
    pub data: Vec<MonthlyIncidents>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTime {
    pub district: String,
    pub avg_response_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyScore {
    pub district: String,
    pub safety_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechDeployment {
    pub district: String,
    pub deployments: u64,
}

/// Security operations metrics, keyed by district.
///
/// The four lists share `district` as a join key but nothing checks that
/// they agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    pub incident_trends: Vec<DistrictIncidentTrend>,
    pub response_times: Vec<ResponseTime>,
    pub safety_scores: Vec<SafetyScore>,
    pub tech_deployments: Vec<TechDeployment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub division: String,
    pub allocated: f64,
    pub spent: f64,
    /// Spent over allocated, in percent. Not clamped by the API.
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercializationCount {
    pub potential: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineAdherence {
    pub division: String,
    pub adherence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdStatus {
    pub project_status: Vec<ProjectStatusCount>,
    pub budget_analysis: Vec<BudgetAnalysis>,
    pub commercialization_potential: Vec<CommercializationCount>,
    pub timeline_adherence: Vec<TimelineAdherence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTrend {
    pub facility: String,
    pub data: Vec<MonthlyVolume>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub product_line: String,
    pub quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionCount {
    pub facility: String,
    pub disruptions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityRating {
    pub facility: String,
    pub product_line: String,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainPerformance {
    pub production_trends: Vec<ProductionTrend>,
    pub quality_scores: Vec<QualityScore>,
    pub disruption_analysis: Vec<DisruptionCount>,
    pub sustainability_ratings: Vec<SustainabilityRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionRate {
    pub department: String,
    pub retention_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySatisfaction {
    pub month: String,
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionTrend {
    pub department: String,
    pub data: Vec<MonthlySatisfaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversityMetric {
    pub department: String,
    pub diversity_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingHours {
    pub department: String,
    pub avg_training_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrAnalytics {
    pub retention_rates: Vec<RetentionRate>,
    pub satisfaction_trends: Vec<SatisfactionTrend>,
    pub diversity_metrics: Vec<DiversityMetric>,
    pub training_data: Vec<TrainingHours>,
}

/// One complete load of all six resources.
///
/// Snapshots are never patched in place: a new load produces a new snapshot
/// that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub executive_summary: ExecutiveSummary,
    pub financial_overview: FinancialOverview,
    pub security_metrics: SecurityMetrics,
    pub rd_status: RdStatus,
    pub supply_chain: SupplyChainPerformance,
    pub hr_analytics: HrAnalytics,
    /// When the batch that produced this snapshot completed
    pub fetched_at: DateTime<Local>,
}
