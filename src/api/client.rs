use chrono::Local;
use serde::de::DeserializeOwned;
use std::time::Instant;

use super::ApiError;
use crate::config::DashboardConfig;
use crate::types::{
    ExecutiveSummary, FinancialOverview, HrAnalytics, RdStatus, SecurityMetrics, Snapshot,
    SupplyChainPerformance,
};

/// A response type served from a fixed endpoint of the metrics API.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Path appended to the base URL
    const PATH: &'static str;
    /// Human-readable name used in logs
    const LABEL: &'static str;
}

impl Resource for ExecutiveSummary {
    const PATH: &'static str = "/api/executive-summary";
    const LABEL: &'static str = "executive summary";
}

impl Resource for FinancialOverview {
    const PATH: &'static str = "/api/financial-overview";
    const LABEL: &'static str = "financial overview";
}

impl Resource for SecurityMetrics {
    const PATH: &'static str = "/api/security-metrics";
    const LABEL: &'static str = "security metrics";
}

impl Resource for RdStatus {
    const PATH: &'static str = "/api/rd-status";
    const LABEL: &'static str = "R&D status";
}

impl Resource for SupplyChainPerformance {
    const PATH: &'static str = "/api/supply-chain";
    const LABEL: &'static str = "supply chain performance";
}

impl Resource for HrAnalytics {
    const PATH: &'static str = "/api/hr-analytics";
    const LABEL: &'static str = "HR analytics";
}

/// Typed client for the six dashboard endpoints.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET one resource and parse the body into its response type.
    ///
    /// Failures are logged before being returned.
    pub async fn fetch<R: Resource>(&self) -> Result<R, ApiError> {
        let result = self.get_json::<R>().await;
        if let Err(e) = &result {
            tracing::error!(
                endpoint = R::PATH,
                resource = R::LABEL,
                error = %e,
                "Error fetching resource"
            );
        }
        result
    }

    async fn get_json<R: Resource>(&self) -> Result<R, ApiError> {
        let url = format!("{}{}", self.base_url, R::PATH);
        let network = |source| ApiError::Network {
            endpoint: R::PATH,
            source,
        };

        let response = self.http.get(&url).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                endpoint: R::PATH,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network)?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Parse {
            endpoint: R::PATH,
            source,
        })
    }

    pub async fn executive_summary(&self) -> Result<ExecutiveSummary, ApiError> {
        self.fetch().await
    }

    pub async fn financial_overview(&self) -> Result<FinancialOverview, ApiError> {
        self.fetch().await
    }

    pub async fn security_metrics(&self) -> Result<SecurityMetrics, ApiError> {
        self.fetch().await
    }

    pub async fn rd_status(&self) -> Result<RdStatus, ApiError> {
        self.fetch().await
    }

    pub async fn supply_chain_performance(&self) -> Result<SupplyChainPerformance, ApiError> {
        self.fetch().await
    }

    pub async fn hr_analytics(&self) -> Result<HrAnalytics, ApiError> {
        self.fetch().await
    }

    /// Fetch all six resources concurrently.
    ///
    /// Fails fast: the first error fails the whole batch and any payloads
    /// that already arrived are dropped.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let start_time = Instant::now();

        let (
            executive_summary,
            financial_overview,
            security_metrics,
            rd_status,
            supply_chain,
            hr_analytics,
        ) = tokio::try_join!(
            self.executive_summary(),
            self.financial_overview(),
            self.security_metrics(),
            self.rd_status(),
            self.supply_chain_performance(),
            self.hr_analytics(),
        )?;

        tracing::debug!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Fetched all dashboard resources"
        );

        Ok(Snapshot {
            executive_summary,
            financial_overview,
            security_metrics,
            rd_status,
            supply_chain,
            hr_analytics,
            fetched_at: Local::now(),
        })
    }
}
