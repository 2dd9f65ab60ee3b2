// Analytics API client
//
// The backend is a fixed set of stateless GET endpoints returning JSON rows.
// `AnalyticsApi` is the seam the store depends on; `HttpAnalyticsApi` is the
// reqwest implementation. Every call returns an explicit Result; degrading a
// failure to an empty dataset is the store's job, not the client's.

use crate::config::ApiConfig;
use crate::records::*;
use crate::{Result, TableroError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn summary(&self, cod_dept: Option<&str>) -> Result<Summary>;
    async fn education_level(&self) -> Result<Vec<EducationRecord>>;
    async fn sex_distribution(&self) -> Result<Vec<SexRecord>>;
    async fn top_companies(&self) -> Result<Vec<CompanyRecord>>;
    async fn puestos_demographics(&self) -> Result<Vec<PuestoDemographics>>;
    async fn leader_efficiency(&self) -> Result<Vec<LeaderRecord>>;
    async fn company_timeline(&self) -> Result<Vec<TimelineRecord>>;
    async fn mesas_by_dept(&self, cod_dept: Option<&str>) -> Result<Vec<MesasRecord>>;
    async fn empresas_by_dept(&self, cod_dept: Option<&str>) -> Result<Vec<EmpresasDeptRecord>>;
    async fn coverage_by_puesto(&self, limit: u32) -> Result<Vec<CoverageRecord>>;
    async fn verified_leaders(&self) -> Result<Vec<VerifiedLeadersRecord>>;
    async fn company_heatmap(&self) -> Result<Vec<CompanyHeatmapRecord>>;
    async fn age_distribution(&self) -> Result<Vec<AgeDistributionRecord>>;
    async fn contact_info(&self, limit: u32) -> Result<Vec<ContactRecord>>;
    async fn upcoming_birthdays(&self, limit: u32) -> Result<Vec<BirthdayRecord>>;
    async fn municipios_by_dept(&self, cod_dept: &str) -> Result<Vec<MunicipioRecord>>;
    async fn puestos_by_muni(&self, cod_muni: &str, cod_dept: &str) -> Result<Vec<PuestoRecord>>;
}

/// HTTP implementation over reqwest
pub struct HttpAnalyticsApi {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl HttpAnalyticsApi {
    pub fn new(config: ApiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        debug!(target: "api", url = %url, "GET");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(target: "api", path = %path, error = %e, "Request failed");
                TableroError::ApiError(format!("request to {} failed: {}", path, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(target: "api", path = %path, status = %status, "Non-success status");
            return Err(TableroError::ApiError(format!(
                "{} returned status: {}",
                path, status
            )));
        }

        response.json().await.map_err(|e| {
            warn!(target: "api", path = %path, error = %e, "Failed to parse response");
            TableroError::ApiError(format!("failed to parse {} response: {}", path, e))
        })
    }
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsApi {
    async fn summary(&self, cod_dept: Option<&str>) -> Result<Summary> {
        let query = dept_query(cod_dept);
        self.get_json("/api/geo/summary", &query).await
    }

    async fn education_level(&self) -> Result<Vec<EducationRecord>> {
        self.get_json("/api/analytics/education-level", &[]).await
    }

    async fn sex_distribution(&self) -> Result<Vec<SexRecord>> {
        self.get_json("/api/analytics/sex-distribution", &[]).await
    }

    async fn top_companies(&self) -> Result<Vec<CompanyRecord>> {
        self.get_json("/api/analytics/top-companies", &[]).await
    }

    async fn puestos_demographics(&self) -> Result<Vec<PuestoDemographics>> {
        self.get_json("/api/analytics/puestos-demographics", &[])
            .await
    }

    async fn leader_efficiency(&self) -> Result<Vec<LeaderRecord>> {
        self.get_json("/api/analytics/leader-efficiency", &[]).await
    }

    async fn company_timeline(&self) -> Result<Vec<TimelineRecord>> {
        self.get_json("/api/analytics/company-timeline", &[]).await
    }

    async fn mesas_by_dept(&self, cod_dept: Option<&str>) -> Result<Vec<MesasRecord>> {
        let query = dept_query(cod_dept);
        self.get_json("/api/analytics/mesas-by-dept", &query).await
    }

    async fn empresas_by_dept(&self, cod_dept: Option<&str>) -> Result<Vec<EmpresasDeptRecord>> {
        let query = dept_query(cod_dept);
        self.get_json("/api/analytics/empresas-by-dept", &query)
            .await
    }

    async fn coverage_by_puesto(&self, limit: u32) -> Result<Vec<CoverageRecord>> {
        self.get_json(
            "/api/analytics/coverage-by-puesto",
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn verified_leaders(&self) -> Result<Vec<VerifiedLeadersRecord>> {
        self.get_json("/api/analytics/verified-leaders", &[]).await
    }

    async fn company_heatmap(&self) -> Result<Vec<CompanyHeatmapRecord>> {
        self.get_json("/api/analytics/company-heatmap", &[]).await
    }

    async fn age_distribution(&self) -> Result<Vec<AgeDistributionRecord>> {
        self.get_json("/api/analytics/age-distribution", &[]).await
    }

    async fn contact_info(&self, limit: u32) -> Result<Vec<ContactRecord>> {
        self.get_json(
            "/api/analytics/contact-info",
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn upcoming_birthdays(&self, limit: u32) -> Result<Vec<BirthdayRecord>> {
        self.get_json(
            "/api/analytics/upcoming-birthdays",
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn municipios_by_dept(&self, cod_dept: &str) -> Result<Vec<MunicipioRecord>> {
        self.get_json(
            "/api/analytics/municipios-by-dept",
            &[("cod_dept", cod_dept.to_string())],
        )
        .await
    }

    async fn puestos_by_muni(&self, cod_muni: &str, cod_dept: &str) -> Result<Vec<PuestoRecord>> {
        self.get_json(
            "/api/analytics/puestos-by-muni",
            &[
                ("cod_muni", cod_muni.to_string()),
                ("cod_dept", cod_dept.to_string()),
            ],
        )
        .await
    }
}

fn dept_query(cod_dept: Option<&str>) -> Vec<(&'static str, String)> {
    match cod_dept {
        Some(code) => vec![("cod_dept", code.to_string())],
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let api = HttpAnalyticsApi::new(ApiConfig {
            base_url: "http://backend:8000".to_string(),
            ..ApiConfig::default()
        });
        assert_eq!(
            api.endpoint("/api/geo/summary"),
            "http://backend:8000/api/geo/summary"
        );
    }

    #[test]
    fn dept_query_is_empty_for_national() {
        assert!(dept_query(None).is_empty());
        assert_eq!(dept_query(Some("05")), vec![("cod_dept", "05".to_string())]);
    }
}
