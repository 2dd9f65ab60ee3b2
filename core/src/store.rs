// Dashboard store
//
// Owns the active scope and every loaded dataset behind one RwLock. Scope
// transitions issue their endpoint fetches concurrently and await the whole
// batch; each fetch is best-effort and degrades to an empty dataset on
// failure. Batches are tagged with the epoch they were issued under and are
// discarded if a newer transition has happened by the time they settle, so a
// slow stale batch can never overwrite a newer selection's data.

use crate::api::AnalyticsApi;
use crate::config::ApiConfig;
use crate::derive::{self, AgeDistributionRow, ChartSeries, LabelCount, SexDistribution};
use crate::records::*;
use crate::scope::{RegionClick, Scope};
use crate::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

type Shared<T> = Arc<RwLock<T>>;

#[derive(Default)]
struct StoreState {
    scope: Scope,
    /// Bumped on every department-scope transition; guards stale batches
    epoch: u64,
    summary: Option<Summary>,
    /// Summary fetched at startup, restored on toggle-off without a re-fetch
    national_summary: Option<Summary>,
    education: Vec<EducationRecord>,
    sex: Vec<SexRecord>,
    companies: Vec<CompanyRecord>,
    puestos_demo: Vec<PuestoDemographics>,
    leaders: Vec<LeaderRecord>,
    timeline: Vec<TimelineRecord>,
    mesas: Vec<MesasRecord>,
    empresas: Vec<EmpresasDeptRecord>,
    coverage: Vec<CoverageRecord>,
    verified_leaders: Vec<VerifiedLeadersRecord>,
    company_heatmap: Vec<CompanyHeatmapRecord>,
    ages: Vec<AgeDistributionRecord>,
    contacts: Vec<ContactRecord>,
    birthdays: Vec<BirthdayRecord>,
    municipios: Vec<MunicipioRecord>,
    puestos: Vec<PuestoRecord>,
}

/// All derived view data, a pure function of (scope, loaded datasets)
#[derive(Debug, Clone)]
pub struct DashboardViews {
    pub scope: Scope,
    pub summary: Option<Summary>,
    pub education: Vec<LabelCount>,
    pub sex: SexDistribution,
    pub top_companies: Vec<CompanyRecord>,
    pub top_puestos: Vec<PuestoDemographics>,
    pub top_leaders: Vec<LeaderRecord>,
    pub timeline: Vec<LabelCount>,
    pub coverage: Vec<CoverageRecord>,
    pub mesas_chart: ChartSeries,
    pub empresas_chart: ChartSeries,
    pub verified_leaders: Vec<VerifiedLeadersRecord>,
    pub company_heatmap: Vec<CompanyHeatmapRecord>,
    pub age_distribution: Vec<AgeDistributionRow>,
    pub contacts: Vec<ContactRecord>,
    pub birthdays: Vec<BirthdayRecord>,
    pub municipios: Vec<MunicipioRecord>,
    pub puestos: Vec<PuestoRecord>,
}

/// Regional drill-down controller
#[derive(Clone)]
pub struct DashboardStore {
    api: Arc<dyn AnalyticsApi>,
    config: ApiConfig,
    state: Shared<StoreState>,
}

impl DashboardStore {
    pub fn new(api: Arc<dyn AnalyticsApi>, config: ApiConfig) -> Self {
        Self {
            api,
            config,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Load every base dataset and the national summary. All fetches run
    /// concurrently; a failed one leaves that dataset empty.
    pub async fn load_initial(&self) {
        let epoch = self.state.read().await.epoch;

        let (
            summary,
            education,
            sex,
            companies,
            puestos_demo,
            leaders,
            timeline,
            mesas,
            empresas,
            coverage,
            verified_leaders,
            company_heatmap,
            ages,
            contacts,
            birthdays,
        ) = tokio::join!(
            self.api.summary(None),
            self.api.education_level(),
            self.api.sex_distribution(),
            self.api.top_companies(),
            self.api.puestos_demographics(),
            self.api.leader_efficiency(),
            self.api.company_timeline(),
            self.api.mesas_by_dept(None),
            self.api.empresas_by_dept(None),
            self.api.coverage_by_puesto(self.config.coverage_limit),
            self.api.verified_leaders(),
            self.api.company_heatmap(),
            self.api.age_distribution(),
            self.api.contact_info(self.config.contact_limit),
            self.api.upcoming_birthdays(self.config.birthday_limit),
        );

        let mut state = self.state.write().await;

        // Scope-independent datasets always apply
        state.education = or_empty(education, "education-level");
        state.sex = or_empty(sex, "sex-distribution");
        state.companies = or_empty(companies, "top-companies");
        state.puestos_demo = or_empty(puestos_demo, "puestos-demographics");
        state.leaders = or_empty(leaders, "leader-efficiency");
        state.timeline = or_empty(timeline, "company-timeline");
        state.coverage = or_empty(coverage, "coverage-by-puesto");
        state.verified_leaders = or_empty(verified_leaders, "verified-leaders");
        state.company_heatmap = or_empty(company_heatmap, "company-heatmap");
        state.ages = or_empty(ages, "age-distribution");
        state.contacts = or_empty(contacts, "contact-info");
        state.birthdays = or_empty(birthdays, "upcoming-birthdays");

        match summary {
            Ok(s) => {
                state.national_summary = Some(s.clone());
                if state.epoch == epoch {
                    state.summary = Some(s);
                }
            }
            Err(e) => warn!(target: "store", error = %e, "National summary unavailable"),
        }

        // Scope-dependent datasets only apply if no transition happened
        // while the initial batch was in flight
        if state.epoch == epoch {
            state.mesas = or_empty(mesas, "mesas-by-dept");
            state.empresas = or_empty(empresas, "empresas-by-dept");
        } else {
            debug!(target: "store", "Discarding scope-dependent part of stale initial load");
        }
    }

    /// Handle a map region click: select the department, or toggle back to
    /// the national scope if it was already selected. Either way the
    /// municipality drill-down is reset.
    pub async fn click_region(&self, name: &str, code: &str) {
        let (epoch, outcome) = {
            let mut state = self.state.write().await;
            let outcome = state.scope.after_region_click(name, code);
            state.scope = outcome.scope();
            state.epoch += 1;
            state.municipios.clear();
            state.puestos.clear();
            if outcome == RegionClick::Cleared {
                // Restore the startup summary; no re-fetch
                state.summary = state.national_summary.clone();
            }
            (state.epoch, outcome)
        };

        match outcome {
            RegionClick::Selected { code, name } => {
                debug!(target: "store", dept = %name, code = %code, "Department selected");
                let (summary, mesas, empresas, municipios) = tokio::join!(
                    self.api.summary(Some(&code)),
                    self.api.mesas_by_dept(Some(&code)),
                    self.api.empresas_by_dept(Some(&code)),
                    self.api.municipios_by_dept(&code),
                );

                let mut state = self.state.write().await;
                if state.epoch != epoch {
                    debug!(target: "store", code = %code, "Discarding stale department batch");
                    return;
                }
                match summary {
                    Ok(s) => state.summary = Some(s),
                    // Prior values stay on screen
                    Err(e) => warn!(target: "store", code = %code, error = %e, "Department summary unavailable"),
                }
                state.mesas = or_empty(mesas, "mesas-by-dept");
                state.empresas = or_empty(empresas, "empresas-by-dept");
                state.municipios = or_empty(municipios, "municipios-by-dept");
            }
            RegionClick::Cleared => {
                debug!(target: "store", "Department cleared, back to national scope");
                let (mesas, empresas) = tokio::join!(
                    self.api.mesas_by_dept(None),
                    self.api.empresas_by_dept(None),
                );

                let mut state = self.state.write().await;
                if state.epoch != epoch {
                    debug!(target: "store", "Discarding stale national batch");
                    return;
                }
                state.mesas = or_empty(mesas, "mesas-by-dept");
                state.empresas = or_empty(empresas, "empresas-by-dept");
            }
        }
    }

    /// Select or toggle a municipality under the current department.
    pub async fn select_municipality(&self, muni_code: &str) -> Result<()> {
        let (epoch, fetch) = {
            let mut state = self.state.write().await;
            let next = state.scope.after_municipality_click(muni_code)?;
            state.scope = next.clone();
            state.puestos.clear();
            let fetch = match next {
                Scope::Municipality {
                    dept_code,
                    muni_code,
                    ..
                } => Some((dept_code, muni_code)),
                // Toggled back to department level; nothing to fetch
                _ => None,
            };
            (state.epoch, fetch)
        };

        if let Some((dept_code, muni_code)) = fetch {
            let puestos = self.api.puestos_by_muni(&muni_code, &dept_code).await;

            let mut state = self.state.write().await;
            if state.epoch != epoch || state.scope.muni_code() != Some(muni_code.as_str()) {
                debug!(target: "store", muni = %muni_code, "Discarding stale station batch");
                return Ok(());
            }
            state.puestos = or_empty(puestos, "puestos-by-muni");
        }
        Ok(())
    }

    pub async fn scope(&self) -> Scope {
        self.state.read().await.scope.clone()
    }

    pub async fn summary(&self) -> Option<Summary> {
        self.state.read().await.summary.clone()
    }

    /// Derive all chart/table views from the current scope and datasets.
    pub async fn views(&self) -> DashboardViews {
        let state = self.state.read().await;
        DashboardViews {
            scope: state.scope.clone(),
            summary: state.summary.clone(),
            education: derive::education_histogram(&state.scope, &state.education),
            sex: derive::sex_distribution(&state.scope, &state.sex),
            top_companies: derive::top_filtered(&state.scope, &state.companies),
            top_puestos: derive::top_filtered(&state.scope, &state.puestos_demo),
            top_leaders: derive::top_filtered(&state.scope, &state.leaders),
            timeline: derive::company_timeline(&state.scope, &state.timeline),
            coverage: derive::coverage_ranking(&state.scope, &state.coverage),
            mesas_chart: derive::mesas_chart(&state.scope, &state.mesas, &state.municipios),
            empresas_chart: derive::empresas_chart(&state.empresas),
            verified_leaders: state.verified_leaders.clone(),
            company_heatmap: state.company_heatmap.clone(),
            age_distribution: derive::age_by_sex(&state.ages),
            contacts: state.contacts.clone(),
            birthdays: state.birthdays.clone(),
            municipios: state.municipios.clone(),
            puestos: state.puestos.clone(),
        }
    }
}

fn or_empty<T>(result: Result<Vec<T>>, dataset: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!(target: "store", dataset = %dataset, error = %e, "Dataset degraded to empty");
            Vec::new()
        }
    }
}
