// Dataset filter/aggregate engine
//
// Pure functions from (scope, loaded datasets) to per-chart view data. No
// state lives here; the store recomputes these on every scope or dataset
// change. Ranked datasets arrive pre-sorted from the API and are never
// re-sorted client-side.

use crate::records::*;
use crate::scope::Scope;

/// Default bucket for education records with no level
pub const UNREGISTERED_LABEL: &str = "No Registrado";
/// Maximum bars in the education histogram
pub const EDUCATION_BUCKETS: usize = 8;
/// Rows shown in ranked views (companies, stations, leaders, coverage)
pub const TOP_N: usize = 10;
/// Maximum characters in a bar-chart axis label
pub const AXIS_LABEL_CHARS: usize = 12;

/// One labeled bar/slice of a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub value: i64,
}

/// Sex split with normalized labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SexDistribution {
    pub masculino: i64,
    pub femenino: i64,
    pub otro: i64,
}

/// Parallel label/value series for a bar chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// Education histogram: sum `total_personas` per level, labels in first-seen
/// order, truncated to the first `EDUCATION_BUCKETS` for display.
pub fn education_histogram(scope: &Scope, records: &[EducationRecord]) -> Vec<LabelCount> {
    let mut buckets: Vec<LabelCount> = Vec::new();
    for record in records.iter().filter(|r| scope.matches(*r)) {
        let label = record
            .nivel_educativo
            .as_deref()
            .unwrap_or(UNREGISTERED_LABEL);
        match buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.value += record.total_personas,
            None => buckets.push(LabelCount {
                label: label.to_string(),
                value: record.total_personas,
            }),
        }
    }
    buckets.truncate(EDUCATION_BUCKETS);
    buckets
}

/// Sex distribution: `M` → Masculino, `F` → Femenino, anything else → Otro.
pub fn sex_distribution(scope: &Scope, records: &[SexRecord]) -> SexDistribution {
    let mut dist = SexDistribution::default();
    for record in records.iter().filter(|r| scope.matches(*r)) {
        match record.sexo.as_deref() {
            Some("M") => dist.masculino += record.total,
            Some("F") => dist.femenino += record.total,
            _ => dist.otro += record.total,
        }
    }
    dist
}

/// Scope-filter then keep the first `TOP_N` rows in API order.
pub fn top_filtered<R: DeptScoped + Clone>(scope: &Scope, records: &[R]) -> Vec<R> {
    records
        .iter()
        .filter(|r| scope.matches(*r))
        .take(TOP_N)
        .cloned()
        .collect()
}

/// Company constitution timeline: total per year, years ascending.
pub fn company_timeline(scope: &Scope, records: &[TimelineRecord]) -> Vec<LabelCount> {
    let mut per_year: Vec<LabelCount> = Vec::new();
    for record in records.iter().filter(|r| scope.matches(*r)) {
        let Some(year) = record.anio.as_deref() else {
            continue;
        };
        match per_year.iter_mut().find(|p| p.label == year) {
            Some(point) => point.value += record.total_empresas,
            None => per_year.push(LabelCount {
                label: year.to_string(),
                value: record.total_empresas,
            }),
        }
    }
    per_year.sort_by(|a, b| a.label.cmp(&b.label));
    per_year
}

/// Coverage ranking: first `TOP_N`, pre-sorted by the API.
pub fn coverage_ranking(scope: &Scope, records: &[CoverageRecord]) -> Vec<CoverageRecord> {
    top_filtered(scope, records)
}

/// Mesas bar chart. With a department active the source switches to the
/// municipality drill-down dataset; otherwise the per-department dataset.
pub fn mesas_chart(
    scope: &Scope,
    by_dept: &[MesasRecord],
    municipios: &[MunicipioRecord],
) -> ChartSeries {
    if scope.dept_code().is_some() {
        ChartSeries {
            labels: municipios
                .iter()
                .map(|m| truncate_label(&m.municipio, AXIS_LABEL_CHARS))
                .collect(),
            values: municipios.iter().map(|m| m.total_mesas).collect(),
        }
    } else {
        ChartSeries {
            labels: by_dept
                .iter()
                .map(|d| {
                    let name = d
                        .departamento
                        .as_deref()
                        .or(d.cod_departamento.as_deref())
                        .unwrap_or("Desconocido");
                    truncate_label(name, AXIS_LABEL_CHARS)
                })
                .collect(),
            values: by_dept.iter().map(|d| d.total_mesas).collect(),
        }
    }
}

/// Companies bar chart over the (already scope-fetched) per-department
/// dataset, with the same axis-label truncation rule.
pub fn empresas_chart(records: &[EmpresasDeptRecord]) -> ChartSeries {
    ChartSeries {
        labels: records
            .iter()
            .map(|r| truncate_label(&r.departamento, AXIS_LABEL_CHARS))
            .collect(),
        values: records.iter().map(|r| r.total_empresas).collect(),
    }
}

/// One grouped bar of the corporate age chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeDistributionRow {
    pub rango_edad: String,
    pub masculino: i64,
    pub femenino: i64,
    pub desconocido: i64,
}

/// Corporate age chart: fold the per-(range, sex) cells into one row per age
/// range, ranges in first-seen (API) order, missing sex bucketed as
/// Desconocido. These rows carry no department code and are never
/// scope-filtered.
pub fn age_by_sex(records: &[AgeDistributionRecord]) -> Vec<AgeDistributionRow> {
    let mut rows: Vec<AgeDistributionRow> = Vec::new();
    for record in records {
        if !rows.iter().any(|r| r.rango_edad == record.rango_edad) {
            rows.push(AgeDistributionRow {
                rango_edad: record.rango_edad.clone(),
                ..AgeDistributionRow::default()
            });
        }
        if let Some(row) = rows.iter_mut().find(|r| r.rango_edad == record.rango_edad) {
            match record.sexo.as_deref() {
                Some("M") => row.masculino += record.total,
                Some("F") => row.femenino += record.total,
                _ => row.desconocido += record.total,
            }
        }
    }
    rows
}

/// Truncate an axis label to at most `max` characters (not bytes).
pub fn truncate_label(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

/// Locale-style count for display: thousands separators, or a placeholder
/// while the value has not loaded yet (never a formatted zero).
pub fn format_count(value: Option<i64>) -> String {
    match value {
        None => "...".to_string(),
        Some(n) => group_thousands(n),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_label("Bogotá D.C. Centro", 12), "Bogotá D.C. ");
        assert_eq!(truncate_label("Cali", 12), "Cali");
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count(Some(999)), "999");
        assert_eq!(format_count(Some(1_000)), "1,000");
        assert_eq!(format_count(Some(1_234_567)), "1,234,567");
        assert_eq!(format_count(Some(-12_345)), "-12,345");
    }

    #[test]
    fn format_count_placeholder_before_first_load() {
        assert_eq!(format_count(None), "...");
    }
}
