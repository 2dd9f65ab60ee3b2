// Payload types for the analytics API.
//
// Every record is a flat row; field names follow the backend's JSON output.
// Records carrying a `cod_departamento` implement `DeptScoped` so the
// derivation engine can filter them against the active scope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A record that can be filtered by department code
pub trait DeptScoped {
    fn dept_code(&self) -> Option<&str>;
}

macro_rules! impl_dept_scoped {
    ($($ty:ty),+ $(,)?) => {
        $(impl DeptScoped for $ty {
            fn dept_code(&self) -> Option<&str> {
                self.cod_departamento.as_deref()
            }
        })+
    };
}

/// Aggregate summary, national or department-scoped.
/// All fields optional: a lost fetch leaves placeholders on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub censo_total: Option<i64>,
    #[serde(default)]
    pub contactos_hjs: Option<i64>,
    #[serde(default)]
    pub empresas_registradas: Option<i64>,
    #[serde(default)]
    pub empleados_registrados: Option<i64>,
    #[serde(default)]
    pub total_emails: Option<i64>,
    #[serde(default)]
    pub total_celulares: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub departamento: String,
    pub municipio: String,
    #[serde(default)]
    pub nivel_educativo: Option<String>,
    pub total_personas: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SexRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub departamento: String,
    #[serde(default)]
    pub sexo: Option<String>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub empresa: String,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    pub departamento: String,
    pub total_empleados: i64,
}

/// Per polling-station demographics (hombres/mujeres split)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuestoDemographics {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub departamento: String,
    pub municipio: String,
    pub puesto: String,
    #[serde(default)]
    pub codigo_puesto: Option<String>,
    pub hombres: i64,
    pub mujeres: i64,
    pub total_general: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub lider: String,
    pub meta_votos: i64,
    pub total_recursos: i64,
    #[serde(default)]
    pub comuna: Option<String>,
    pub departamento: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    #[serde(default)]
    pub anio: Option<String>,
    pub departamento: String,
    pub total_empresas: i64,
}

/// Mesa (voting table) count per department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesasRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    #[serde(default)]
    pub departamento: Option<String>,
    pub total_mesas: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpresasDeptRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub departamento: String,
    pub total_empresas: i64,
}

/// Contact coverage per polling station, pre-sorted by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageRecord {
    #[serde(default)]
    pub cod_departamento: Option<String>,
    pub departamento: String,
    pub municipio: String,
    pub puesto: String,
    pub censo: i64,
    pub contactos: i64,
    pub cobertura_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedLeadersRecord {
    #[serde(default)]
    pub comuna: Option<String>,
    pub total_lideres: i64,
    pub lideres_verificados: i64,
    pub meta_total_votos: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub nombre_completo: Option<String>,
    #[serde(default)]
    pub celular: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthdayRecord {
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub nombre_completo: Option<String>,
    #[serde(default)]
    pub celular: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub days_until_birthday: i64,
}

/// Corporate view: employee count per company type and education level,
/// pre-sorted descending by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyHeatmapRecord {
    pub tipo_empresa: String,
    pub nivel_educativo: String,
    pub total: i64,
}

/// Corporate view: one (age range, sex) cell; ranges repeat across sexes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeDistributionRecord {
    pub rango_edad: String,
    #[serde(default)]
    pub sexo: Option<String>,
    pub total: i64,
}

/// Drill-down: municipality of the selected department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MunicipioRecord {
    pub cod_municipio: String,
    pub municipio: String,
    pub total_mesas: i64,
}

/// Drill-down: polling station of the selected municipality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuestoRecord {
    pub cod_puesto: String,
    pub puesto: String,
    #[serde(default)]
    pub direccion: Option<String>,
    pub total_mesas: i64,
}

impl_dept_scoped!(
    EducationRecord,
    SexRecord,
    CompanyRecord,
    PuestoDemographics,
    LeaderRecord,
    TimelineRecord,
    MesasRecord,
    EmpresasDeptRecord,
    CoverageRecord,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tolerates_missing_fields() {
        let s: Summary = serde_json::from_str(r#"{"censo_total": 42}"#).unwrap();
        assert_eq!(s.censo_total, Some(42));
        assert_eq!(s.contactos_hjs, None);
    }

    #[test]
    fn sex_record_accepts_null_sexo() {
        let r: SexRecord = serde_json::from_str(
            r#"{"cod_departamento":"05","departamento":"Antioquia","sexo":null,"total":2}"#,
        )
        .unwrap();
        assert_eq!(r.sexo, None);
        assert_eq!(r.dept_code(), Some("05"));
    }
}
