// Terminal walkthrough of the dashboard core.
//
// Loads every base dataset, prints the national view, and if a department
// code is given as an argument, drills into it (and its busiest
// municipality) the way a map click would.

use std::sync::Arc;
use tablero_core::derive::format_count;
use tablero_core::{ApiConfig, DashboardStore, DashboardViews, HttpAnalyticsApi};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tablero_core::telemetry::init_logging();

    let config = ApiConfig::from_env();
    info!(target: "dash_cli", base_url = %config.base_url, "Starting dashboard walkthrough");

    let api = Arc::new(HttpAnalyticsApi::new(config.clone()));
    let store = DashboardStore::new(api, config.clone());

    store.load_initial().await;
    print_views("Vista Nacional", &store.views().await);

    // Boundary document is optional for the terminal demo
    match tablero_core::map::load_boundaries(&config.map_path) {
        Ok(doc) => info!(target: "dash_cli", regions = doc.features.len(), "Boundary document loaded"),
        Err(e) => info!(target: "dash_cli", error = %e, "No boundary document; skipping map"),
    }

    // Optional drill-down: dash_cli <cod_dept> [name]
    let mut args = std::env::args().skip(1);
    if let Some(code) = args.next() {
        let name = args.next().unwrap_or_else(|| code.clone());
        store.click_region(&name, &code).await;
        let views = store.views().await;
        print_views(&format!("Departamento {}", name), &views);

        if let Some(muni) = views.municipios.first() {
            store.select_municipality(&muni.cod_municipio).await?;
            let views = store.views().await;
            println!("\n== Puestos de {} ==", muni.municipio);
            for puesto in &views.puestos {
                println!(
                    "  {:<40} {:>6} mesas",
                    puesto.puesto,
                    format_count(Some(puesto.total_mesas))
                );
            }
        }

        // Toggle back to the national scope
        store.click_region(&name, &code).await;
        print_views("Vista Nacional (restaurada)", &store.views().await);
    }

    Ok(())
}

fn print_views(title: &str, views: &DashboardViews) {
    println!("\n===== {} =====", title);

    let summary = views.summary.as_ref();
    println!(
        "Censo: {}  Contactos: {}  Empresas: {}  Empleados: {}",
        format_count(summary.and_then(|s| s.censo_total)),
        format_count(summary.and_then(|s| s.contactos_hjs)),
        format_count(summary.and_then(|s| s.empresas_registradas)),
        format_count(summary.and_then(|s| s.empleados_registrados)),
    );

    println!(
        "Sexo: Masculino {}  Femenino {}  Otro {}",
        format_count(Some(views.sex.masculino)),
        format_count(Some(views.sex.femenino)),
        format_count(Some(views.sex.otro)),
    );

    println!("Nivel educativo:");
    for bucket in &views.education {
        println!("  {:<20} {}", bucket.label, format_count(Some(bucket.value)));
    }

    println!("Mesas ({} barras):", views.mesas_chart.labels.len());
    for (label, value) in views
        .mesas_chart
        .labels
        .iter()
        .zip(&views.mesas_chart.values)
        .take(10)
    {
        println!("  {:<12} {}", label, format_count(Some(*value)));
    }

    println!("Top empresas:");
    for company in &views.top_companies {
        println!(
            "  {:<40} {}",
            company.empresa,
            format_count(Some(company.total_empleados))
        );
    }

    println!("Edades (empleados):");
    for row in &views.age_distribution {
        println!(
            "  {:<8} M {:<8} F {:<8} ? {}",
            row.rango_edad,
            format_count(Some(row.masculino)),
            format_count(Some(row.femenino)),
            format_count(Some(row.desconocido)),
        );
    }

    println!("Cobertura (top {}):", views.coverage.len());
    for row in &views.coverage {
        println!(
            "  {:<24} {:<24} {:>6.2}%",
            row.municipio, row.puesto, row.cobertura_pct
        );
    }
}
