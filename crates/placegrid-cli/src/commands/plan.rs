use std::path::Path;

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use placegrid_core::boundary::load_boundary;
use placegrid_core::coverage::planner;
use placegrid_core::metrics::RunMetrics;

use crate::cli::PlanArgs;
use crate::config::{load_config, planner_overrides};
use crate::output::OutputWriter;

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Radius (m)")]
    radius_m: f64,
    #[tabled(rename = "Spacing (°)")]
    spacing: String,
    #[tabled(rename = "Grid")]
    grid_points: usize,
    #[tabled(rename = "Gap fill")]
    gap_fill_points: usize,
    #[tabled(rename = "Coverage")]
    coverage: String,
}

pub fn execute(args: PlanArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config(
        config_path,
        planner_overrides(
            &args.categories,
            args.radius_m,
            args.overlap_factor,
            args.circle_vertices,
            args.no_gap_fill,
            args.max_gap_passes,
        ),
    )?;
    let planner_config = config.planner_config()?;
    let profiles = config.profiles.value.clone();

    let boundary = load_boundary(&args.boundary)?;
    let mut metrics = RunMetrics::new();
    let plan = planner::plan(&boundary, &profiles, &planner_config, &mut metrics)?;

    if let Some(path) = &args.points_out {
        placegrid_export::write_points(path, &plan.points)?;
        output.success(format!("Wrote {} points to {}", plan.points.len(), path.display()));
    }

    if output.is_json() {
        output.payload(&serde_json::json!({
            "points": plan.points.len(),
            "profiles": plan.profiles,
            "metrics": metrics,
        }));
    } else {
        let rows: Vec<ProfileRow> = plan
            .profiles
            .iter()
            .map(|profile| ProfileRow {
                category: profile.category.clone(),
                radius_m: profile.radius_m,
                spacing: format!("{:.5}", profile.spacing_deg),
                grid_points: profile.grid_points,
                gap_fill_points: profile.gap_fill_points,
                coverage: format!("{:.1}%", profile.covered_ratio * 100.0),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
        output.success(format!(
            "{} search points planned ({} duplicates dropped)",
            plan.points.len(),
            metrics.points_deduped
        ));
    }

    Ok(())
}
