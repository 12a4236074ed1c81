//! Per-profile planning: grid pass, coverage validation, gap filling, and
//! cross-profile deduplication into one finalized ordered point set.

use std::collections::HashSet;

use serde::Serialize;

use crate::boundary::RegionBoundary;
use crate::config::{DedupScope, PlannerConfig};
use crate::coverage::{gapfill, grid, validator};
use crate::error::{PlacegridError, Result};
use crate::metrics::RunMetrics;
use crate::models::{meters_to_degrees, Coordinate, PointOrigin, SearchPoint, SearchProfile};

/// Planning summary for one search profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfilePlan {
    pub category: String,
    pub radius_m: f64,
    pub spacing_deg: f64,
    pub grid_points: usize,
    pub gap_fill_points: usize,
    pub gap_passes: u32,
    pub covered_ratio: f64,
}

/// The finalized point set plus per-profile summaries.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub points: Vec<SearchPoint>,
    pub profiles: Vec<ProfilePlan>,
}

/// Plan the full set of search points for all profiles.
///
/// For each profile the grid spacing is `radius_in_degrees * overlap_factor`;
/// gap-fill passes run until the uncovered ratio drops below the configured
/// epsilon or the pass cap is reached. Output ordering is deterministic and
/// stable for identical inputs.
pub fn plan(
    boundary: &RegionBoundary,
    profiles: &[SearchProfile],
    config: &PlannerConfig,
    metrics: &mut RunMetrics,
) -> Result<SearchPlan> {
    if profiles.is_empty() {
        return Err(PlacegridError::ConfigMissing { key: "profiles".to_string() });
    }

    let mut all_points: Vec<SearchPoint> = Vec::new();
    let mut summaries: Vec<ProfilePlan> = Vec::new();

    for profile in profiles {
        if !(profile.radius_m > 0.0) {
            return Err(PlacegridError::ConfigInvalid {
                key: format!("profiles.{}.radius_m", profile.category),
                reason: "search radius must be positive".to_string(),
            });
        }

        let spacing_deg = meters_to_degrees(profile.radius_m) * config.overlap_factor;
        let mut points: Vec<(Coordinate, PointOrigin)> = grid::generate_grid(boundary, spacing_deg)
            .into_iter()
            .map(|coordinate| (coordinate, PointOrigin::Grid))
            .collect();
        let grid_count = points.len();
        tracing::info!(
            category = %profile.category,
            radius_m = profile.radius_m,
            spacing_deg,
            points = grid_count,
            "grid pass complete"
        );

        let centers = |points: &[(Coordinate, PointOrigin)]| -> Vec<Coordinate> {
            points.iter().map(|(coordinate, _)| *coordinate).collect()
        };

        let mut report =
            validator::residual(boundary, &centers(&points), profile.radius_m, config.circle_vertices);
        let mut gap_passes = 0u32;
        let mut gap_fill_count = 0usize;

        while config.gap_fill
            && gap_passes < config.max_gap_passes
            && report.uncovered_ratio() > config.gap_epsilon
        {
            let fills = gapfill::fill_points(&report.residual);
            if fills.is_empty() {
                break;
            }
            gap_fill_count += fills.len();
            gap_passes += 1;
            tracing::info!(
                category = %profile.category,
                added = fills.len(),
                pass = gap_passes,
                uncovered = report.uncovered_ratio(),
                "gap-fill pass"
            );
            points.extend(fills.into_iter().map(|coordinate| (coordinate, PointOrigin::GapFill)));
            report = validator::residual(
                boundary,
                &centers(&points),
                profile.radius_m,
                config.circle_vertices,
            );
        }

        metrics.grid_points += grid_count;
        metrics.gap_fill_points += gap_fill_count;
        summaries.push(ProfilePlan {
            category: profile.category.clone(),
            radius_m: profile.radius_m,
            spacing_deg,
            grid_points: grid_count,
            gap_fill_points: gap_fill_count,
            gap_passes,
            covered_ratio: report.covered_ratio,
        });

        all_points.extend(
            points
                .into_iter()
                .map(|(coordinate, origin)| SearchPoint::new(coordinate, profile.clone(), origin)),
        );
    }

    // Exact-coordinate duplicates are dropped first-seen-wins, so a later
    // profile reusing an earlier profile's point does not issue a second
    // physically-identical query (scope `global`), or is kept per category
    // (scope `per-profile`).
    let mut seen: HashSet<(Option<String>, (u64, u64))> = HashSet::new();
    let before = all_points.len();
    let points: Vec<SearchPoint> = all_points
        .into_iter()
        .filter(|point| {
            let scope = match config.dedup_scope {
                DedupScope::Global => None,
                DedupScope::PerProfile => Some(point.profile.category.clone()),
            };
            seen.insert((scope, point.coordinate.bits()))
        })
        .collect();
    metrics.points_deduped += before - points.len();

    Ok(SearchPlan { points, profiles: summaries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::circle::CoverageCircle;
    use geo::{Area, LineString, MultiPolygon, Polygon, UnaryUnion};

    fn square_boundary(side_deg: f64) -> RegionBoundary {
        let polygon = Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (side_deg, 0.0),
                (side_deg, side_deg),
                (0.0, side_deg),
                (0.0, 0.0),
            ]),
            vec![],
        );
        RegionBoundary::new(MultiPolygon(vec![polygon])).unwrap()
    }

    fn config() -> PlannerConfig {
        PlannerConfig {
            overlap_factor: 1.4,
            circle_vertices: 32,
            gap_fill: true,
            max_gap_passes: 1,
            gap_epsilon: 0.01,
            dedup_scope: DedupScope::Global,
        }
    }

    #[test]
    fn test_square_boundary_coverage() {
        // 0.1 degree square, 2000 m radius, 1.4 overlap: the planner must
        // produce a non-empty deterministic set whose circles cover >= 99%
        let boundary = square_boundary(0.1);
        let profiles = vec![SearchProfile::new("hospital", 2000.0)];
        let mut metrics = RunMetrics::new();

        let plan = plan(&boundary, &profiles, &config(), &mut metrics).unwrap();
        assert!(!plan.points.is_empty());
        assert!(plan.profiles[0].covered_ratio >= 0.99, "covered {}", plan.profiles[0].covered_ratio);

        let circles: Vec<_> = plan
            .points
            .iter()
            .map(|p| CoverageCircle::new(p.coordinate, p.profile.radius_m).to_polygon(32))
            .collect();
        let union = circles.iter().unary_union();
        use geo::BooleanOps;
        let residual = boundary.as_multi_polygon().difference(&union);
        assert!(residual.unsigned_area() / boundary.area_sq_deg() <= 0.01);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let boundary = square_boundary(0.1);
        let profiles =
            vec![SearchProfile::new("hospital", 2000.0), SearchProfile::new("pharmacy", 1500.0)];

        let first = plan(&boundary, &profiles, &config(), &mut RunMetrics::new()).unwrap();
        let second = plan(&boundary, &profiles, &config(), &mut RunMetrics::new()).unwrap();
        assert_eq!(first.points, second.points);
    }

    #[test]
    fn test_global_dedup_drops_exact_repeats_across_profiles() {
        let boundary = square_boundary(0.1);
        // identical radius produces an identical lattice for both profiles
        let profiles =
            vec![SearchProfile::new("hospital", 2000.0), SearchProfile::new("pharmacy", 2000.0)];
        let mut metrics = RunMetrics::new();

        let result = plan(&boundary, &profiles, &config(), &mut metrics).unwrap();
        let hospital_count =
            result.points.iter().filter(|p| p.profile.category == "hospital").count();
        let pharmacy_count =
            result.points.iter().filter(|p| p.profile.category == "pharmacy").count();

        assert!(hospital_count > 0);
        // first-seen wins: the second profile's identical points are dropped
        assert_eq!(pharmacy_count, 0);
        assert_eq!(metrics.points_deduped, hospital_count);
    }

    #[test]
    fn test_per_profile_dedup_keeps_each_category() {
        let boundary = square_boundary(0.1);
        let profiles =
            vec![SearchProfile::new("hospital", 2000.0), SearchProfile::new("pharmacy", 2000.0)];
        let cfg = PlannerConfig { dedup_scope: DedupScope::PerProfile, ..config() };
        let mut metrics = RunMetrics::new();

        let result = plan(&boundary, &profiles, &cfg, &mut metrics).unwrap();
        let hospital_count =
            result.points.iter().filter(|p| p.profile.category == "hospital").count();
        let pharmacy_count =
            result.points.iter().filter(|p| p.profile.category == "pharmacy").count();

        assert_eq!(hospital_count, pharmacy_count);
        assert_eq!(metrics.points_deduped, 0);
    }

    #[test]
    fn test_empty_profiles_is_configuration_error() {
        let boundary = square_boundary(0.1);
        let err = plan(&boundary, &[], &config(), &mut RunMetrics::new()).unwrap_err();
        assert!(matches!(err, PlacegridError::ConfigMissing { .. }));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let boundary = square_boundary(0.1);
        let profiles = vec![SearchProfile::new("hospital", 0.0)];
        let err = plan(&boundary, &profiles, &config(), &mut RunMetrics::new()).unwrap_err();
        assert!(matches!(err, PlacegridError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_origins_are_tagged() {
        let boundary = square_boundary(0.1);
        let profiles = vec![SearchProfile::new("hospital", 2000.0)];
        let mut metrics = RunMetrics::new();

        let result = plan(&boundary, &profiles, &config(), &mut metrics).unwrap();
        let grid_count =
            result.points.iter().filter(|p| p.origin == PointOrigin::Grid).count();
        assert_eq!(grid_count, metrics.grid_points);
    }
}
