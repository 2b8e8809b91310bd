//! Network entry point.

use hn_graph::{ForestBuilder, SegmentForest};
use tracing::{debug, info};

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::forward::{self, NetworkContext};
use crate::loop_return::{self, LoopReport};
use crate::network::{NetworkCalculationParameters, NetworkSegment};

/// Network-wide figures derived from the segment results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSummary {
    pub segment_count: usize,
    pub loop_length_m: f64,
    /// Flow drawn from the source: sum over the roots (L/min)
    pub source_flow_lpm: f64,
    pub total_heat_loss_w: f64,
    pub total_return_heat_loss_w: f64,
    /// `None` for an empty network
    pub lowest_outlet_pressure_bar: Option<f64>,
    /// Segment with the lowest outlet pressure
    pub critical_segment_id: Option<String>,
    /// Segments whose recommendation carries a warning
    pub warning_count: usize,
}

impl NetworkSummary {
    pub fn from_segments(segments: &[NetworkSegment]) -> Self {
        let critical = segments
            .iter()
            .min_by(|a, b| a.outlet_pressure_bar.total_cmp(&b.outlet_pressure_bar));
        let total = |value: fn(&NetworkSegment) -> f64| {
            segments.iter().fold(0.0, |acc, s| acc + value(s))
        };

        Self {
            segment_count: segments.len(),
            loop_length_m: total(|s| s.length_m),
            source_flow_lpm: segments
                .iter()
                .filter(|s| s.is_root())
                .fold(0.0, |acc, s| acc + s.result.flow_rate_lpm),
            total_heat_loss_w: total(|s| s.result.heat_loss_w),
            total_return_heat_loss_w: total(|s| s.result.return_heat_loss_w),
            lowest_outlet_pressure_bar: critical.map(|s| s.outlet_pressure_bar),
            critical_segment_id: critical.map(|s| s.id.clone()),
            warning_count: segments.iter().filter(|s| s.result.has_warnings()).count(),
        }
    }
}

/// Everything a calculation reports besides the per-segment results.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOutcome {
    pub summary: NetworkSummary,
    /// Present for recirculated hot water only.
    pub loop_report: Option<LoopReport>,
}

impl NetworkOutcome {
    /// False when the loop hit its iteration cap or a repair budget ran out.
    pub fn is_fully_converged(&self) -> bool {
        self.loop_report
            .as_ref()
            .is_none_or(|r| r.converged && r.repairs.iter().all(|rep| rep.satisfied))
    }
}

/// Size every segment of the network with the default thresholds.
///
/// Results are written into `params.segments`.
pub fn calculate_network(
    params: &mut NetworkCalculationParameters,
) -> SolverResult<NetworkOutcome> {
    calculate_network_with_config(params, &SolverConfig::default())
}

/// Size every segment of the network.
///
/// The forest is validated before anything is written: duplicate ids,
/// dangling parents and parent cycles are errors. Every previous result is
/// then cleared, so repeated calls on the same input give the same output.
pub fn calculate_network_with_config(
    params: &mut NetworkCalculationParameters,
    config: &SolverConfig,
) -> SolverResult<NetworkOutcome> {
    config.validate()?;
    validate_parameters(params)?;
    let forest = build_forest(&params.segments)?;
    let ctx = NetworkContext::from_params(params);

    info!(
        network = %ctx.network_type,
        material = %ctx.material,
        segments = forest.len(),
        roots = forest.roots().len(),
        "calculating network"
    );

    let segments = params.segments.as_mut_slice();
    segments.iter_mut().for_each(NetworkSegment::reset);

    forward::size_bottom_up(&forest, segments, &ctx, config)?;
    forward::propagate_top_down(&forest, segments, &ctx, config);

    let loop_report = if ctx.network_type.has_loop() {
        Some(loop_return::solve_loop(&forest, segments, &ctx, config))
    } else {
        None
    };

    let summary = NetworkSummary::from_segments(segments);
    debug!(
        source_flow_lpm = summary.source_flow_lpm,
        warnings = summary.warning_count,
        "network calculated"
    );

    Ok(NetworkOutcome {
        summary,
        loop_report,
    })
}

/// Build the segment forest; arena ids follow the slice order.
pub fn build_forest(segments: &[NetworkSegment]) -> SolverResult<SegmentForest> {
    let mut builder = ForestBuilder::with_capacity(segments.len());
    for segment in segments {
        builder.add_segment(segment.id.as_str(), segment.parent_id.as_str());
    }
    Ok(builder.build()?)
}

fn validate_parameters(params: &NetworkCalculationParameters) -> SolverResult<()> {
    let scalars = [
        ("supply pressure", params.supply_pressure_bar),
        ("required pressure", params.required_pressure_bar),
        ("water temperature", params.water_temperature_c),
        ("ambient temperature", params.ambient_temperature_c),
        ("insulation thickness", params.insulation_thickness_mm),
        ("cold water temperature", params.cold_water_temperature_c),
    ];
    for (what, value) in scalars {
        if !value.is_finite() {
            return Err(SolverError::InvalidInput {
                what: format!("{what} is not finite ({value})"),
            });
        }
    }
    if params.insulation_thickness_mm < 0.0 {
        return Err(SolverError::InvalidInput {
            what: "insulation thickness is negative".to_string(),
        });
    }

    for segment in &params.segments {
        if !segment.length_m.is_finite() || segment.length_m < 0.0 {
            return Err(SolverError::InvalidInput {
                what: format!(
                    "segment '{}' has invalid length {}",
                    segment.id, segment.length_m
                ),
            });
        }
        if !segment.elevation_m.is_finite() {
            return Err(SolverError::InvalidInput {
                what: format!(
                    "segment '{}' has invalid elevation {}",
                    segment.id, segment.elevation_m
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_catalog::{Fixture, FixtureKind};
    use hn_graph::GraphError;

    #[test]
    fn empty_network_is_trivial() {
        let mut params = NetworkCalculationParameters::default();
        let outcome = calculate_network(&mut params).unwrap();
        assert_eq!(outcome.summary.segment_count, 0);
        assert_eq!(outcome.summary.lowest_outlet_pressure_bar, None);
        assert!(outcome.summary.loop_length_m.is_sign_positive());
        assert!(outcome.summary.source_flow_lpm.is_sign_positive());
        assert!(params.loop_length_m().is_sign_positive());
        assert!(outcome.loop_report.is_none());
        assert!(outcome.is_fully_converged());
    }

    #[test]
    fn nan_length_is_rejected() {
        let mut params = NetworkCalculationParameters {
            segments: vec![NetworkSegment::new("a", "", f64::NAN)],
            ..Default::default()
        };
        let err = calculate_network(&mut params).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));
    }

    #[test]
    fn dangling_parent_leaves_results_untouched() {
        let mut params = NetworkCalculationParameters {
            segments: vec![
                NetworkSegment::new("a", "", 5.0)
                    .with_fixture(Fixture::new(FixtureKind::Shower, 1)),
                NetworkSegment::new("b", "ghost", 5.0),
            ],
            ..Default::default()
        };
        params.segments[0].result.recommendation = "stale".into();

        let err = calculate_network(&mut params).unwrap_err();
        assert_eq!(
            err,
            SolverError::Graph(GraphError::MissingParent {
                segment: "b".into(),
                parent: "ghost".into(),
            })
        );
        assert_eq!(params.segments[0].result.recommendation, "stale");
    }

    #[test]
    fn summary_tracks_lowest_pressure() {
        let mut params = NetworkCalculationParameters {
            segments: vec![
                NetworkSegment::new("riser", "", 6.0).with_elevation(6.0),
                NetworkSegment::new("flat", "riser", 8.0)
                    .with_fixture(Fixture::new(FixtureKind::Bathtub, 1)),
            ],
            ..Default::default()
        };
        let outcome = calculate_network(&mut params).unwrap();
        assert_eq!(outcome.summary.critical_segment_id.as_deref(), Some("flat"));
        assert_eq!(
            outcome.summary.lowest_outlet_pressure_bar,
            Some(params.segments[1].outlet_pressure_bar)
        );
        assert!((outcome.summary.source_flow_lpm - 19.8).abs() < 1e-12);
        assert_eq!(outcome.summary.loop_length_m, 14.0);
    }
}
