//! Recirculation return solver.
//!
//! Return flow, return diameter and the temperature field depend on each
//! other. They are solved by a bounded fixed point, followed by a repair
//! loop that inflates the circulation of any tree whose water comes back
//! too cold.

use hn_core::{EPSILON, SegmentId, relative_change};
use hn_graph::SegmentForest;
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::forward::{FlowCarrier, NetworkContext, propagate_supply_temperatures};
use crate::network::NetworkSegment;
use crate::segment::{apply_return_thermal, return_flow_for_heat, size_return};

/// Outcome of the loop fixed point.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    /// Fixed-point iterations performed after the initial pass
    pub iterations: usize,
    pub converged: bool,
    /// Largest relative return-flow change of the last iteration
    pub max_relative_change: f64,
    /// One entry per root, in root order
    pub repairs: Vec<RepairReport>,
}

/// Outcome of the return-temperature repair of one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairReport {
    pub root_id: String,
    /// Inflation steps applied (zero if the tree was already warm enough)
    pub attempts: usize,
    pub satisfied: bool,
    /// Remaining shortfall below the minimum return temperature (°C)
    pub final_deficit_c: f64,
}

pub(crate) fn solve_loop(
    forest: &SegmentForest,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
    config: &SolverConfig,
) -> LoopReport {
    let post_order = forest.post_order();

    // Initial pass: supply losses only, return pipes not yet sized.
    update_return_flows(forest, post_order.iter().copied(), segments, ctx, config);
    update_return_temperatures(forest, post_order.iter().copied(), segments, ctx);

    let mut iterations = 0;
    let mut converged = false;
    let mut max_change = 0.0;
    for iteration in 1..=config.max_loop_iterations {
        iterations = iteration;
        let previous: Vec<f64> = segments
            .iter()
            .map(|s| s.result.return_flow_rate_lpm)
            .collect();

        propagate_supply_temperatures(
            forest,
            forest.pre_order(),
            segments,
            ctx,
            FlowCarrier::Circulation,
        );
        update_return_flows(forest, post_order.iter().copied(), segments, ctx, config);
        update_return_temperatures(forest, post_order.iter().copied(), segments, ctx);

        max_change = previous
            .iter()
            .zip(segments.iter())
            .map(|(old, s)| relative_change(*old, s.result.return_flow_rate_lpm))
            .fold(0.0, f64::max);
        debug!(iteration, max_change, "loop iteration");

        if max_change < config.loop_tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        info!(iterations, max_change, "loop return converged");
    } else {
        warn!(
            iterations,
            max_change, "loop return stopped at the iteration cap without converging"
        );
    }

    let repairs = forest
        .roots()
        .iter()
        .map(|&root| repair_root(forest, root, segments, ctx, config))
        .collect();

    LoopReport {
        iterations,
        converged,
        max_relative_change: max_change,
        repairs,
    }
}

/// Return flows and return pipe sizes along `order` (children first).
///
/// A leaf circulates enough to carry its own supply and return losses with
/// the allowed drop; a parent carries the sum of its children.
fn update_return_flows(
    forest: &SegmentForest,
    order: impl IntoIterator<Item = SegmentId>,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
    config: &SolverConfig,
) {
    for id in order {
        let flow = if forest.is_leaf(id) {
            let r = &segments[id.index()].result;
            return_flow_for_heat(
                r.heat_loss_w + r.return_heat_loss_w,
                config.loop_temperature_drop_c,
            )
        } else {
            forest
                .children(id)
                .iter()
                .map(|c| segments[c.index()].result.return_flow_rate_lpm)
                .sum()
        };
        let result = &mut segments[id.index()].result;
        result.return_flow_rate_lpm = flow;
        size_return(result, ctx.material, config);
    }
}

/// Return temperatures along `order` (children first).
///
/// Water turns around at a leaf, so its return inlet is its supply outlet.
/// A parent receives the flow-weighted mix of its children's return outlets.
fn update_return_temperatures(
    forest: &SegmentForest,
    order: impl IntoIterator<Item = SegmentId>,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
) {
    for id in order {
        let inlet = if forest.is_leaf(id) {
            segments[id.index()].result.outlet_temperature_c
        } else {
            mixed_temperature(forest.children(id).iter().map(|c| {
                let r = &segments[c.index()].result;
                (r.return_flow_rate_lpm, r.return_outlet_temperature_c)
            }))
        };
        let segment = &mut segments[id.index()];
        apply_return_thermal(
            &mut segment.result,
            segment.length_m,
            inlet,
            ctx.ambient_temperature_c,
            ctx.insulation_thickness_mm,
        );
    }
}

/// Flow-weighted mean of `(flow, temperature)` streams; plain mean without flow.
fn mixed_temperature(streams: impl Iterator<Item = (f64, f64)>) -> f64 {
    let mut weighted = 0.0;
    let mut total_flow = 0.0;
    let mut sum = 0.0;
    let mut count = 0_usize;
    for (flow, temp) in streams {
        weighted += flow * temp;
        total_flow += flow;
        sum += temp;
        count += 1;
    }
    if total_flow > EPSILON {
        weighted / total_flow
    } else if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// Inflate the circulation of one tree until its return water is warm enough.
fn repair_root(
    forest: &SegmentForest,
    root: SegmentId,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
    config: &SolverConfig,
) -> RepairReport {
    let target = ctx.water_temperature_c - config.loop_temperature_drop_c;
    let deficit_of = |segments: &[NetworkSegment]| {
        target - segments[root.index()].result.return_outlet_temperature_c
    };

    // Parents first; reversed it lists children first.
    let subtree = forest.subtree(root);
    let mut deficit = deficit_of(segments);
    let mut attempts = 0;

    while deficit >= config.repair_tolerance_c && attempts < config.max_repair_attempts {
        attempts += 1;
        for id in &subtree {
            segments[id.index()].result.return_flow_rate_lpm *= config.repair_factor;
        }
        propagate_supply_temperatures(
            forest,
            subtree.iter().copied(),
            segments,
            ctx,
            FlowCarrier::Circulation,
        );
        for id in &subtree {
            size_return(&mut segments[id.index()].result, ctx.material, config);
        }
        update_return_temperatures(forest, subtree.iter().rev().copied(), segments, ctx);

        deficit = deficit_of(segments);
        debug!(root = %segments[root.index()].id, attempts, deficit, "repair step");
    }

    let satisfied = deficit < config.repair_tolerance_c;
    let root_id = segments[root.index()].id.clone();
    if !satisfied {
        warn!(
            root = %root_id,
            attempts,
            deficit,
            "return temperature still below target after repair"
        );
    } else if attempts > 0 {
        info!(root = %root_id, attempts, "return temperature repaired");
    }

    RepairReport {
        root_id,
        attempts,
        satisfied,
        final_deficit_c: deficit.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_is_flow_weighted() {
        let t = mixed_temperature([(1.0, 50.0), (3.0, 58.0)].into_iter());
        assert!((t - 56.0).abs() < 1e-12);
    }

    #[test]
    fn mixing_without_flow_is_plain_average() {
        let t = mixed_temperature([(0.0, 50.0), (0.0, 56.0)].into_iter());
        assert!((t - 53.0).abs() < 1e-12);
        assert_eq!(mixed_temperature(std::iter::empty()), 0.0);
    }
}
