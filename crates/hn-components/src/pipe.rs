//! Pipe run with friction using the Darcy-Weisbach correlation.

use crate::common::{EPSILON_DIAMETER, EPSILON_FLOW, LAMINAR_LIMIT, check_finite, circle_area};
use crate::error::ComponentResult;
use hn_core::units::constants::G0_MPS2;
use hn_core::units::{Length, VolumeRate};

/// Flow regime classified from the Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowRegime {
    #[default]
    NoFlow,
    Laminar,
    Turbulent,
}

impl FlowRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowRegime::NoFlow => "no_flow",
            FlowRegime::Laminar => "laminar",
            FlowRegime::Turbulent => "turbulent",
        }
    }
}

/// Every intermediate quantity of one head-loss evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HydraulicState {
    pub flow_m3_s: f64,
    pub cross_section_m2: f64,
    pub velocity_mps: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub relative_roughness: f64,
    pub friction_factor: f64,
    /// Friction loss along the run (m of water column).
    pub linear_loss_mce: f64,
    /// Fittings, bends and tees as a share of the linear loss (mCE).
    pub singular_loss_mce: f64,
}

impl HydraulicState {
    /// Linear plus singular losses (mCE), elevation excluded.
    pub fn friction_loss_mce(&self) -> f64 {
        self.linear_loss_mce + self.singular_loss_mce
    }
}

/// Straight pipe run between two junctions.
#[derive(Debug, Clone)]
pub struct PipeRun {
    /// Developed length
    pub length: Length,
    /// Bore
    pub internal_diameter: Length,
    /// Surface roughness (absolute)
    pub roughness: Length,
    /// Singular losses as a fraction of the linear loss
    pub singular_loss_ratio: f64,
}

impl PipeRun {
    pub fn new(
        length: Length,
        internal_diameter: Length,
        roughness: Length,
        singular_loss_ratio: f64,
    ) -> Self {
        Self {
            length,
            internal_diameter,
            roughness,
            singular_loss_ratio,
        }
    }

    /// Bore cross-section (m²); zero for a degenerate bore.
    pub fn cross_section_m2(&self) -> f64 {
        circle_area(self.internal_diameter.value)
    }

    /// Mean velocity (m/s) for a volume flow; zero for a degenerate bore.
    pub fn velocity_mps(&self, flow: VolumeRate) -> f64 {
        let area = self.cross_section_m2();
        if area <= 0.0 {
            return 0.0;
        }
        flow.value.abs() / area
    }

    /// Evaluate the head loss for a volume flow at kinematic viscosity `nu_m2_s`.
    pub fn hydraulics(&self, flow: VolumeRate, nu_m2_s: f64) -> ComponentResult<HydraulicState> {
        let d = self.internal_diameter.value;
        let q = flow.value.abs();
        let area = self.cross_section_m2();

        if q < EPSILON_FLOW || d < EPSILON_DIAMETER || area <= 0.0 {
            return Ok(HydraulicState {
                flow_m3_s: q,
                cross_section_m2: area,
                ..HydraulicState::default()
            });
        }

        let velocity = q / area;
        let reynolds = if nu_m2_s > 0.0 {
            velocity * d / nu_m2_s
        } else {
            0.0
        };
        check_finite(reynolds, "Reynolds number")?;

        let relative_roughness = self.roughness.value / d;
        let friction_factor = darcy_friction_factor(reynolds, relative_roughness);

        // h = f * L/D * v^2 / 2g
        let linear = friction_factor * (self.length.value / d) * velocity * velocity
            / (2.0 * G0_MPS2);
        check_finite(linear, "linear head loss")?;

        Ok(HydraulicState {
            flow_m3_s: q,
            cross_section_m2: area,
            velocity_mps: velocity,
            reynolds,
            regime: if reynolds <= 0.0 {
                FlowRegime::NoFlow
            } else if reynolds < LAMINAR_LIMIT {
                FlowRegime::Laminar
            } else {
                FlowRegime::Turbulent
            },
            relative_roughness,
            friction_factor,
            linear_loss_mce: linear,
            singular_loss_mce: linear * self.singular_loss_ratio,
        })
    }
}

/// Darcy friction factor.
///
/// Laminar `64/Re` below 2300, Swamee-Jain approximation of Colebrook-White above.
pub fn darcy_friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds <= 0.0 {
        0.0
    } else if reynolds < LAMINAR_LIMIT {
        64.0 / reynolds
    } else {
        let a = relative_roughness.max(0.0) / 3.7;
        let b = 5.74 / reynolds.powf(0.9);
        let f = 0.25 / (a + b).log10().powi(2);
        f.max(0.0001) // Clamp to avoid issues
    }
}
