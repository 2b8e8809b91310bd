//! Water properties used by the hydraulic and thermal models.
//!
//! Density and heat capacity are held constant over the domestic range;
//! kinematic viscosity varies by a factor of four between 0 and 100 °C and
//! is interpolated from a table.

/// Density (kg/m³).
pub const DENSITY_KG_M3: f64 = 1000.0;

/// Specific heat (J/(kg·K)).
pub const SPECIFIC_HEAT_J_KG_K: f64 = 4186.0;

/// Volumetric heat capacity in plumbing units (Wh/(L·K)).
pub const VOLUMETRIC_HEAT_WH_L_K: f64 = 1.16;

/// Same quantity per cubic metre (Wh/(m³·K)).
pub const VOLUMETRIC_HEAT_WH_M3_K: f64 = 1160.0;

#[derive(Debug, Clone, Copy)]
struct ViscosityPoint {
    temp_c: f64,
    nu_m2_s: f64,
}

const fn vp(temp_c: f64, nu_m2_s: f64) -> ViscosityPoint {
    ViscosityPoint { temp_c, nu_m2_s }
}

const KINEMATIC_VISCOSITY: [ViscosityPoint; 11] = [
    vp(0.0, 1.787e-6),
    vp(10.0, 1.307e-6),
    vp(20.0, 1.004e-6),
    vp(30.0, 0.801e-6),
    vp(40.0, 0.658e-6),
    vp(50.0, 0.553e-6),
    vp(60.0, 0.474e-6),
    vp(70.0, 0.413e-6),
    vp(80.0, 0.365e-6),
    vp(90.0, 0.326e-6),
    vp(100.0, 0.294e-6),
];

/// Kinematic viscosity (m²/s) at `temp_c`, clamped to the 0–100 °C table.
pub fn kinematic_viscosity(temp_c: f64) -> f64 {
    let table = &KINEMATIC_VISCOSITY;
    let first = table[0];
    let last = table[table.len() - 1];
    if temp_c.is_nan() || temp_c <= first.temp_c {
        return first.nu_m2_s;
    }
    if temp_c >= last.temp_c {
        return last.nu_m2_s;
    }
    for win in table.windows(2) {
        let a = win[0];
        let b = win[1];
        if temp_c >= a.temp_c && temp_c <= b.temp_c {
            let frac = (temp_c - a.temp_c) / (b.temp_c - a.temp_c);
            return a.nu_m2_s + frac * (b.nu_m2_s - a.nu_m2_s);
        }
    }
    last.nu_m2_s
}

/// Mass flow (kg/s) of a volume flow given in m³/s.
pub fn mass_flow_kg_s(flow_m3_s: f64) -> f64 {
    flow_m3_s * DENSITY_KG_M3
}
