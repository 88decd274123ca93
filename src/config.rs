// src/config.rs

/// Tunable parameters for the contact solver and broad phase.
///
/// All knobs are bounded numeric values intended to be driven by a host
/// application at runtime; none of them change the shape of the simulation,
/// only its accuracy/performance trade-off.
#[derive(Debug, Clone, Copy)]
pub struct SolverParams {
    /// Number of projected Gauss-Seidel sweeps over the contact list.
    /// The solver is a fixed-iteration approximation; residual overlap left
    /// by an exhausted budget carries to the next step and is damped by the
    /// stabilization bias.
    pub iterations: usize,
    /// Coulomb friction coefficient. Friction impulses are clamped to the
    /// box `|lambda_t| <= friction * lambda_n` along a single tangent.
    pub friction: f64,
    /// Restitution coefficient in `[0, 1]`. Applied against the pre-solve
    /// approach speed at each contact.
    pub restitution: f64,
    /// Fraction of penetration depth fed back per step as a velocity bias.
    pub baumgarte: f64,
    /// Penetration allowed before the stabilization bias engages, in world
    /// units. Keeps resting contacts from jittering.
    pub penetration_slop: f64,
    /// When false the broad phase is bypassed and all body pairs are tested.
    pub use_spatial_hash: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            iterations: 50,
            friction: 0.8,
            restitution: 0.0,
            baumgarte: 0.2,
            penetration_slop: 0.05,
            use_spatial_hash: true,
        }
    }
}
