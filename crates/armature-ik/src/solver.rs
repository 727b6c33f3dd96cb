//! Finite-difference coordinate gradient descent IK solver.
//!
//! Iteratively refines the segment angles so the end-effector approaches a
//! target point. No closed-form gradient exists here: each angle's gradient
//! is estimated by forward finite differences on the scalar objective (the
//! end-effector's distance to the target).
//!
//! The descent is sequential (Gauss-Seidel): within one pass, each angle's
//! update is applied immediately and is visible to the gradient estimate of
//! the next angle. Convergence is checked once per pass, at its top, never
//! mid-pass.

use serde::{Deserialize, Serialize};

use armature_core::error::ConfigError;
use armature_core::vector::PlanarVector;

use crate::params::{end_effector, SegmentParams};

const fn default_max_iterations() -> u32 {
    1000
}
fn default_sampling_step() -> f32 {
    0.125_f32.to_radians()
}
const fn default_learning_rate() -> f32 {
    2.5e-5
}
const fn default_tolerance() -> f32 {
    1.0
}

/// Configuration for the descent solver.
///
/// The defaults are tuned for interactive dragging of pixel-scale chains:
/// a generous iteration budget, a small per-angle step, and a one-unit
/// stopping distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescentConfig {
    /// Maximum descent passes per solve (default: 1000).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Finite-difference sampling step per angle, radians
    /// (default: 0.125 degrees).
    #[serde(default = "default_sampling_step")]
    pub sampling_step: f32,

    /// Descent learning rate applied to the raw gradient (default: 2.5e-5).
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// Stopping distance between end-effector and target (default: 1.0).
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            sampling_step: default_sampling_step(),
            learning_rate: default_learning_rate(),
            tolerance: default_tolerance(),
        }
    }
}

impl DescentConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sampling_step > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "sampling_step".into(),
                message: format!("{} (must be > 0)", self.sampling_step),
            });
        }
        if !(self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "learning_rate".into(),
                message: format!("{} (must be > 0)", self.learning_rate),
            });
        }
        if !(self.tolerance > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "tolerance".into(),
                message: format!("{} (must be > 0)", self.tolerance),
            });
        }
        Ok(())
    }
}

/// Result of one solve call.
///
/// A solve never fails: on budget exhaustion the angles found so far are
/// returned with `converged == false`, which is an accepted approximate
/// result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Refined segment angles, radians.
    pub angles: Vec<f32>,
    /// Whether the end-effector came within tolerance of the target.
    pub converged: bool,
    /// Number of descent passes executed.
    pub iterations: u32,
    /// Final end-effector distance to the target.
    pub distance: f32,
}

/// Coordinate gradient descent IK solver.
#[derive(Debug, Clone)]
pub struct DescentSolver {
    config: DescentConfig,
}

impl DescentSolver {
    /// Create a new solver with the given configuration.
    pub const fn new(config: DescentConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DescentConfig::default())
    }

    pub const fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// Refine the angles of `params` so the end-effector anchored at `root`
    /// approaches `target`.
    ///
    /// The working angle buffer is seeded from `params.angles` (warm start)
    /// and owned by this call; `params` itself is not mutated. Lengths are
    /// rigid and read-only. A chain with zero segments returns immediately
    /// with the root as end-effector.
    pub fn solve<V: PlanarVector>(&self, params: &SegmentParams, root: V, target: V) -> SolveResult {
        let lengths = &params.lengths;
        let mut angles = params.angles.clone();
        let eps = self.config.sampling_step;

        if angles.is_empty() {
            let distance = root.distance(&target);
            return SolveResult {
                angles,
                converged: distance <= self.config.tolerance,
                iterations: 0,
                distance,
            };
        }

        for iteration in 0..self.config.max_iterations {
            let d0 = objective(&angles, lengths, root, target);
            if d0 <= self.config.tolerance {
                return SolveResult {
                    angles,
                    converged: true,
                    iterations: iteration,
                    distance: d0,
                };
            }

            for i in 0..angles.len() {
                // Baseline is recomputed fresh so updates already applied to
                // earlier indices this pass are reflected.
                let saved = angles[i];
                let baseline = objective(&angles, lengths, root, target);

                angles[i] = saved + eps;
                let perturbed = objective(&angles, lengths, root, target);

                let gradient = (perturbed - baseline) / eps;
                angles[i] = saved - self.config.learning_rate * gradient;
            }
        }

        let distance = objective(&angles, lengths, root, target);
        log::trace!(
            "descent budget exhausted after {} passes, distance {distance}",
            self.config.max_iterations
        );
        SolveResult {
            angles,
            converged: false,
            iterations: self.config.max_iterations,
            distance,
        }
    }
}

/// Scalar objective: end-effector distance to the target.
fn objective<V: PlanarVector>(angles: &[f32], lengths: &[f32], root: V, target: V) -> f32 {
    end_effector(root, angles, lengths).distance(&target)
}

/// Convenience: pose a chain toward a target in one call (for scripted use).
///
/// Extracts the chain's current pose, solves, and writes the reconstructed
/// joints back. The root joint is never moved. Returns `None` for a chain
/// with fewer than two joints, which is left untouched.
pub fn solve_chain<V: PlanarVector>(
    chain: &mut armature_core::chain::Chain<V>,
    target: V,
    config: &DescentConfig,
) -> Option<SolveResult> {
    let Some(&root) = chain.root() else {
        return None;
    };
    if chain.segment_count() == 0 {
        return None;
    }

    let params = SegmentParams::from_chain(chain);
    let result = DescentSolver::new(config.clone()).solve(&params, root, target);

    let pose = crate::params::reconstruct(root, &result.angles, &params.lengths);
    chain.apply_pose(&pose).ok()?;
    Some(result)
}
