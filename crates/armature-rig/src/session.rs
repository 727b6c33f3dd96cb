//! The rig session: chain + target ownership and solve orchestration.

use thiserror::Error;

use armature_core::chain::Chain;
use armature_core::error::ChainError;
use armature_core::vector::PlanarVector;
use armature_ik::params::SegmentParams;
use armature_ik::solver::{DescentConfig, DescentSolver, SolveResult};
use nalgebra::Vector2;

use crate::mode::RigMode;

/// Session misuse errors.
///
/// The solver itself never fails; these cover calls that are invalid in the
/// current mode, plus chain edit errors passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RigError {
    #[error("Operation requires editing mode")]
    NotEditing,

    #[error("Operation requires simulating mode")]
    NotSimulating,

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// A chain-editing and posing session.
///
/// Owns the chain, the target and the solver. In editing mode the chain is
/// authored through the edit operations; in simulating mode every target
/// move triggers the full solve chain: extract the live pose (warm start),
/// descend, reconstruct, and overwrite every non-root joint.
#[derive(Debug)]
pub struct RigSession<V: PlanarVector = Vector2<f32>> {
    chain: Chain<V>,
    target: Option<V>,
    mode: RigMode,
    solver: DescentSolver,
    last_result: Option<SolveResult>,
}

impl<V: PlanarVector> Default for RigSession<V> {
    fn default() -> Self {
        Self::new(DescentConfig::default())
    }
}

impl<V: PlanarVector> RigSession<V> {
    /// Create an empty session in editing mode.
    pub const fn new(config: DescentConfig) -> Self {
        Self {
            chain: Chain::new(),
            target: None,
            mode: RigMode::Editing,
            solver: DescentSolver::new(config),
            last_result: None,
        }
    }

    /// Create a session around an existing chain, in editing mode.
    pub const fn with_chain(chain: Chain<V>, config: DescentConfig) -> Self {
        Self {
            chain,
            target: None,
            mode: RigMode::Editing,
            solver: DescentSolver::new(config),
            last_result: None,
        }
    }

    pub const fn mode(&self) -> RigMode {
        self.mode
    }

    pub const fn chain(&self) -> &Chain<V> {
        &self.chain
    }

    pub const fn target(&self) -> Option<&V> {
        self.target.as_ref()
    }

    /// Report of the most recent solve, if any. Callers that care about
    /// non-convergence inspect `distance` here; the session itself treats
    /// budget exhaustion as an accepted approximate pose.
    pub const fn last_result(&self) -> Option<&SolveResult> {
        self.last_result.as_ref()
    }

    // -----------------------------------------------------------------------
    // Editing mode
    // -----------------------------------------------------------------------

    /// Append a joint at the free end of the chain.
    ///
    /// # Errors
    ///
    /// [`RigError::NotEditing`] outside editing mode.
    pub fn add_joint(&mut self, position: V) -> Result<(), RigError> {
        self.require_editing()?;
        self.chain.push_joint(position);
        Ok(())
    }

    /// Reposition an existing joint (the root may be moved while editing).
    ///
    /// # Errors
    ///
    /// [`RigError::NotEditing`] outside editing mode;
    /// [`RigError::Chain`] on an out-of-range index.
    pub fn move_joint(&mut self, index: usize, position: V) -> Result<(), RigError> {
        self.require_editing()?;
        self.chain.move_joint(index, position)?;
        Ok(())
    }

    /// Remove a joint from the chain.
    ///
    /// # Errors
    ///
    /// [`RigError::NotEditing`] outside editing mode;
    /// [`RigError::Chain`] on an out-of-range index.
    pub fn remove_joint(&mut self, index: usize) -> Result<V, RigError> {
        self.require_editing()?;
        Ok(self.chain.remove_joint(index)?)
    }

    // -----------------------------------------------------------------------
    // Mode transitions
    // -----------------------------------------------------------------------

    /// Switch to editing mode. The target is kept for the next simulation
    /// entry but no longer drives the chain.
    pub fn enter_editing(&mut self) {
        self.mode = RigMode::Editing;
    }

    /// Switch to simulating mode.
    ///
    /// The target is seeded at the current end-effector, or at `fallback`
    /// for an empty chain, and an initial solve runs immediately — so the
    /// pose on entry is already consistent with the target.
    pub fn enter_simulating(&mut self, fallback: V) {
        self.mode = RigMode::Simulating;
        let target = self.chain.end_effector().copied().unwrap_or(fallback);
        self.target = Some(target);
        self.solve_and_apply(target);
    }

    // -----------------------------------------------------------------------
    // Simulating mode
    // -----------------------------------------------------------------------

    /// Move the target and re-pose the chain toward it.
    ///
    /// This is the sole solve trigger: extract the live pose, run the
    /// descent, reconstruct joint positions and overwrite every non-root
    /// joint. A chain with fewer than two joints is left untouched.
    ///
    /// # Errors
    ///
    /// [`RigError::NotSimulating`] outside simulating mode.
    pub fn set_target(&mut self, position: V) -> Result<(), RigError> {
        if !self.mode.is_simulating() {
            return Err(RigError::NotSimulating);
        }
        self.target = Some(position);
        self.solve_and_apply(position);
        Ok(())
    }

    fn require_editing(&self) -> Result<(), RigError> {
        if self.mode == RigMode::Editing {
            Ok(())
        } else {
            Err(RigError::NotEditing)
        }
    }

    fn solve_and_apply(&mut self, target: V) {
        // Degenerate chain: no segments, nothing to solve or write back.
        if self.chain.len() < 2 {
            self.last_result = None;
            return;
        }

        // Extraction always runs against the live chain, so edits made
        // since the previous solve become this solve's warm start.
        let params = SegmentParams::from_chain(&self.chain);
        let Some(&root) = self.chain.root() else {
            return;
        };

        let result = self.solver.solve(&params, root, target);
        let pose = armature_ik::params::reconstruct(root, &result.angles, &params.lengths);

        // Lengths of pose and chain match by construction.
        if let Err(err) = self.chain.apply_pose(&pose) {
            log::error!("pose materialization rejected: {err}");
            return;
        }

        log::debug!(
            "solve: {} segments, {} iterations, distance {:.4}, converged {}",
            params.dof(),
            result.iterations,
            result.distance,
            result.converged,
        );
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn edit_chain(session: &mut RigSession, joints: &[(f32, f32)]) {
        for &(x, y) in joints {
            session.add_joint(Vector2::new(x, y)).unwrap();
        }
    }

    #[test]
    fn edit_operations_require_editing_mode() {
        let mut session = RigSession::default();
        edit_chain(&mut session, &[(0.0, 0.0), (50.0, 0.0)]);

        session.enter_simulating(Vector2::new(0.0, 0.0));
        assert_eq!(
            session.add_joint(Vector2::new(1.0, 1.0)),
            Err(RigError::NotEditing)
        );
        assert!(session.move_joint(1, Vector2::new(1.0, 1.0)).is_err());
        assert!(session.remove_joint(1).is_err());
    }

    #[test]
    fn set_target_requires_simulating_mode() {
        let mut session = RigSession::default();
        edit_chain(&mut session, &[(0.0, 0.0), (50.0, 0.0)]);
        assert_eq!(
            session.set_target(Vector2::new(0.0, 50.0)),
            Err(RigError::NotSimulating)
        );
    }

    #[test]
    fn entering_simulation_seeds_target_at_end_effector() {
        let mut session = RigSession::default();
        edit_chain(&mut session, &[(0.0, 0.0), (30.0, 0.0), (60.0, 0.0)]);

        session.enter_simulating(Vector2::new(400.0, 300.0));
        assert_eq!(session.target(), Some(&Vector2::new(60.0, 0.0)));

        // Seeding at the end-effector means the initial solve is already
        // satisfied and must not disturb the pose.
        let result = session.last_result().expect("initial solve ran");
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(session.chain().joints()[1], Vector2::new(30.0, 0.0));
    }

    #[test]
    fn entering_simulation_with_empty_chain_uses_fallback() {
        let mut session: RigSession = RigSession::default();
        session.enter_simulating(Vector2::new(400.0, 300.0));
        assert_eq!(session.target(), Some(&Vector2::new(400.0, 300.0)));
        assert!(session.last_result().is_none());
    }

    #[test]
    fn degenerate_chains_are_untouched_by_target_moves() {
        // Scenario C: 0 or 1 joints.
        let mut session: RigSession = RigSession::default();
        session.enter_simulating(Vector2::new(0.0, 0.0));
        session.set_target(Vector2::new(10.0, 10.0)).unwrap();
        assert!(session.chain().is_empty());
        assert!(session.last_result().is_none());

        let mut session = RigSession::default();
        edit_chain(&mut session, &[(5.0, 5.0)]);
        session.enter_simulating(Vector2::new(0.0, 0.0));
        session.set_target(Vector2::new(10.0, 10.0)).unwrap();
        assert_eq!(session.chain().joints(), &[Vector2::new(5.0, 5.0)]);
    }

    #[test]
    fn target_move_poses_the_chain() {
        // Scenario A through the full orchestration.
        let mut session = RigSession::new(DescentConfig {
            max_iterations: 5000,
            ..DescentConfig::default()
        });
        edit_chain(&mut session, &[(0.0, 0.0), (50.0, 0.0)]);

        session.enter_simulating(Vector2::new(0.0, 0.0));
        session.set_target(Vector2::new(0.0, 50.0)).unwrap();

        let ee = *session.chain().end_effector().unwrap();
        assert!(ee.distance(&Vector2::new(0.0, 50.0)) <= 1.0);

        let result = session.last_result().unwrap();
        assert!(result.converged);
    }

    #[test]
    fn root_and_lengths_survive_solving() {
        let mut session = RigSession::new(DescentConfig {
            max_iterations: 5000,
            ..DescentConfig::default()
        });
        edit_chain(&mut session, &[(10.0, 20.0), (60.0, 20.0), (110.0, 20.0)]);
        let lengths_before = session.chain().segment_lengths();

        session.enter_simulating(Vector2::new(0.0, 0.0));
        session.set_target(Vector2::new(70.0, 60.0)).unwrap();

        assert_eq!(*session.chain().root().unwrap(), Vector2::new(10.0, 20.0));
        let lengths_after = session.chain().segment_lengths();
        for (before, after) in lengths_before.iter().zip(lengths_after.iter()) {
            assert_relative_eq!(*before, *after, epsilon = 1e-2);
        }
    }

    #[test]
    fn edits_between_solves_become_the_next_warm_start() {
        let mut session = RigSession::new(DescentConfig {
            max_iterations: 5000,
            ..DescentConfig::default()
        });
        edit_chain(&mut session, &[(0.0, 0.0), (50.0, 0.0)]);
        session.enter_simulating(Vector2::new(0.0, 0.0));
        session.set_target(Vector2::new(0.0, 50.0)).unwrap();

        // Re-author the chain, then resume simulating: the next solve must
        // start from the edited pose, not a stale parametrization.
        session.enter_editing();
        session.move_joint(1, Vector2::new(-50.0, 0.0)).unwrap();
        session.enter_simulating(Vector2::new(0.0, 0.0));

        // Target seeded at the edited end-effector: nothing to do.
        let result = session.last_result().unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(session.chain().joints()[1], Vector2::new(-50.0, 0.0));
    }

    #[test]
    fn repeated_target_moves_remain_stable_once_converged() {
        let mut session = RigSession::new(DescentConfig {
            max_iterations: 5000,
            ..DescentConfig::default()
        });
        edit_chain(&mut session, &[(0.0, 0.0), (50.0, 0.0)]);
        session.enter_simulating(Vector2::new(0.0, 0.0));

        let target = Vector2::new(0.0, 50.0);
        session.set_target(target).unwrap();
        let first = session.last_result().unwrap().distance;

        for _ in 0..3 {
            session.set_target(target).unwrap();
            let again = session.last_result().unwrap();
            assert!(again.distance <= first + 1e-3);
            assert!(again.converged);
        }
    }
}
