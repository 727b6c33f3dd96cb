//! Inverse kinematics solver for planar joint chains.
//!
//! Provides the angle/length parametrization of a chain, forward kinematics,
//! and a finite-difference coordinate gradient descent IK solver driving the
//! end-effector of the chain toward a 2D target point.
//!
//! # Architecture
//!
//! ```text
//! Chain ──► SegmentParams ──► DescentSolver ──► refined angles ──► pose
//! ```
//!
//! [`SegmentParams`] is extracted from the live [`Chain`](armature_core::Chain)
//! on every solve, so the optimizer is always warm-started from the chain's
//! current pose. The solver searches angle space only; segment lengths are
//! rigid-body data and never change. The refined angles are turned back into
//! joint positions with [`params::reconstruct`].

pub mod params;
pub mod solver;

pub use params::SegmentParams;
pub use solver::{solve_chain, DescentConfig, DescentSolver, SolveResult};
