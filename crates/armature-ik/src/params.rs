//! Angle/length parametrization and forward kinematics.
//!
//! [`SegmentParams`] holds the per-segment direction angles and rigid
//! lengths extracted from a [`Chain`]. The free functions [`end_effector`]
//! and [`reconstruct`] evaluate forward kinematics for an arbitrary angle
//! slice, which is what the solver's objective function perturbs.

use armature_core::chain::Chain;
use armature_core::vector::PlanarVector;

/// Per-segment parametrization of a chain pose.
///
/// For segment `i` (joints `i` and `i + 1`): `angles[i]` is the direction
/// from joint `i` to joint `i + 1` in radians, `lengths[i]` the Euclidean
/// distance between them. A chain with fewer than two joints parametrizes
/// to empty arrays.
///
/// Zero-length segments get angle 0 (the `atan2(0, 0)` convention); they
/// contribute nothing to forward kinematics either way.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentParams {
    /// Direction angle per segment, radians. Unconstrained: angles may
    /// exceed ±π and drift over repeated warm-started solves.
    pub angles: Vec<f32>,
    /// Rigid length per segment. Read-only for the duration of a solve.
    pub lengths: Vec<f32>,
}

impl SegmentParams {
    /// Extract the parametrization of the chain's current pose.
    pub fn from_chain<V: PlanarVector>(chain: &Chain<V>) -> Self {
        let mut angles = Vec::with_capacity(chain.segment_count());
        let mut lengths = Vec::with_capacity(chain.segment_count());

        for pair in chain.joints().windows(2) {
            let delta = pair[1].sub(&pair[0]);
            angles.push(delta.heading());
            lengths.push(delta.norm());
        }

        Self { angles, lengths }
    }

    /// Number of segments.
    pub const fn dof(&self) -> usize {
        self.angles.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// End-effector position of this parametrization anchored at `root`.
    pub fn end_effector<V: PlanarVector>(&self, root: V) -> V {
        end_effector(root, &self.angles, &self.lengths)
    }

    /// Full joint reconstruction of this parametrization anchored at `root`.
    pub fn reconstruct<V: PlanarVector>(&self, root: V) -> Vec<V> {
        reconstruct(root, &self.angles, &self.lengths)
    }
}

/// Accumulate forward kinematics and return only the end-effector.
///
/// Same accumulated value as the last element of [`reconstruct`], without
/// building the intermediate joint list. This is the hot path inside the
/// solver's objective function.
pub fn end_effector<V: PlanarVector>(root: V, angles: &[f32], lengths: &[f32]) -> V {
    assert_eq!(angles.len(), lengths.len());

    let mut current = root;
    for (&angle, &length) in angles.iter().zip(lengths.iter()) {
        current = current.add(&V::from_polar(angle, length));
    }
    current
}

/// Reconstruct all joint positions, root first.
///
/// `joint[0] = root`, `joint[i + 1] = joint[i] + length[i] · (cos angle[i],
/// sin angle[i])`. Returns `angles.len() + 1` joints.
pub fn reconstruct<V: PlanarVector>(root: V, angles: &[f32], lengths: &[f32]) -> Vec<V> {
    assert_eq!(angles.len(), lengths.len());

    let mut joints = Vec::with_capacity(angles.len() + 1);
    let mut current = root;
    joints.push(current);
    for (&angle, &length) in angles.iter().zip(lengths.iter()) {
        current = current.add(&V::from_polar(angle, length));
        joints.push(current);
    }
    joints
}
