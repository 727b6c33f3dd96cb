//! Ordered joint storage for a planar kinematic chain.
//!
//! A [`Chain`] is an ordered list of 2D joints. Joint 0 is the root and is
//! never moved by pose materialization; consecutive joints define rigid
//! segments. The chain is plain caller-owned data — it carries no solver
//! state and no parametrization, which live in `armature-ik`.

use nalgebra::Vector2;

use crate::error::ChainError;
use crate::vector::PlanarVector;

/// An ordered sequence of joints anchored at a fixed root.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<V = Vector2<f32>> {
    joints: Vec<V>,
}

impl<V: PlanarVector> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PlanarVector> Chain<V> {
    /// Create an empty chain.
    pub const fn new() -> Self {
        Self { joints: Vec::new() }
    }

    /// Create a chain from an ordered joint list. Element 0 becomes the root.
    pub fn from_joints(joints: Vec<V>) -> Self {
        Self { joints }
    }

    /// Number of joints.
    pub const fn len(&self) -> usize {
        self.joints.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Number of rigid segments (`len - 1`, or 0 for a degenerate chain).
    pub const fn segment_count(&self) -> usize {
        self.joints.len().saturating_sub(1)
    }

    /// The joints in order, root first.
    pub fn joints(&self) -> &[V] {
        &self.joints
    }

    /// The fixed root joint, if any.
    pub fn root(&self) -> Option<&V> {
        self.joints.first()
    }

    /// The free end of the chain (the joint driven toward the target).
    pub fn end_effector(&self) -> Option<&V> {
        self.joints.last()
    }

    /// Append a joint at the free end.
    pub fn push_joint(&mut self, position: V) {
        self.joints.push(position);
    }

    /// Reposition an existing joint.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::JointOutOfRange`] if `index` is out of bounds.
    pub fn move_joint(&mut self, index: usize, position: V) -> Result<(), ChainError> {
        let len = self.joints.len();
        let joint = self
            .joints
            .get_mut(index)
            .ok_or(ChainError::JointOutOfRange { index, len })?;
        *joint = position;
        Ok(())
    }

    /// Remove a joint, shifting later joints down.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::JointOutOfRange`] if `index` is out of bounds.
    pub fn remove_joint(&mut self, index: usize) -> Result<V, ChainError> {
        if index >= self.joints.len() {
            return Err(ChainError::JointOutOfRange {
                index,
                len: self.joints.len(),
            });
        }
        Ok(self.joints.remove(index))
    }

    /// Overwrite every non-root joint from a reconstructed pose.
    ///
    /// `pose` is a full joint list, root first, as produced by forward
    /// kinematics. The root entry is ignored: joint 0 is never written.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::PoseLengthMismatch`] if `pose` does not have
    /// exactly one entry per joint.
    pub fn apply_pose(&mut self, pose: &[V]) -> Result<(), ChainError> {
        if pose.len() != self.joints.len() {
            return Err(ChainError::PoseLengthMismatch {
                expected: self.joints.len(),
                got: pose.len(),
            });
        }
        for (joint, position) in self.joints.iter_mut().zip(pose.iter()).skip(1) {
            *joint = *position;
        }
        Ok(())
    }

    /// Segment lengths of the current pose, in order.
    pub fn segment_lengths(&self) -> Vec<f32> {
        self.joints
            .windows(2)
            .map(|pair| pair[1].distance(&pair[0]))
            .collect()
    }
}
