//! TOML scene configuration for headless drivers.

use serde::{Deserialize, Serialize};

use armature_core::chain::Chain;
use armature_core::error::ConfigError;
use armature_ik::solver::DescentConfig;
use nalgebra::Vector2;

/// A scene: a chain pose, an optional target, and solver settings.
///
/// ```toml
/// joints = [[0.0, 0.0], [50.0, 0.0], [100.0, 0.0]]
/// target = [60.0, 40.0]
///
/// [solver]
/// max_iterations = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Ordered joint positions, root first.
    #[serde(default)]
    pub joints: Vec<[f32; 2]>,

    /// Initial target. Defaults to the end-effector when absent.
    #[serde(default)]
    pub target: Option<[f32; 2]>,

    /// Solver settings.
    #[serde(default)]
    pub solver: DescentConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            joints: Vec::new(),
            target: None,
            solver: DescentConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, joint) in self.joints.iter().enumerate() {
            if !joint[0].is_finite() || !joint[1].is_finite() {
                return Err(ConfigError::NonFiniteCoordinate {
                    field: format!("joints[{i}]"),
                });
            }
        }
        if let Some(target) = self.target {
            if !target[0].is_finite() || !target[1].is_finite() {
                return Err(ConfigError::NonFiniteCoordinate {
                    field: "target".into(),
                });
            }
        }
        self.solver.validate()
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the configured chain.
    pub fn chain(&self) -> Chain<Vector2<f32>> {
        Chain::from_joints(
            self.joints
                .iter()
                .map(|&[x, y]| Vector2::new(x, y))
                .collect(),
        )
    }

    /// The configured target, or the end-effector of the configured chain.
    pub fn target(&self) -> Option<Vector2<f32>> {
        self.target
            .map(|[x, y]| Vector2::new(x, y))
            .or_else(|| self.joints.last().map(|&[x, y]| Vector2::new(x, y)))
    }
}
