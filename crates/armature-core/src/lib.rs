// armature-core: Vector abstraction, chain storage and errors for the armature 2D rigging toolkit.

pub mod chain;
pub mod error;
pub mod vector;

pub use chain::Chain;
pub use error::{ArmatureError, ChainError, ConfigError};
pub use vector::PlanarVector;

/// Commonly used items.
pub mod prelude {
    pub use crate::chain::Chain;
    pub use crate::error::{ArmatureError, ChainError, ConfigError};
    pub use crate::vector::PlanarVector;
}
