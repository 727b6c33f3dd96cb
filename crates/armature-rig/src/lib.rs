//! Session layer tying chain editing and IK solving together.
//!
//! A [`RigSession`] owns the chain, the target and the mode state machine.
//! External collaborators (renderers, input handlers) drive it through a
//! small call surface: edit the chain while in [`RigMode::Editing`], move
//! the target while in [`RigMode::Simulating`]. Every target move runs the
//! full orchestration: extract the live pose, solve, reconstruct, write the
//! pose back into the chain.

pub mod config;
pub mod mode;
pub mod session;

pub use config::SceneConfig;
pub use mode::RigMode;
pub use session::{RigError, RigSession};
