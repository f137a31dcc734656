//! Rule interpretation: validation, effect resolution, orchestration.
//!
//! The flow is one-directional: the validator reads the state and
//! produces [`Derived`] data or a typed rejection; the resolver consumes
//! that data and mutates the state while emitting events; [`apply`] wires
//! the two together, records history, and sweeps invariants.

pub mod engine;
pub mod resolver;
pub mod validator;

pub use engine::{apply, check_invariants};
pub use resolver::EffectResolver;
pub use validator::{ActionValidator, Derived};
