//! Testing utilities and harness for Tactus
//!
//! Reference collaborators for exercising pointer records without a real
//! input stack: a rectangle-based layer scene that resolves hits, a resolver
//! wrapper that counts calls, and a robot-style driver that runs frames in
//! the right phase order.

pub mod assertions;
pub mod counting;
pub mod robot;
pub mod scene;

pub use assertions::*;
pub use counting::CountingResolver;
pub use robot::PointerRobot;
pub use scene::LayerScene;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::counting::CountingResolver;
    pub use crate::robot::PointerRobot;
    pub use crate::scene::LayerScene;
}
