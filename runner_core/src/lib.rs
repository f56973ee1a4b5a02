//! `runner_core`
//!
//! Simulation engine for the timed platformer, shared by the client and
//! the score server.
//!
//! Design goals:
//! - Deterministic fixed-tick simulation; callers own the clock.
//! - Clear separation of concerns (math, geom, motion, physics, session).
//! - Traits for abstraction and dependency injection.
//! - No `unsafe`.

pub mod config;
pub mod event;
pub mod geom;
pub mod level;
pub mod math;
pub mod motion;
pub mod physics;
pub mod player;
pub mod render;
pub mod score;
pub mod session;
pub mod wire;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::event::*;
    pub use crate::geom::*;
    pub use crate::level::*;
    pub use crate::math::*;
    pub use crate::score::*;
    pub use crate::session::*;
    pub use crate::wire::*;
}
