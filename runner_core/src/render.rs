//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend. The
//! session exposes a read-only scene projection each tick; a renderer draws
//! it and never mutates or reads back into simulation state.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// What a scene entity should be drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Static,
    Moving,
    Bounce,
    Start,
    Goal,
}

/// Read-only drawable snapshot of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub half: Vec2,
}

/// A minimal rendering API.
pub trait RenderSink: Send + Sync {
    fn draw(&mut self, scene: &[SceneEntity]);
}

/// A no-op renderer useful for headless runs and tests.
#[derive(Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn draw(&mut self, _scene: &[SceneEntity]) {}
}
