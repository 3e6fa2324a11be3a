//! Ember Core - scene description for the Ember path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Triangle`, `Material`
//! - **Built-in scenes**: `cornell_box()`
//!
//! Scenes are validated once at construction and are immutable afterwards,
//! so the renderer never has to re-check indices while tracing.
//!
//! # Example
//!
//! ```
//! use ember_core::cornell_box;
//!
//! let scene = cornell_box();
//! assert_eq!(scene.triangles().len(), 32);
//! assert_eq!(scene.materials().len(), 4);
//! ```

pub mod camera;
pub mod cornell;
pub mod error;
pub mod material;
pub mod scene;
pub mod triangle;

// Re-export commonly used types
pub use camera::Camera;
pub use cornell::cornell_box;
pub use error::{SceneError, SceneResult};
pub use material::Material;
pub use scene::Scene;
pub use triangle::Triangle;
