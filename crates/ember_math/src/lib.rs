// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod interval;
mod ray;
mod rng;

pub use interval::Interval;
pub use ray::Ray;
pub use rng::{seed, XorShift32};
