//! Ember CPU path tracer.
//!
//! Renders a triangle scene by unidirectional Monte Carlo path tracing with
//! diffuse surfaces and Russian roulette, accumulating samples progressively
//! into a film that can be exported as PNG. Diagnostic modes visualize
//! albedo, normals, barycentrics and primitive or material ids.
//!
//! ```no_run
//! use ember_core::cornell_box;
//! use ember_renderer::{ProgressiveRenderer, RenderSettings};
//!
//! let mut renderer = ProgressiveRenderer::new(cornell_box(), RenderSettings::default())?;
//! renderer.run();
//! renderer.save_png("cornell.png")?;
//! # Ok::<(), ember_renderer::RenderError>(())
//! ```

mod bucket;
mod error;
mod film;
mod integrator;
mod progressive;
mod sampler;
mod settings;
mod trace;

pub use bucket::{
    generate_buckets, pixel_stream, render_bucket, render_pass, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};
pub use error::{RenderError, RenderResult};
pub use film::{f32_to_u8, linear_to_srgb, Film, Pixel};
pub use integrator::{facing_normal, radiance, radiance_with, PathConfig};
pub use progressive::ProgressiveRenderer;
pub use sampler::{random_color, sample_pixel, PixelSampler, SampleType};
pub use settings::RenderSettings;
pub use trace::{intersect, RayPayload, PARALLEL_EPSILON, T_MIN};
