//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each pixel sample draws from its own
//! random stream, keyed by the render seed, the sample index and the pixel
//! index, so the image does not depend on thread scheduling.

use ember_math::{seed, Vec3, XorShift32};
use rayon::prelude::*;

use crate::sampler::PixelSampler;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the bucket's top-left corner
    pub x: u32,
    /// Row of the bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile a `width` x `height` image, ordered from the center outward.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();

    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image center.
///
/// The sort is stable, so equidistant buckets keep their row-major order.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |b: &Bucket| {
        let cx = b.x as f32 + b.width as f32 / 2.0;
        let cy = b.y as f32 + b.height as f32 / 2.0;
        (cx - center_x).powi(2) + (cy - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Random stream for one sample of one pixel.
#[inline]
pub fn pixel_stream(render_seed: u32, sample_index: u32, pixel_index: u32) -> XorShift32 {
    XorShift32::from_seed_u32(render_seed ^ seed(seed(sample_index) ^ pixel_index))
}

/// Summed samples of one bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Per-pixel sums in row-major order within the bucket
    pub pixels: Vec<Vec3>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Vec3>) -> Self {
        Self { bucket, pixels }
    }
}

/// Render samples `first_sample..first_sample + count` of every pixel in
/// `bucket`, returning their per-pixel sums.
pub fn render_bucket(
    bucket: &Bucket,
    sampler: &PixelSampler<'_>,
    render_seed: u32,
    first_sample: u32,
    count: u32,
) -> BucketResult {
    let image_width = sampler.width();
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for row in bucket.y..bucket.y + bucket.height {
        for col in bucket.x..bucket.x + bucket.width {
            let pixel_index = row * image_width + col;
            let mut sum = Vec3::ZERO;
            for sample_index in first_sample..first_sample + count {
                let mut rng = pixel_stream(render_seed, sample_index, pixel_index);
                sum += sampler.sample(row, col, &mut rng);
            }
            pixels.push(sum);
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Render every bucket in parallel. Results come back in bucket order.
pub fn render_pass(
    buckets: &[Bucket],
    sampler: &PixelSampler<'_>,
    render_seed: u32,
    first_sample: u32,
    count: u32,
) -> Vec<BucketResult> {
    buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, sampler, render_seed, first_sample, count))
        .collect()
}
