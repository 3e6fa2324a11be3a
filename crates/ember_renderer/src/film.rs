//! Sample accumulation and image export.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use ember_math::{Interval, Vec3};
use image::{ColorType, ImageFormat};

use crate::bucket::BucketResult;
use crate::{RenderError, RenderResult};

/// An 8-bit sRGB pixel, laid out for direct upload or encoding.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// sRGB transfer function for one linear channel.
#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Clamp to [0, 1] and scale to a byte, truncating.
#[inline]
pub fn f32_to_u8(c: f32) -> u8 {
    (Interval::UNIT.clamp(c) * 255.0) as u8
}

impl Pixel {
    /// Tone map a linear color.
    pub fn from_linear(color: Vec3) -> Self {
        Self {
            r: f32_to_u8(linear_to_srgb(color.x)),
            g: f32_to_u8(linear_to_srgb(color.y)),
            b: f32_to_u8(linear_to_srgb(color.z)),
        }
    }
}

/// Running per-pixel sums of radiance samples.
///
/// Storage is row-major with row 0 at the top of the image. Every pixel
/// holds the same number of samples, counted by [`Film::samples`].
#[derive(Debug, Clone)]
pub struct Film {
    width: u32,
    height: u32,
    sums: Vec<Vec3>,
    samples: u32,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sums: vec![Vec3::ZERO; (width as usize) * (height as usize)],
            samples: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples accumulated per pixel.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Add `value` to the running sum of pixel (`row`, `col`).
    pub fn accumulate(&mut self, row: u32, col: u32, value: Vec3) {
        let index = self.index(row, col);
        self.sums[index] += value;
    }

    /// Add every pixel of a rendered bucket.
    pub fn add_bucket(&mut self, result: &BucketResult) {
        let bucket = result.bucket;
        let width = bucket.width as usize;
        for (local_row, row_sums) in result.pixels.chunks_exact(width).enumerate() {
            let start = self.index(bucket.y + local_row as u32, bucket.x);
            for (sum, value) in self.sums[start..start + width].iter_mut().zip(row_sums) {
                *sum += *value;
            }
        }
    }

    /// Record that `count` more samples were added to every pixel.
    pub fn finish_pass(&mut self, count: u32) {
        self.samples += count;
    }

    /// Discard all accumulated samples.
    pub fn reset(&mut self) {
        self.sums.fill(Vec3::ZERO);
        self.samples = 0;
    }

    /// Mean of pixel (`row`, `col`), zero before the first sample.
    pub fn pixel(&self, row: u32, col: u32) -> Vec3 {
        self.mean(self.sums[self.index(row, col)])
    }

    /// Per-pixel means in storage order.
    pub fn resolve(&self) -> Vec<Vec3> {
        self.sums.iter().map(|&sum| self.mean(sum)).collect()
    }

    #[inline]
    fn mean(&self, sum: Vec3) -> Vec3 {
        if self.samples == 0 {
            Vec3::ZERO
        } else {
            sum / self.samples as f32
        }
    }

    /// Tone-mapped 8-bit image.
    pub fn to_rgb8(&self) -> RenderResult<Vec<Pixel>> {
        if self.samples == 0 {
            return Err(RenderError::EmptyFilm);
        }
        Ok(self.sums.iter().map(|&sum| Pixel::from_linear(self.mean(sum))).collect())
    }

    /// Write the tone-mapped image as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let pixels = self.to_rgb8()?;
        image::save_buffer_with_format(
            path.as_ref(),
            bytemuck::cast_slice(&pixels),
            self.width,
            self.height,
            ColorType::Rgb8,
            ImageFormat::Png,
        )?;
        log::debug!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::Bucket;

    #[test]
    fn test_linear_to_srgb_segments() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(0.001) - 0.01292).abs() < 1e-6);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-5);
        // Continuous at the knee
        let below = linear_to_srgb(0.0031308);
        let above = linear_to_srgb(0.0031309);
        assert!((below - above).abs() < 1e-4);
        assert!((linear_to_srgb(0.5) - 0.7354).abs() < 1e-3);
    }

    #[test]
    fn test_f32_to_u8_clamps_and_truncates() {
        assert_eq!(f32_to_u8(-1.0), 0);
        assert_eq!(f32_to_u8(0.0), 0);
        assert_eq!(f32_to_u8(0.999), 254);
        assert_eq!(f32_to_u8(1.0), 255);
        assert_eq!(f32_to_u8(12.0), 255);
    }

    #[test]
    fn test_pixel_is_three_bytes() {
        assert_eq!(std::mem::size_of::<Pixel>(), 3);
        let pixels = [Pixel { r: 1, g: 2, b: 3 }, Pixel { r: 4, g: 5, b: 6 }];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_accumulate_and_average() {
        let mut film = Film::new(4, 2);
        assert_eq!(film.pixel(1, 3), Vec3::ZERO);

        film.accumulate(1, 3, Vec3::new(1.0, 2.0, 3.0));
        film.finish_pass(1);
        film.accumulate(1, 3, Vec3::new(3.0, 2.0, 1.0));
        film.finish_pass(1);

        assert_eq!(film.samples(), 2);
        assert_eq!(film.pixel(1, 3), Vec3::splat(2.0));
        assert_eq!(film.resolve()[7], Vec3::splat(2.0));
        assert_eq!(film.resolve()[0], Vec3::ZERO);
    }

    #[test]
    fn test_add_bucket_places_pixels() {
        let mut film = Film::new(4, 4);
        let bucket = Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![Vec3::splat(1.0), Vec3::splat(2.0), Vec3::splat(3.0), Vec3::splat(4.0)];
        film.add_bucket(&BucketResult::new(bucket, pixels));
        film.finish_pass(1);

        assert_eq!(film.pixel(1, 2), Vec3::splat(1.0));
        assert_eq!(film.pixel(1, 3), Vec3::splat(2.0));
        assert_eq!(film.pixel(2, 2), Vec3::splat(3.0));
        assert_eq!(film.pixel(2, 3), Vec3::splat(4.0));
        assert_eq!(film.pixel(0, 0), Vec3::ZERO);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut film = Film::new(2, 2);
        film.accumulate(0, 0, Vec3::ONE);
        film.finish_pass(1);
        film.reset();

        assert_eq!(film.samples(), 0);
        assert!(film.resolve().iter().all(|&p| p == Vec3::ZERO));
        assert!(matches!(film.to_rgb8(), Err(RenderError::EmptyFilm)));
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut film = Film::new(3, 2);
        // Over-bright values saturate
        film.accumulate(0, 0, Vec3::new(2.0, 0.0, 0.0));
        film.accumulate(1, 2, Vec3::new(0.0, 0.0, 2.0));
        film.finish_pass(1);

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("film.png");
        film.save_png(&path).expect("png written");

        let decoded = image::open(&path).expect("png readable").to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(2, 1).0, [0, 0, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_save_empty_film_fails() {
        let film = Film::new(2, 2);
        let dir = tempfile::tempdir().expect("temp dir");
        let result = film.save_png(dir.path().join("empty.png"));
        assert!(matches!(result, Err(RenderError::EmptyFilm)));
        assert!(!dir.path().join("empty.png").exists());
    }
}
