//! Progressive rendering.
//!
//! Renders an image in steps of a few samples per pixel, accumulating into
//! a [`Film`] so that a usable image exists after every step. Changing what
//! is rendered discards the accumulated samples.

use std::path::Path;
use std::time::Instant;

use ember_core::Scene;
use ember_math::Vec3;

use crate::bucket::{generate_buckets, render_pass, Bucket};
use crate::film::Film;
use crate::sampler::{PixelSampler, SampleType};
use crate::settings::RenderSettings;
use crate::{RenderError, RenderResult};

/// Accumulating renderer for one scene.
pub struct ProgressiveRenderer {
    scene: Scene,
    settings: RenderSettings,
    buckets: Vec<Bucket>,
    film: Film,
}

impl ProgressiveRenderer {
    /// Validate `settings` and prepare an empty film.
    pub fn new(scene: Scene, settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;
        let buckets = generate_buckets(settings.width, settings.height, settings.bucket_size);
        let film = Film::new(settings.width, settings.height);
        log::debug!(
            "Progressive renderer: {}x{}, {} buckets, mode {}",
            settings.width,
            settings.height,
            buckets.len(),
            settings.sample_type
        );
        Ok(Self {
            scene,
            settings,
            buckets,
            film,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    /// Samples per pixel accumulated so far.
    pub fn samples(&self) -> u32 {
        self.film.samples()
    }

    pub fn is_done(&self) -> bool {
        self.film.samples() >= self.settings.total_samples
    }

    /// Render the next frame and return how many samples per pixel it added.
    ///
    /// Never goes past the total sample count; returns 0 once done.
    pub fn step(&mut self) -> u32 {
        let first_sample = self.film.samples();
        let count = self
            .settings
            .samples_per_pass
            .min(self.settings.total_samples.saturating_sub(first_sample));
        if count == 0 {
            return 0;
        }

        let start = Instant::now();
        let sampler = PixelSampler::new(
            &self.scene,
            self.settings.width,
            self.settings.height,
            self.settings.sample_type,
        )
        .with_color_seed(self.settings.color_seed)
        .with_path_config(self.settings.path);

        let results = render_pass(&self.buckets, &sampler, self.settings.seed, first_sample, count);
        for result in &results {
            self.film.add_bucket(result);
        }
        self.film.finish_pass(count);

        log::debug!(
            "Pass {}..{} in {:.1}ms",
            first_sample,
            self.film.samples(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        if self.is_done() {
            log::info!(
                "Finished {} samples per pixel ({})",
                self.film.samples(),
                self.settings.sample_type
            );
        }

        count
    }

    /// Step until the total sample count is reached.
    pub fn run(&mut self) {
        while self.step() > 0 {}
    }

    /// Discard accumulated samples.
    pub fn reset(&mut self) {
        self.film.reset();
    }

    /// Switch what each sample computes. Resets accumulation.
    pub fn set_sample_type(&mut self, sample_type: SampleType) {
        self.settings.sample_type = sample_type;
        self.reset();
    }

    /// Change the sample target. Resets when more samples are already held.
    pub fn set_total_samples(&mut self, total_samples: u32) -> RenderResult<()> {
        if total_samples == 0 {
            return Err(RenderError::InvalidSettings(
                "total_samples must be non-zero".to_string(),
            ));
        }
        self.settings.total_samples = total_samples;
        if self.film.samples() > total_samples {
            self.reset();
        }
        Ok(())
    }

    pub fn set_samples_per_pass(&mut self, samples_per_pass: u32) -> RenderResult<()> {
        if samples_per_pass == 0 {
            return Err(RenderError::InvalidSettings(
                "samples_per_pass must be non-zero".to_string(),
            ));
        }
        self.settings.samples_per_pass = samples_per_pass;
        Ok(())
    }

    /// Re-key the id visualization colors. Resets accumulation.
    pub fn change_colors(&mut self, color_seed: u32) {
        self.settings.color_seed = color_seed;
        self.reset();
    }

    /// Current linear image, row 0 at the top.
    pub fn image(&self) -> Vec<Vec3> {
        self.film.resolve()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.film.save_png(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::cornell_box;

    fn small_settings() -> RenderSettings {
        RenderSettings {
            width: 24,
            height: 16,
            samples_per_pass: 2,
            total_samples: 5,
            bucket_size: 8,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = RenderSettings {
            bucket_size: 0,
            ..RenderSettings::default()
        };
        assert!(matches!(
            ProgressiveRenderer::new(cornell_box(), settings),
            Err(RenderError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_steps_stop_at_total() {
        let mut renderer = ProgressiveRenderer::new(cornell_box(), small_settings()).expect("valid");

        assert_eq!(renderer.step(), 2);
        assert_eq!(renderer.step(), 2);
        assert_eq!(renderer.step(), 1);
        assert!(renderer.is_done());
        assert_eq!(renderer.step(), 0);
        assert_eq!(renderer.samples(), 5);
    }

    #[test]
    fn test_reset_then_rerun_is_identical() {
        let mut renderer = ProgressiveRenderer::new(cornell_box(), small_settings()).expect("valid");
        renderer.run();
        let first = renderer.image();
        assert!(first.iter().any(|p| p.length() > 0.0));

        renderer.reset();
        assert_eq!(renderer.samples(), 0);
        renderer.run();
        assert_eq!(renderer.image(), first);
    }

    #[test]
    fn test_image_independent_of_pass_size() {
        let mut a = ProgressiveRenderer::new(cornell_box(), small_settings()).expect("valid");
        let mut b = ProgressiveRenderer::new(
            cornell_box(),
            RenderSettings {
                samples_per_pass: 5,
                ..small_settings()
            },
        )
        .expect("valid");
        a.run();
        b.run();

        for (pa, pb) in a.image().iter().zip(b.image()) {
            assert!((*pa - pb).length() < 1e-4);
        }
    }

    #[test]
    fn test_changes_reset_accumulation() {
        let mut renderer = ProgressiveRenderer::new(cornell_box(), small_settings()).expect("valid");
        renderer.step();

        renderer.set_sample_type(SampleType::Normal);
        assert_eq!(renderer.samples(), 0);

        renderer.step();
        renderer.change_colors(99);
        assert_eq!(renderer.samples(), 0);
        assert_eq!(renderer.settings().color_seed, 99);

        renderer.step();
        renderer.set_total_samples(10).expect("non-zero");
        assert_eq!(renderer.samples(), 2);
        renderer.set_total_samples(1).expect("non-zero");
        assert_eq!(renderer.samples(), 0);
        assert!(renderer.set_total_samples(0).is_err());
        assert!(renderer.set_samples_per_pass(0).is_err());
    }

    #[test]
    fn test_primitive_id_image_in_unit_range() {
        let settings = RenderSettings {
            sample_type: SampleType::PrimitiveId,
            total_samples: 1,
            ..small_settings()
        };
        let mut renderer = ProgressiveRenderer::new(cornell_box(), settings).expect("valid");
        renderer.run();

        let image = renderer.image();
        assert!(image.iter().all(|p| p.min_element() >= 0.0 && p.max_element() < 1.0));
    }

    #[test]
    fn test_save_png_after_run() {
        let mut renderer = ProgressiveRenderer::new(cornell_box(), small_settings()).expect("valid");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cornell.png");

        assert!(matches!(renderer.save_png(&path), Err(RenderError::EmptyFilm)));
        renderer.run();
        renderer.save_png(&path).expect("png written");
        assert!(path.exists());
    }
}
