//! Synthetic study data.
//!
//! Generates an exact reference and shot-noise-limited pVQD runs for a
//! single spin precessing about a tilted field, written in the same record
//! format the real runs use. Useful for demos and for exercising the
//! pipeline without the published data set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{debug, info};

use crate::config::StudyConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::record::{ApproxRecord, ExactRecord};

/// Bloch vector of a spin starting along +x and precessing about the axis
/// `(sin α, 0, cos α)` at angular frequency `omega`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precession {
    /// Angular frequency.
    pub omega: f64,
    /// Tilt of the field axis from z, in radians.
    pub tilt: f64,
}

impl Default for Precession {
    fn default() -> Self {
        Self {
            omega: 2.0,
            tilt: 0.25,
        }
    }
}

impl Precession {
    /// Bloch vector at time `t` (Rodrigues rotation of +x about the axis).
    pub fn bloch(&self, t: f64) -> [f64; 3] {
        let n = [self.tilt.sin(), 0.0, self.tilt.cos()];
        let r0 = [1.0, 0.0, 0.0];
        let (s, c) = (self.omega * t).sin_cos();
        let n_dot_r = n[0] * r0[0] + n[1] * r0[1] + n[2] * r0[2];
        let cross = [
            n[1] * r0[2] - n[2] * r0[1],
            n[2] * r0[0] - n[0] * r0[2],
            n[0] * r0[1] - n[1] * r0[0],
        ];
        [0usize, 1, 2].map(|k| r0[k] * c + cross[k] * s + n[k] * n_dot_r * (1.0 - c))
    }
}

/// Builder for a synthetic study.
#[derive(Debug, Clone)]
pub struct SyntheticStudy {
    steps: usize,
    dt: f64,
    model: Precession,
}

impl SyntheticStudy {
    /// `steps` samples spaced `dt` apart.
    pub fn new(steps: usize, dt: f64) -> Self {
        Self {
            steps,
            dt,
            model: Precession::default(),
        }
    }

    /// Override the precession model.
    #[must_use]
    pub fn with_model(mut self, model: Precession) -> Self {
        self.model = model;
        self
    }

    fn times(&self) -> Vec<f64> {
        (0..self.steps).map(|i| i as f64 * self.dt).collect()
    }

    /// Noise-free reference record.
    pub fn exact_record(&self) -> ExactRecord {
        let times = self.times();
        let bloch: Vec<[f64; 3]> = times.iter().map(|&t| self.model.bloch(t)).collect();
        ExactRecord {
            sx: bloch.iter().map(|r| r[0]).collect(),
            sy: bloch.iter().map(|r| r[1]).collect(),
            sz: bloch.iter().map(|r| r[2]).collect(),
            times,
        }
    }

    /// A run whose expectations carry binomial-scale noise for `shots`.
    ///
    /// Noise is uniform with the standard deviation of a `shots`-sample
    /// estimate, `sqrt((1 − ⟨σ⟩²) / shots)`. Noisy vectors that leave the
    /// Bloch ball are scaled back onto its surface. Optimizer diagnostics
    /// get a matching random profile.
    pub fn approx_record_with_rng<R: Rng>(&self, shots: u32, mut rng: R) -> ApproxRecord {
        let times = self.times();
        let n = times.len();
        let shots_f = f64::from(shots.max(1));

        let mut record = ApproxRecord {
            times,
            sx: Vec::with_capacity(n),
            sy: Vec::with_capacity(n),
            sz: Vec::with_capacity(n),
            err_sx: Vec::with_capacity(n),
            err_sy: Vec::with_capacity(n),
            err_sz: Vec::with_capacity(n),
            iter_number: Vec::with_capacity(n),
            init_f: Vec::with_capacity(n),
            final_f: Vec::with_capacity(n),
        };

        // Uniform on [-√3, √3] has unit variance.
        let half_width = 3.0_f64.sqrt();
        let max_iters = (5.0 + 400.0 / shots_f.sqrt()).ceil() as u32;

        for i in 0..n {
            let exact = self.model.bloch(record.times[i]);
            let mut noisy = [0.0; 3];
            let mut sigma = [0.0; 3];
            for k in 0..3 {
                sigma[k] = ((1.0 - exact[k] * exact[k]).max(0.0) / shots_f).sqrt();
                let u: f64 = rng.gen_range(-half_width..=half_width);
                noisy[k] = exact[k] + sigma[k] * u;
            }
            let norm = noisy.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 1.0 {
                noisy = noisy.map(|v| v / norm);
            }
            record.sx.push(noisy[0]);
            record.sy.push(noisy[1]);
            record.sz.push(noisy[2]);
            record.err_sx.push(sigma[0]);
            record.err_sy.push(sigma[1]);
            record.err_sz.push(sigma[2]);

            if i == 0 {
                record.iter_number.push(0.0);
                record.init_f.push(1.0);
                record.final_f.push(1.0);
                continue;
            }
            let iters = rng.gen_range(1..=max_iters);
            let init_deficit = rng.gen_range(0.5..2.0) * self.dt * self.dt;
            let final_deficit = init_deficit * rng.gen_range(0.5..1.5) / shots_f.sqrt();
            record.iter_number.push(f64::from(iters));
            record.init_f.push(1.0 - init_deficit);
            record.final_f.push(1.0 - final_deficit.min(init_deficit));
        }

        record
    }

    /// Write the exact record and one run per configured shot count into
    /// `config.data_dir`, using the configured file names.
    pub fn write_data_set(&self, config: &StudyConfig, seed: u64) -> AnalysisResult<()> {
        let dir = &config.data_dir;
        std::fs::create_dir_all(dir).map_err(|e| {
            AnalysisError::Io(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        write_json(&config.exact_path(), &self.exact_record())?;
        for run in &config.runs {
            let rng = StdRng::seed_from_u64(seed ^ u64::from(run.shots));
            let record = self.approx_record_with_rng(run.shots, rng);
            let path = config.run_path(run);
            debug!("Writing {}-shot run to {}", run.shots, path.display());
            write_json(&path, &record)?;
        }

        info!(
            "Wrote synthetic study ({} samples, {} runs) to {}",
            self.steps,
            config.runs.len(),
            dir.display()
        );
        Ok(())
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> AnalysisResult<()> {
    let json = serde_json::to_string(value)?;
    std::fs::write(path, json)
        .map_err(|e| AnalysisError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
