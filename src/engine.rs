// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time engine.  Takes a viewport and an iteration budget
//! and produces a divergence field: one smoothed escape count per
//! sample point.
//!
//! The Mandelbrot and Julia variants share the iteration core; the
//! only difference between them is how each point's starting orbit
//! value and recurrence constant are chosen, so that is the only
//! thing the variant tag controls.  Keeping one copy of the loop
//! keeps the two variants from drifting apart numerically.

use crossbeam;
use num::Complex;

use errors::RenderError;
use viewport::{SampleGrid, Viewport};

/// The default Julia recurrence constant, used when the caller asks
/// for a Julia set without supplying one.
pub const DEFAULT_JULIA_CONSTANT: Complex<f64> = Complex { re: -0.4, im: 0.6 };

/// Which member of the quadratic escape-time family to compute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FractalKind {
    /// Orbit starts at zero; the sample point is the recurrence
    /// constant.
    Mandelbrot,
    /// The constant is fixed for the whole image; the sample point is
    /// the orbit's starting value.
    Julia {
        /// The fixed recurrence constant.
        c: Complex<f64>,
    },
}

impl FractalKind {
    /// A Julia set with the given constant, or the default constant
    /// if the caller didn't pick one.
    pub fn julia(c: Option<Complex<f64>>) -> FractalKind {
        FractalKind::Julia {
            c: c.unwrap_or(DEFAULT_JULIA_CONSTANT),
        }
    }

    /// The initial orbit value and recurrence constant for one sample
    /// point.  This is the entire difference between the variants.
    fn seed(&self, sample: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        match *self {
            FractalKind::Mandelbrot => (Complex::new(0.0, 0.0), sample),
            FractalKind::Julia { c } => (sample, c),
        }
    }
}

/// A height x width array of smoothed divergence times, row-major.
/// Produced once per request and read-only afterward.
#[derive(Clone, Debug)]
pub struct DivergenceField {
    width: usize,
    height: usize,
    max_iterations: u32,
    values: Vec<f64>,
}

impl DivergenceField {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration budget the field was computed with.  Points that
    /// never diverged carry exactly this value.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The divergence time at a pixel.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.width + col]
    }

    /// The whole field, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// The smoothed divergence time for a point whose orbit escaped on
/// iteration `i`: `i - log2(max(1, log2(i)))`, with the inner log
/// taken as zero when i is zero.  The continuous correction hides
/// the color banding a raw integer count produces.  At i = 0 both
/// logs collapse and the recorded time is exactly 0.
fn smoothed(i: u32) -> f64 {
    let inner = if i > 0 { f64::from(i).log2() } else { 0.0 };
    f64::from(i) - inner.max(1.0).log2()
}

/// Iterate a single orbit.  Returns the smoothed divergence time, or
/// `max_iterations` if the orbit stays bounded for the whole budget.
/// The escape bound is |z| strictly greater than 2, tested on the
/// squared norm; 2 is a safe escape radius for z^2 + c.
fn iterate_point(kind: FractalKind, sample: Complex<f64>, max_iterations: u32) -> f64 {
    let (mut z, c) = kind.seed(sample);
    for i in 0..max_iterations {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            return smoothed(i);
        }
    }
    f64::from(max_iterations)
}

/// Fill one band of rows of the field.  `first_row` is the index of
/// the band's first row in the full grid.
fn compute_rows(
    kind: FractalKind,
    grid: &SampleGrid,
    max_iterations: u32,
    first_row: usize,
    band: &mut [f64],
) {
    let width = grid.width();
    for (offset, value) in band.iter_mut().enumerate() {
        let row = first_row + offset / width;
        let col = offset % width;
        *value = iterate_point(kind, grid.at(row, col), max_iterations);
    }
}

/// Compute the divergence field for a viewport: one smoothed escape
/// count per sample point.  Pure; two calls with the same arguments
/// produce the same field.
pub fn compute_field(
    kind: FractalKind,
    view: &Viewport,
    max_iterations: u32,
) -> Result<DivergenceField, RenderError> {
    if max_iterations == 0 {
        return Err(RenderError::bad_parameter("iterations", max_iterations));
    }
    let grid = view.sample_grid();
    let mut values = vec![0.0; view.width() * view.height()];
    compute_rows(kind, &grid, max_iterations, 0, &mut values);
    Ok(DivergenceField {
        width: view.width(),
        height: view.height(),
        max_iterations,
        values,
    })
}

/// A multi-threaded version of compute_field.  Rows are independent,
/// so the field is split into contiguous row bands, one per thread,
/// and each thread fills its own slice.  Output is identical to the
/// single-threaded path.
pub fn compute_field_threaded(
    kind: FractalKind,
    view: &Viewport,
    max_iterations: u32,
    threads: usize,
) -> Result<DivergenceField, RenderError> {
    if max_iterations == 0 {
        return Err(RenderError::bad_parameter("iterations", max_iterations));
    }
    if threads == 0 {
        return Err(RenderError::bad_parameter("threads", threads));
    }
    let grid = view.sample_grid();
    let width = view.width();
    let rows_per_band = (view.height() + threads - 1) / threads;
    let mut values = vec![0.0; width * view.height()];
    {
        let grid = &grid;
        crossbeam::scope(|spawner| {
            for (band_index, band) in values.chunks_mut(rows_per_band * width).enumerate() {
                spawner.spawn(move |_| {
                    compute_rows(kind, grid, max_iterations, band_index * rows_per_band, band);
                });
            }
        })
        .unwrap();
    }
    Ok(DivergenceField {
        width,
        height: view.height(),
        max_iterations,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(width: usize, height: usize) -> Viewport {
        Viewport::new(width, height, -0.5, 0.0, 1.0).unwrap()
    }

    #[test]
    fn field_has_requested_shape() {
        let f = compute_field(FractalKind::Mandelbrot, &view(48, 32), 50).unwrap();
        assert_eq!(f.width(), 48);
        assert_eq!(f.height(), 32);
        assert_eq!(f.values().len(), 48 * 32);
    }

    #[test]
    fn values_stay_inside_the_budget() {
        for &budget in &[1, 7, 100] {
            let f = compute_field(FractalKind::Mandelbrot, &view(32, 32), budget).unwrap();
            for &v in f.values() {
                assert!(v >= 0.0, "negative divergence time {}", v);
                assert!(v <= f64::from(budget), "{} exceeds budget {}", v, budget);
            }
        }
    }

    #[test]
    fn origin_never_diverges() {
        // (0,0) is in the Mandelbrot set for any budget.
        for &budget in &[1, 10, 500] {
            let v = Viewport::new(3, 3, 0.0, 0.0, 1.0).unwrap();
            let f = compute_field(FractalKind::Mandelbrot, &v, budget).unwrap();
            assert_eq!(f.get(1, 1), f64::from(budget));
        }
    }

    #[test]
    fn far_point_diverges_immediately() {
        let v = Viewport::new(3, 3, 10.0, 10.0, 1.0).unwrap();
        let f = compute_field(FractalKind::Mandelbrot, &v, 100).unwrap();
        // |10+10i| escapes on the first pass, so the smoothed time is
        // the i=0 fixed point of the correction: exactly zero.
        assert_eq!(f.get(1, 1), 0.0);
    }

    #[test]
    fn smoothing_is_exact_at_small_indices() {
        assert_eq!(smoothed(0), 0.0);
        // log2(1) = 0, inner max is 1, log2(1) = 0.
        assert_eq!(smoothed(1), 1.0);
        // log2(4) = 2, log2(2) = 1.
        assert_eq!(smoothed(4), 3.0);
    }

    #[test]
    fn julia_uses_the_sample_as_orbit_start() {
        // With c = 0 the recurrence is z -> z^2: points inside the
        // unit circle never escape, points outside escape quickly.
        let kind = FractalKind::Julia {
            c: Complex::new(0.0, 0.0),
        };
        // The center pixel of a 3x3 grid sits exactly on the center.
        let inside = Viewport::new(3, 3, 0.25, 0.0, 1.0).unwrap();
        let f = compute_field(kind, &inside, 64).unwrap();
        assert_eq!(f.get(1, 1), 64.0);

        let outside = Viewport::new(3, 3, 8.0, 0.0, 1.0).unwrap();
        let f = compute_field(kind, &outside, 64).unwrap();
        assert!(f.get(1, 1) < 3.0);
    }

    #[test]
    fn julia_default_constant_applies() {
        assert_eq!(
            FractalKind::julia(None),
            FractalKind::Julia {
                c: DEFAULT_JULIA_CONSTANT
            }
        );
        let picked = Complex::new(0.285, 0.01);
        assert_eq!(
            FractalKind::julia(Some(picked)),
            FractalKind::Julia { c: picked }
        );
    }

    #[test]
    fn zero_iteration_budget_is_rejected() {
        let err = compute_field(FractalKind::Mandelbrot, &view(4, 4), 0);
        assert!(err.is_err());
    }

    #[test]
    fn threaded_field_matches_single_threaded() {
        let v = view(64, 48);
        let single = compute_field(FractalKind::Mandelbrot, &v, 80).unwrap();
        for &threads in &[1, 2, 3, 7] {
            let multi =
                compute_field_threaded(FractalKind::Mandelbrot, &v, 80, threads).unwrap();
            assert_eq!(single.values(), multi.values(), "threads = {}", threads);
        }
    }
}
