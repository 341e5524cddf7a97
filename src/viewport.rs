//! Contains the Viewport struct, which describes the relationship
//! between a rectangle on the integral pixel plane with an origin at
//! 0,0 and a rectangle on the complex plane chosen by a center point
//! and a zoom factor, and the SampleGrid derived from it, which
//! hands out one complex sample point per pixel.

use num::Complex;

use errors::RenderError;

/// The half-width of the sampled x-range at zoom 1.  The visible
/// region shrinks as 1/zoom around the center.
const BASE_HALF_WIDTH: f64 = 1.5;

/// A rectangular region of the complex plane, chosen by center and
/// zoom, tied to a pixel grid.  The sampled region's width/height
/// ratio always matches the pixel grid's, so the image is never
/// distorted.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    width: usize,
    height: usize,
    center: Complex<f64>,
    zoom: f64,
}

impl Viewport {
    /// Constructor.  Validates the shape and the zoom before anything
    /// is allocated: a zero-sized grid is an InvalidDimension, and a
    /// zoom that is not a positive finite number is an
    /// InvalidParameter.
    pub fn new(
        width: usize,
        height: usize,
        center_x: f64,
        center_y: f64,
        zoom: f64,
    ) -> Result<Viewport, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimension { width, height });
        }
        if !(zoom > 0.0) || !zoom.is_finite() {
            return Err(RenderError::bad_parameter("zoom", zoom));
        }
        Ok(Viewport {
            width,
            height,
            center: Complex::new(center_x, center_y),
            zoom,
        })
    }

    /// Width of the pixel grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the pixel grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The center of the sampled region.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Half the width of the sampled x-range: 1.5 / zoom.
    pub fn half_width(&self) -> f64 {
        BASE_HALF_WIDTH / self.zoom
    }

    /// Half the height of the sampled y-range.  Scaled from the
    /// half-width by the pixel grid's height/width ratio.
    pub fn half_height(&self) -> f64 {
        self.half_width() * (self.height as f64) / (self.width as f64)
    }

    /// The sampled x-range, low to high.
    pub fn x_range(&self) -> (f64, f64) {
        (
            self.center.re - self.half_width(),
            self.center.re + self.half_width(),
        )
    }

    /// The sampled y-range, low to high.
    pub fn y_range(&self) -> (f64, f64) {
        (
            self.center.im - self.half_height(),
            self.center.im + self.half_height(),
        )
    }

    /// Build the grid of complex sample points for this viewport, one
    /// per pixel.
    pub fn sample_grid(&self) -> SampleGrid {
        let (x_from, x_to) = self.x_range();
        let (y_from, y_to) = self.y_range();
        SampleGrid {
            xs: linspace(x_from, x_to, self.width),
            ys: linspace(y_from, y_to, self.height),
        }
    }
}

/// An ordered height x width grid of complex sample points.  The x
/// values are shared by every row and the y values by every column,
/// so only the two axes are stored.  Immutable once constructed.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleGrid {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.ys.len()
    }

    /// The sample point for a pixel: xs[col] + i*ys[row].
    pub fn at(&self, row: usize, col: usize) -> Complex<f64> {
        Complex::new(self.xs[col], self.ys[row])
    }
}

/// `n` evenly spaced values from `from` to `to`, endpoints included.
/// A single-element axis sits at `from`, matching the usual linspace
/// convention.
fn linspace(from: f64, to: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![from];
    }
    let step = (to - from) / ((n - 1) as f64);
    (0..n).map(|i| from + (i as f64) * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_shape() {
        assert_eq!(
            Viewport::new(0, 512, 0.0, 0.0, 1.0),
            Err(RenderError::InvalidDimension {
                width: 0,
                height: 512
            })
        );
        assert!(Viewport::new(512, 0, 0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn viewport_fails_on_bad_zoom() {
        assert!(Viewport::new(4, 4, 0.0, 0.0, 0.0).is_err());
        assert!(Viewport::new(4, 4, 0.0, 0.0, -2.0).is_err());
        assert!(Viewport::new(4, 4, 0.0, 0.0, ::std::f64::INFINITY).is_err());
    }

    #[test]
    fn half_width_scales_inversely_with_zoom() {
        let v1 = Viewport::new(512, 512, -0.5, 0.0, 1.0).unwrap();
        let v4 = Viewport::new(512, 512, -0.5, 0.0, 4.0).unwrap();
        assert_eq!(v1.half_width(), 1.5);
        assert_eq!(v4.half_width(), 1.5 / 4.0);
        assert_eq!(v1.half_width() / v4.half_width(), 4.0);
    }

    #[test]
    fn aspect_ratio_matches_pixel_grid() {
        let v = Viewport::new(400, 300, 0.0, 0.0, 2.0).unwrap();
        let (x_from, x_to) = v.x_range();
        let (y_from, y_to) = v.y_range();
        let region_ratio = (x_to - x_from) / (y_to - y_from);
        assert!((region_ratio - 400.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn grid_axes_span_the_viewport() {
        let v = Viewport::new(5, 3, -0.5, 0.25, 1.0).unwrap();
        let grid = v.sample_grid();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        let (x_from, x_to) = v.x_range();
        let (y_from, y_to) = v.y_range();
        assert_eq!(grid.at(0, 0), Complex::new(x_from, y_from));
        assert_eq!(grid.at(2, 4), Complex::new(x_to, y_to));
        // Rows share x values; columns share y values.
        assert_eq!(grid.at(0, 2).re, grid.at(2, 2).re);
        assert_eq!(grid.at(1, 0).im, grid.at(1, 4).im);
    }

    #[test]
    fn linspace_handles_degenerate_axis() {
        assert_eq!(linspace(2.0, 7.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
