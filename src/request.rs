//! The request-scoped entry point the web layer calls.  A
//! RenderRequest is a plain value holding the validated numeric
//! parameters from the form; rendering it is a pure function of that
//! value, so concurrent requests share no state at all.

use num::Complex;

use colormap::Colormap;
use engine::{compute_field, FractalKind};
use errors::RenderError;
use raster::{rasterize, ImagePayload};
use viewport::Viewport;

/// The output grid, in pixels.  Not exposed to callers; the web
/// layer could surface it as a form field later.
pub const RESOLUTION: usize = 512;

/// The palette used when the request doesn't name one.
pub const DEFAULT_COLORMAP: &str = "cubehelix";

/// The pixel density used when the request doesn't give one.  At
/// this value the output is exactly RESOLUTION x RESOLUTION.
pub const DEFAULT_DPI: u32 = 300;

/// One render request: everything the caller gets to choose.  The
/// web layer is responsible for parsing raw form input into these
/// typed fields; this crate validates their ranges.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Which fractal to draw.
    pub kind: FractalKind,
    /// X coordinate of the viewport center.
    pub x: f64,
    /// Y coordinate of the viewport center.
    pub y: f64,
    /// Zoom factor; the sampled half-width is 1.5 / zoom.
    pub zoom: f64,
    /// Iteration budget per sample point.
    pub iterations: u32,
    /// Palette name; None means "cubehelix".
    pub colormap: Option<String>,
    /// Output pixel density; None means 300.
    pub dpi: Option<u32>,
}

impl RenderRequest {
    /// A Mandelbrot request at the classic framing: centered on
    /// (-0.5, 0) at zoom 1.
    pub fn mandelbrot() -> RenderRequest {
        RenderRequest {
            kind: FractalKind::Mandelbrot,
            x: -0.5,
            y: 0.0,
            zoom: 1.0,
            iterations: 100,
            colormap: None,
            dpi: None,
        }
    }

    /// A Julia request centered on the origin, with the default
    /// constant if none is given.
    pub fn julia(c: Option<Complex<f64>>) -> RenderRequest {
        RenderRequest {
            kind: FractalKind::julia(c),
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            iterations: 100,
            colormap: None,
            dpi: None,
        }
    }

    /// The palette this request resolves to.
    fn resolve_colormap(&self) -> Result<Colormap, RenderError> {
        match self.colormap {
            Some(ref name) => Colormap::from_name(name),
            None => Colormap::from_name(DEFAULT_COLORMAP),
        }
    }

    /// Render the request to an embeddable image payload.  Parameters
    /// are validated before any buffer is allocated; the rest is the
    /// engine-then-rasterizer pipeline over a RESOLUTION-sized grid.
    pub fn render(&self) -> Result<ImagePayload, RenderError> {
        let colormap = self.resolve_colormap()?;
        let view = Viewport::new(RESOLUTION, RESOLUTION, self.x, self.y, self.zoom)?;
        let field = compute_field(self.kind, &view, self.iterations)?;
        rasterize(&field, &colormap, self.dpi.unwrap_or(DEFAULT_DPI))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_colormap_fails_before_rendering() {
        let mut req = RenderRequest::mandelbrot();
        req.colormap = Some("heatdeath".to_string());
        match req.render() {
            Err(RenderError::UnknownColormap(name)) => assert_eq!(name, "heatdeath"),
            other => panic!("expected UnknownColormap, got {:?}", other),
        }
    }

    #[test]
    fn bad_zoom_fails_before_rendering() {
        let mut req = RenderRequest::mandelbrot();
        req.zoom = 0.0;
        assert!(req.render().is_err());
    }

    #[test]
    fn bad_iteration_budget_fails() {
        let mut req = RenderRequest::mandelbrot();
        req.iterations = 0;
        assert!(req.render().is_err());
    }
}
