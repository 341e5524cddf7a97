#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julibrot renderer
//!
//! An escape-time fractal takes a point on the complex plane and
//! repeatedly squares and offsets it, measuring how many iterations
//! pass before the orbit escapes a fixed bound.  That count, smoothed
//! to a continuous value to hide the integer banding, is the number
//! used to color the image.
//!
//! The two classic members of the family differ only in where the
//! constant comes from.  The Mandelbrot set starts every orbit at
//! zero and uses the sample point as the constant; a Julia set holds
//! one constant fixed for the whole image and starts each orbit at
//! the sample point.  Everything else -- the iteration, the escape
//! test, the smoothing -- is shared, so this crate implements them as
//! a single engine with two initializations.
//!
//! The pipeline is request -> divergence field -> colormapped raster
//! -> PNG bytes, all in memory.  The payload carries its MIME type
//! and can emit itself as a `data:` URI for inline embedding, which
//! is how the web layer this crate was built for consumes it.

extern crate base64;
extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod colormap;
pub mod engine;
pub mod errors;
pub mod raster;
pub mod request;
pub mod viewport;

pub use colormap::Colormap;
pub use engine::{compute_field, compute_field_threaded, DivergenceField, FractalKind};
pub use errors::RenderError;
pub use raster::{rasterize, ImagePayload};
pub use request::RenderRequest;
pub use viewport::{SampleGrid, Viewport};
