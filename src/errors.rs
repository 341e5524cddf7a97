//! The error taxonomy for the whole pipeline.  Everything here is a
//! local, caller-recoverable failure: bad numbers are reported before
//! any buffer is allocated, and the encoder's own errors are wrapped
//! rather than allowed to unwind.

/// Anything that can go wrong between receiving a render request and
/// handing back an image payload.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The requested grid has a zero-sized dimension.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    InvalidDimension {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// A numeric parameter was outside its valid range.
    #[fail(display = "invalid value for {}: {}", name, value)]
    InvalidParameter {
        /// Which parameter was rejected.
        name: &'static str,
        /// The offending value, as given.
        value: String,
    },

    /// The named palette is not one we know.
    #[fail(display = "unknown colormap {:?}", _0)]
    UnknownColormap(String),

    /// The raster encoding step failed.
    #[fail(display = "image encoding failed: {}", _0)]
    EncodingFailure(String),
}

impl RenderError {
    /// Shorthand for rejecting a parameter, stringifying whatever
    /// value it carried.
    pub fn bad_parameter<V: ToString>(name: &'static str, value: V) -> RenderError {
        RenderError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
