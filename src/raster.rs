// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rasterizer.  Maps a divergence field through a colormap to an
//! RGB raster and encodes it as PNG, entirely in memory.  The result
//! carries its MIME type and can print itself as a data: URI, so the
//! web layer never has to know how the bytes were produced.

use base64;
use image::png::PNGEncoder;
use image::ColorType;

use colormap::Colormap;
use engine::DivergenceField;
use errors::RenderError;

/// The dpi at which one field cell maps to exactly one output pixel.
/// Other dpi values scale the raster by their ratio to this baseline.
pub const BASE_DPI: u32 = 300;

/// An encoded image, ready for embedding: the raw bytes plus the MIME
/// type they were encoded as.
#[derive(Clone, Debug)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime: &'static str,
}

impl ImagePayload {
    /// The encoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The MIME type of the encoding.
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// The payload as a `data:` URI, suitable for dropping straight
    /// into an img tag's src attribute.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, base64::encode(&self.bytes))
    }
}

/// Raster a divergence field through a colormap and encode it as PNG.
/// No axes, borders, or padding: the output is pure pixel content,
/// the field's own dimensions scaled by dpi / 300.  Deterministic
/// for a given field, colormap, and dpi.
pub fn rasterize(
    field: &DivergenceField,
    colormap: &Colormap,
    dpi: u32,
) -> Result<ImagePayload, RenderError> {
    if dpi == 0 {
        return Err(RenderError::bad_parameter("dpi", dpi));
    }

    let out_width = scaled(field.width(), dpi);
    let out_height = scaled(field.height(), dpi);
    let pixels = colorize(field, colormap, out_width, out_height);

    let mut bytes = Vec::new();
    PNGEncoder::new(&mut bytes)
        .encode(&pixels, out_width as u32, out_height as u32, ColorType::RGB(8))
        .map_err(|e| RenderError::EncodingFailure(e.to_string()))?;

    Ok(ImagePayload {
        bytes,
        mime: "image/png",
    })
}

/// A field dimension scaled by the dpi ratio, never collapsing to
/// zero.
fn scaled(dim: usize, dpi: u32) -> usize {
    let scaled = (dim * (dpi as usize) + (BASE_DPI as usize) / 2) / (BASE_DPI as usize);
    if scaled == 0 {
        1
    } else {
        scaled
    }
}

/// Build the RGB buffer: normalize each divergence time by the
/// iteration budget, look the color up, and resample to the output
/// dimensions by nearest neighbor.  At the base dpi the resample is
/// the identity.
fn colorize(
    field: &DivergenceField,
    colormap: &Colormap,
    out_width: usize,
    out_height: usize,
) -> Vec<u8> {
    let budget = f64::from(field.max_iterations());
    let mut pixels = Vec::with_capacity(out_width * out_height * 3);
    for out_row in 0..out_height {
        let row = out_row * field.height() / out_height;
        for out_col in 0..out_width {
            let col = out_col * field.width() / out_width;
            let rgb = colormap.color(field.get(row, col) / budget);
            pixels.extend_from_slice(&rgb);
        }
    }
    pixels
}
