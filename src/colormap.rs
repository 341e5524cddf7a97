//! Named colormaps: fixed, enumerable palettes mapping a normalized
//! divergence value in [0, 1] to an RGB pixel.  The default is the
//! cubehelix scheme (Green 2011), computed analytically; the rest are
//! piecewise-linear ramps over small stop tables.

use itertools::Itertools;
use num::clamp;

use errors::RenderError;

/// Gradient stops for the "ember" palette: black heart through fire
/// to white heat.
const EMBER_STOPS: &[(f64, [u8; 3])] = &[
    (0.00, [0, 0, 0]),
    (0.25, [96, 16, 8]),
    (0.55, [224, 96, 16]),
    (0.85, [255, 208, 64]),
    (1.00, [255, 255, 255]),
];

/// Gradient stops for the "ocean" palette.
const OCEAN_STOPS: &[(f64, [u8; 3])] = &[
    (0.00, [0, 0, 16]),
    (0.30, [16, 48, 128]),
    (0.65, [32, 160, 160]),
    (0.90, [160, 240, 224]),
    (1.00, [255, 255, 255]),
];

/// A fixed palette, looked up by name.  Low and high divergence
/// values land on opposite ends of each palette's gradient, so the
/// set's interior and its fast-escaping surroundings are always
/// visually distinct.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Colormap {
    /// Green's cubehelix: monotonically increasing brightness with a
    /// helix through color space.  The default.
    Cubehelix,
    /// Plain linear gray ramp.
    Grayscale,
    /// Black through red and orange to white.
    Ember,
    /// Black through blue and teal to white.
    Ocean,
}

impl Colormap {
    /// Every palette name this crate knows, in lookup order.
    pub fn names() -> &'static [&'static str] {
        &["cubehelix", "grayscale", "ember", "ocean"]
    }

    /// Look a palette up by name.  Unknown names are an error, never
    /// a silent substitution; the caller owns any fallback policy.
    pub fn from_name(name: &str) -> Result<Colormap, RenderError> {
        match name {
            "cubehelix" => Ok(Colormap::Cubehelix),
            "grayscale" => Ok(Colormap::Grayscale),
            "ember" => Ok(Colormap::Ember),
            "ocean" => Ok(Colormap::Ocean),
            _ => Err(RenderError::UnknownColormap(name.to_string())),
        }
    }

    /// The palette's lookup name.
    pub fn name(&self) -> &'static str {
        match *self {
            Colormap::Cubehelix => "cubehelix",
            Colormap::Grayscale => "grayscale",
            Colormap::Ember => "ember",
            Colormap::Ocean => "ocean",
        }
    }

    /// Map a normalized value in [0, 1] to an RGB pixel.  Values
    /// outside the range are clamped.
    pub fn color(&self, t: f64) -> [u8; 3] {
        let t = clamp(t, 0.0, 1.0);
        match *self {
            Colormap::Cubehelix => cubehelix(t),
            Colormap::Grayscale => {
                let v = channel(t);
                [v, v, v]
            }
            Colormap::Ember => gradient(EMBER_STOPS, t),
            Colormap::Ocean => gradient(OCEAN_STOPS, t),
        }
    }
}

/// Scale a unit-interval channel value to a byte.
fn channel(v: f64) -> u8 {
    (clamp(v, 0.0, 1.0) * 255.0).round() as u8
}

/// The cubehelix scheme with its standard parameters (start 0.5,
/// rotations -1.5, hue 1.0, gamma 1.0): lightness rises linearly
/// with t while the hue spirals, which keeps the rendering readable
/// in grayscale reproductions too.
fn cubehelix(t: f64) -> [u8; 3] {
    const START: f64 = 0.5;
    const ROTATIONS: f64 = -1.5;
    const HUE: f64 = 1.0;

    let angle = 2.0 * ::std::f64::consts::PI * (START / 3.0 + ROTATIONS * t);
    let amplitude = HUE * t * (1.0 - t) / 2.0;
    let (sin, cos) = (angle.sin(), angle.cos());

    [
        channel(t + amplitude * (-0.14861 * cos + 1.78277 * sin)),
        channel(t + amplitude * (-0.29227 * cos - 0.90649 * sin)),
        channel(t + amplitude * (1.97294 * cos)),
    ]
}

/// Piecewise-linear interpolation over a stop table.  The table's
/// first stop is at 0.0 and its last at 1.0.
fn gradient(stops: &[(f64, [u8; 3])], t: f64) -> [u8; 3] {
    for (&(t0, c0), &(t1, c1)) in stops.iter().tuple_windows() {
        if t <= t1 {
            let span = t1 - t0;
            let frac = if span > 0.0 { (t - t0) / span } else { 0.0 };
            let mix = |a: u8, b: u8| {
                channel((f64::from(a) + frac * (f64::from(b) - f64::from(a))) / 255.0)
            };
            return [mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])];
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in Colormap::names() {
            let map = Colormap::from_name(name).unwrap();
            assert_eq!(&map.name(), name);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        match Colormap::from_name("viridis") {
            Err(RenderError::UnknownColormap(name)) => assert_eq!(name, "viridis"),
            other => panic!("expected UnknownColormap, got {:?}", other),
        }
    }

    #[test]
    fn cubehelix_ends_are_black_and_white() {
        let map = Colormap::Cubehelix;
        assert_eq!(map.color(0.0), [0, 0, 0]);
        assert_eq!(map.color(1.0), [255, 255, 255]);
    }

    #[test]
    fn grayscale_is_linear() {
        let map = Colormap::Grayscale;
        assert_eq!(map.color(0.0), [0, 0, 0]);
        assert_eq!(map.color(0.5), [128, 128, 128]);
        assert_eq!(map.color(1.0), [255, 255, 255]);
    }

    #[test]
    fn gradients_hit_their_stops() {
        assert_eq!(Colormap::Ember.color(0.0), [0, 0, 0]);
        assert_eq!(Colormap::Ember.color(0.25), [96, 16, 8]);
        assert_eq!(Colormap::Ocean.color(1.0), [255, 255, 255]);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(Colormap::Grayscale.color(-3.0), [0, 0, 0]);
        assert_eq!(Colormap::Grayscale.color(7.0), [255, 255, 255]);
    }
}
