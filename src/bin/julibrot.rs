extern crate clap;
extern crate julibrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use julibrot::engine::{compute_field_threaded, FractalKind};
use julibrot::raster::rasterize;
use julibrot::{Colormap, Viewport};
use num::Complex;
use std::fs;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_positive_float(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f > 0.0 && f.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ITERATIONS: &str = "iterations";
const FRACTAL: &str = "fractal";
const CONSTANT: &str = "constant";
const COLORMAP: &str = "colormap";
const DPI: &str = "dpi";
const SIZE: &str = "size";
const THREADS: &str = "threads";
const DATA_URI: &str = "data-uri";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("julibrot")
        .version("0.1.0")
        .about("Escape-time fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required_unless(DATA_URI)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("-0.5,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the viewport on the complex plane"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_positive_float(&s, "Zoom must be a positive number"))
                .help("Zoom factor; the viewport narrows as 1/zoom"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration budget per sample point"),
        )
        .arg(
            Arg::with_name(FRACTAL)
                .required(false)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .default_value("mandelbrot")
                .possible_values(&["mandelbrot", "julia"])
                .help("Which fractal to render"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .required(false)
                .long(CONSTANT)
                .short("k")
                .takes_value(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse julia constant"))
                .help("Julia recurrence constant as re,im (julia only)"),
        )
        .arg(
            Arg::with_name(COLORMAP)
                .required(false)
                .long(COLORMAP)
                .short("m")
                .takes_value(true)
                .default_value("cubehelix")
                .possible_values(Colormap::names())
                .help("Palette for the rendered image"),
        )
        .arg(
            Arg::with_name(DPI)
                .required(false)
                .long(DPI)
                .short("d")
                .takes_value(true)
                .default_value("300")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        2400,
                        "Could not parse dpi",
                        "Dpi must be between 1 and 2400",
                    )
                })
                .help("Output pixel density; 300 maps one field cell to one pixel"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("512x512")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse image size"))
                .help("Size of the sample grid"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the engine"),
        )
        .arg(
            Arg::with_name(DATA_URI)
                .required(false)
                .long(DATA_URI)
                .takes_value(false)
                .help("Print the image as a data: URI on stdout instead of writing a file"),
        )
        .get_matches()
}

fn main() {
    let matches = args();
    let center =
        parse_complex(matches.value_of(CENTER).unwrap()).expect("Error parsing center point");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Error parsing iteration count");
    let size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image size");
    let dpi = u32::from_str(matches.value_of(DPI).unwrap()).expect("Error parsing dpi");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Error parsing thread count");

    let kind = match matches.value_of(FRACTAL).unwrap() {
        "julia" => FractalKind::julia(matches.value_of(CONSTANT).and_then(parse_complex)),
        _ => FractalKind::Mandelbrot,
    };

    let result = Colormap::from_name(matches.value_of(COLORMAP).unwrap())
        .and_then(|colormap| {
            let view = Viewport::new(size.0, size.1, center.re, center.im, zoom)?;
            let field = compute_field_threaded(kind, &view, iterations, threads)?;
            rasterize(&field, &colormap, dpi)
        });

    match result {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(payload) => {
            if matches.is_present(DATA_URI) {
                println!("{}", payload.data_uri());
            } else if let Err(e) = fs::write(matches.value_of(OUTPUT).unwrap(), payload.bytes()) {
                eprintln!("Could not write output: {}", e);
                std::process::exit(1);
            }
        }
    }
}
