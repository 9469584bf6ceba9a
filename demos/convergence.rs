use std::f64::consts::PI;
use std::fs::File;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use griddiff::derivative::{Derivative, DerivativeFirstOrder, DerivativeSecondOrder};
use griddiff::field::Field;
use griddiff::index_space::{range1d, Axis};
use griddiff::parallel::{compute_derivative_patches, PatchDerivative};




/**
 * Measure the convergence rate of the derivative stencils on a periodic
 * sine wave, sampled on a sequence of increasingly fine 1D grids. Each grid
 * is split into patches, which are evaluated in parallel.
 */
#[derive(Debug, Parser)]
#[clap(version = "1.0", author = "J. Zrake <jzrake@clemson.edu>")]
struct Opts {
    /// Degree of the derivative (1 or 2)
    #[clap(short = 'd', long, default_value = "2")]
    degree: u8,

    /// Number of ghost cells; the order of accuracy is twice this
    #[clap(short = 'g', long, default_value = "2")]
    ghosts: usize,

    /// Comma-separated list of grid resolutions
    #[clap(short = 'r', long, default_value = "16,32,64,128,256", use_value_delimiter = true)]
    resolutions: Vec<i64>,

    /// Number of patches each grid is split into
    #[clap(short = 'p', long, default_value = "4")]
    num_patches: i64,

    /// Number of worker threads
    #[clap(short = 't', long, default_value = "2")]
    num_threads: usize,

    /// Write a CBOR report to this file
    #[clap(short = 'o', long)]
    output: Option<String>,
}




/**
 * The measured error at one resolution
 */
#[derive(serde::Serialize)]
struct Sample {
    resolution: i64,
    grid_spacing: f64,
    max_error: f64,
    rate: Option<f64>,
}




#[derive(serde::Serialize)]
struct Report {
    degree: u8,
    ghosts: usize,
    order: usize,
    samples: Vec<Sample>,
}




// ============================================================================
fn exact(degree: u8, x: f64) -> (f64, f64) {
    let k = 2.0 * PI;
    let u = (k * x).sin();
    let du = match degree {
        1 => k * (k * x).cos(),
        _ => -k * k * u,
    };
    (u, du)
}

fn patches(resolution: i64, num_patches: i64, ghosts: usize, degree: u8) -> Vec<PatchDerivative<1>> {
    let dx = 1.0 / resolution as f64;
    let size = resolution / num_patches;

    (0..num_patches).map(|n| {
        let space = range1d(n * size..(n + 1) * size);
        let data = Field::from_function(space.clone(), [ghosts], |[i]| exact(degree, (i as f64 + 0.5) * dx).0);
        let derivative = Field::zeros(space, [0], 1);
        PatchDerivative { data, derivative, grid_spacing: dx }
    })
    .collect()
}

fn max_error(patches: &[PatchDerivative<1>], degree: u8) -> f64 {
    patches
        .iter()
        .flat_map(|patch| patch.derivative.iter_interior(0).map(move |([i], du)| {
            (du - exact(degree, (i as f64 + 0.5) * patch.grid_spacing).1).abs()
        }))
        .fold(0.0, f64::max)
}




// ============================================================================
fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let opts = Opts::parse();
    info!("{:?}", opts);

    let engine: Box<dyn Derivative<1> + Send + Sync> = match opts.degree {
        1 => Box::new(DerivativeFirstOrder::<1>::new("du/dx", Axis::X, opts.ghosts)?),
        2 => Box::new(DerivativeSecondOrder::<1>::new("d2u/dx2", Axis::X, opts.ghosts)?),
        d => return Err(format!("derivative degree must be 1 or 2, got {}", d).into()),
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.num_threads)
        .build()?;

    let mut samples: Vec<Sample> = Vec::new();

    for &resolution in &opts.resolutions {
        if opts.num_patches < 1 || resolution % opts.num_patches != 0 {
            return Err(format!("resolution {} is not divisible into {} patches", resolution, opts.num_patches).into());
        }
        let mut patches = patches(resolution, opts.num_patches, opts.ghosts, opts.degree);

        pool.install(|| compute_derivative_patches(engine.as_ref(), &mut patches))?;

        let max_error = max_error(&patches, opts.degree);
        let rate = samples.last().map(|prev| {
            (prev.max_error / max_error).ln() / (resolution as f64 / prev.resolution as f64).ln()
        });

        info!(
            "N = {:<6} error = {:.3e} rate = {}",
            resolution,
            max_error,
            rate.map_or("-".to_string(), |r| format!("{:.2}", r)));

        samples.push(Sample {
            resolution,
            grid_spacing: 1.0 / resolution as f64,
            max_error,
            rate,
        });
    }

    if let Some(path) = opts.output {
        let report = Report {
            degree: opts.degree,
            ghosts: opts.ghosts,
            order: engine.stencil().order(),
            samples,
        };
        ciborium::ser::into_writer(&report, File::create(&path)?)?;
        info!("write {}", path);
    }
    Ok(())
}
