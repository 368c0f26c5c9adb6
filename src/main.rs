use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use image_average::{
    AverageParams,
    DEFAULT_SHARPEN_STRENGTH,
    Dimensionality,
    ImageStore,
    LaplacianSharpener,
    TiffStore,
    run,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_INVALID_ARGUMENTS: u8 = 1;
const EXIT_UNSUPPORTED_DIMENSIONALITY: u8 = 2;
const EXIT_RUN_FAILED: u8 = 3;

/// Averages a set of 2-D or 3-D scalar images pixel by pixel.
///
/// Every input contributes `sample / N`. With normalization enabled each
/// input is first divided by its own mean, and the average is sharpened.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of axes of every image (2 or 3)
    #[arg(allow_negative_numbers = true)]
    dimensionality: String,
    /// Where to write the averaged image
    output: PathBuf,
    /// Non-zero to divide each input by its mean before averaging
    #[arg(allow_negative_numbers = true)]
    normalize: i64,
    /// Images to average, in order
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,
    /// Skip the sharpening pass that follows a normalized average
    #[arg(long)]
    no_sharpen: bool,
    /// Strength of the sharpening pass
    #[arg(long, default_value_t = DEFAULT_SHARPEN_STRENGTH)]
    sharpen_strength: f32,
    /// Log filter, e.g. `info` or `image_average=debug`
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn params(&self) -> AverageParams {
        AverageParams {
            normalize: self.normalize != 0,
            sharpen: !self.no_sharpen,
            sharpen_strength: self.sharpen_strength,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version requests also arrive here.
            let code = if err.use_stderr() {
                ExitCode::from(EXIT_INVALID_ARGUMENTS)
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    if let Err(err) = init_logging(&args.log_level) {
        eprintln!("error: {:#}", err);
        return ExitCode::from(EXIT_INVALID_ARGUMENTS);
    }

    let dimensionality = match args.dimensionality.parse::<Dimensionality>() {
        Ok(dimensionality) => dimensionality,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(EXIT_UNSUPPORTED_DIMENSIONALITY);
        }
    };

    let result = match dimensionality {
        Dimensionality::Two => average::<2>(&args),
        Dimensionality::Three => average::<3>(&args),
    };

    match result {
        Ok(()) => {
            info!("completed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!("aborted");
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_RUN_FAILED)
        }
    }
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {:?}", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install the log subscriber: {}", err))
}

fn average<const D: usize>(args: &Args) -> Result<()>
where
    TiffStore: ImageStore<D>,
{
    let params = args.params();
    let report = run::<D, _, _, _>(
        &TiffStore,
        &LaplacianSharpener,
        &args.inputs,
        &args.output,
        &params,
    )
    .with_context(|| {
        format!(
            "failed to average {} images into {}",
            args.inputs.len(),
            args.output.display()
        )
    })?;

    let reference = args
        .inputs
        .get(report.reference)
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    info!(
        inputs = report.inputs,
        reference = %reference,
        extent = ?report.extent.as_array(),
        scales = ?report.scales,
        sharpened = report.sharpened,
        output = %args.output.display(),
        "wrote average"
    );
    Ok(())
}
