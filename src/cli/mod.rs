//! Command line interface for the AAB converter.

mod args;

pub use args::{Args, InputFormat};

use crate::bundler::{Converter, calculate_sha256};
use crate::config::{ConfigFile, load_config};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs one conversion described by already parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ConfigFile::default(),
    };

    let settings = args.settings_builder(&config).build()?;
    let request = args.request(&config);
    let converter = Converter::new(settings);

    let artifact = converter.convert(&request).await?;

    if !request.is_bundle_format() {
        println!("{}", artifact.display());
        return Ok(0);
    }

    let checksum = calculate_sha256(&artifact).await?;
    println!("{}", artifact.display());
    println!("SHA256: {}", checksum);
    Ok(0)
}
