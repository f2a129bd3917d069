// Copyright 2024 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! Command line interface.

use crate::{io, report};
use anyhow::{Context, Result};
use clap::Parser;
use pretty_env_logger::env_logger::DEFAULT_FILTER_ENV;
use std::path::{Path, PathBuf};

/// Calculates the electric field and field gradient from protein partial charges
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Structure with point charges (fixed-column ATOM/HETATM records or .aam)
    #[clap(long, short = 'p')]
    pub protein: PathBuf,

    /// Options file with query points, quadrupole, and dielectric constant
    #[clap(long, short = 'o')]
    pub options: PathBuf,

    /// Only calculate the field; skip the field gradient and energy
    #[clap(long, action)]
    pub field_only: bool,

    /// Also write all results to this file in YAML format
    #[clap(long, short = 'y')]
    pub yaml: Option<PathBuf>,

    /// Verbose output. See more with e.g. RUST_LOG=Trace
    #[clap(long, short = 'v', action)]
    pub verbose: bool,
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{} file does not exist", path.display());
    }
    Ok(())
}

pub fn do_main() -> Result<()> {
    let args = Args::parse();
    if std::env::var(DEFAULT_FILTER_ENV).is_err() {
        std::env::set_var(
            DEFAULT_FILTER_ENV,
            if args.verbose { "Debug" } else { "Info" },
        );
    }
    pretty_env_logger::init();
    run(&args)
}

/// Load the input files, evaluate all query points and report the results
pub fn run(args: &Args) -> Result<()> {
    ensure_exists(&args.protein)?;
    ensure_exists(&args.options)?;
    let mut yaml_output = args
        .yaml
        .as_ref()
        .map(|path| {
            std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))
        })
        .transpose()?;

    let charges = io::load_structure(&args.protein)?;
    let options = io::load_options(&args.options)?;
    log::info!(
        "{} point charges, net charge {:.3} e",
        charges.len(),
        charges.total_charge()
    );
    log::info!("Dielectric constant: {}", options.dielectric());

    let evaluations = options.evaluate(&charges, !args.field_only);
    report::log_evaluations(&evaluations);

    if let (Some(file), Some(path)) = (yaml_output.as_mut(), &args.yaml) {
        report::write_yaml(&evaluations, file, Some("evaluations"))?;
        log::info!("Results written to {}", path.display());
    }
    Ok(())
}
