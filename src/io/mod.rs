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

//! # Loading of structure and options files
//!
//! Structures are read from `.aam` files (whitespace separated amino acid model records)
//! or from fixed-column `ATOM`/`HETATM` records for any other extension.
//! Options are read from YAML for `.yaml` and `.yml` extensions, and otherwise
//! from the line oriented `key value` format.
//!
//! Malformed records are handled according to a [`Strictness`] policy which is the
//! same for both kinds of files. By default structures are strict and options lenient.

mod error;
mod options;
mod structure;

pub use error::{LoadError, ParseWarning};
pub use options::{parse_options, parse_yaml_options, Options, QuadrupoleComponent};
pub use structure::{parse_aam, parse_fixed_columns, ColumnLayout};

use crate::PointChargeSet;
use std::path::Path;

/// Policy for malformed records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Abort with a [`LoadError`] on the first malformed record
    #[default]
    Strict,
    /// Skip malformed records and report them as [`ParseWarning`]s
    Lenient,
}

impl Strictness {
    /// Either fail on `warning` or collect it
    pub(crate) fn check(
        self,
        warning: ParseWarning,
        path: &Path,
        warnings: &mut Vec<ParseWarning>,
    ) -> Result<(), LoadError> {
        match self {
            Strictness::Strict => Err(warning.into_error(path.to_path_buf())),
            Strictness::Lenient => {
                warnings.push(warning);
                Ok(())
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn log_warnings(path: &Path, warnings: &[ParseWarning]) {
    for warning in warnings {
        log::warn!("{}: {}", path.display(), warning);
    }
}

/// Load point charges, failing on any malformed record
pub fn load_structure(path: impl AsRef<Path>) -> Result<PointChargeSet, LoadError> {
    load_structure_with(path, Strictness::Strict)
}

/// Load point charges with the given policy for malformed records
pub fn load_structure_with(
    path: impl AsRef<Path>,
    strictness: Strictness,
) -> Result<PointChargeSet, LoadError> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let (charges, warnings) = match path.extension().and_then(|e| e.to_str()) {
        Some("aam") => parse_aam(&content, path, strictness)?,
        _ => parse_fixed_columns(&content, &ColumnLayout::default(), path, strictness)?,
    };
    log_warnings(path, &warnings);
    log::debug!(
        "Read {} point charges with net charge {:.3} e from {}",
        charges.len(),
        charges.total_charge(),
        path.display()
    );
    if charges.is_empty() {
        log::warn!("No point charges found in {}", path.display());
    }
    Ok(charges)
}

/// Load options, skipping malformed lines with a warning
pub fn load_options(path: impl AsRef<Path>) -> Result<Options, LoadError> {
    load_options_with(path, Strictness::Lenient)
}

/// Load options with the given policy for malformed lines
///
/// The policy has no effect on YAML files which are always parsed as a whole.
pub fn load_options_with(
    path: impl AsRef<Path>,
    strictness: Strictness,
) -> Result<Options, LoadError> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let options = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml_options(&content, path)?,
        _ => {
            let (options, warnings) = parse_options(&content, path, strictness)?;
            log_warnings(path, &warnings);
            options
        }
    };
    log::debug!(
        "Read {} query points, dielectric constant {} from {}",
        options.points().len(),
        options.dielectric(),
        path.display()
    );
    Ok(options)
}
