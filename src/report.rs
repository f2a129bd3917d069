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

//! Reporting of evaluated points through the logger and as YAML.

use crate::{evaluate::Evaluation, Matrix3};
use std::io::Write;

/// Comma separated row of a tensor
fn format_row(tensor: &Matrix3, row: usize) -> String {
    (0..3)
        .map(|column| format!("{:.6e}", tensor[(row, column)]))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Log fields for all points, followed by gradients and energies where available
pub fn log_evaluations(evaluations: &[Evaluation]) {
    log::info!("Electric field at points (V/Å)");
    log::info!("[x, y, z] [Ex, Ey, Ez] |E|");
    for evaluation in evaluations {
        log::info!(
            "{} {} {}",
            evaluation.position,
            evaluation.field,
            evaluation.field_magnitude
        );
    }

    if evaluations.iter().all(|e| e.gradient.is_none()) {
        return;
    }
    log::info!("Electric field gradient at points (V/Å²)");
    for evaluation in evaluations {
        let Some(gradient) = &evaluation.gradient else {
            continue;
        };
        log::info!("Position: {}", evaluation.position);
        for row in 0..3 {
            log::info!("{}", format_row(gradient, row));
        }
        if let Some(energy) = evaluation.energy {
            log::info!("Energy: {} eV", energy);
        }
    }
}

/// Serialize data as YAML, optionally nested under `key`
pub fn write_yaml<T: serde::Serialize>(
    data: &T,
    output: &mut impl Write,
    key: Option<&str>,
) -> anyhow::Result<()> {
    let yaml = match key {
        Some(key) => {
            let mut wrapper = std::collections::BTreeMap::new();
            wrapper.insert(key.to_string(), data);
            serde_yaml::to_string(&wrapper)?
        }
        None => serde_yaml::to_string(data)?,
    };
    output.write_all(yaml.as_bytes())?;
    Ok(())
}
