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

//! Structure file parsers yielding point charges.

use super::{LoadError, ParseWarning, Strictness};
use crate::{PointCharge, PointChargeSet, Vector3};
use std::ops::Range;
use std::path::Path;

/// Byte ranges of the coordinate and charge fields in an `ATOM`/`HETATM` record
///
/// Ranges are zero-based and end-exclusive. A field extending past the end of a
/// line is cut at the line end; surrounding whitespace is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub x: Range<usize>,
    pub y: Range<usize>,
    pub z: Range<usize>,
    pub charge: Range<usize>,
}

impl ColumnLayout {
    /// Four 8-character fields: x `31..39`, y `39..47`, z `47..55`, charge `55..63`
    pub const CHARGED_PDB: ColumnLayout = ColumnLayout {
        x: 31..39,
        y: 39..47,
        z: 47..55,
        charge: 55..63,
    };

    /// Extract a point charge from a single record
    pub fn parse_record(&self, line: &str) -> Result<PointCharge, String> {
        let value = |name: &str, range: &Range<usize>| {
            let text = column(line, range);
            text.parse::<f64>().map_err(|_| {
                format!(
                    "invalid {} '{}' in columns {}-{}",
                    name,
                    text,
                    range.start + 1,
                    range.end
                )
            })
        };
        let coordinate = Vector3::new(
            value("x coordinate", &self.x)?,
            value("y coordinate", &self.y)?,
            value("z coordinate", &self.z)?,
        );
        Ok(PointCharge::new(coordinate, value("charge", &self.charge)?))
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::CHARGED_PDB
    }
}

/// Trimmed content of a column range, cut at the end of the line
fn column<'a>(line: &'a str, range: &Range<usize>) -> &'a str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or_default().trim()
}

fn is_atom_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Parse fixed-column `ATOM` and `HETATM` records; all other lines are ignored
pub fn parse_fixed_columns(
    content: &str,
    layout: &ColumnLayout,
    path: &Path,
    strictness: Strictness,
) -> Result<(PointChargeSet, Vec<ParseWarning>), LoadError> {
    let mut charges = PointChargeSet::new();
    let mut warnings = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if !is_atom_record(line) {
            continue;
        }
        match layout.parse_record(line) {
            Ok(charge) => charges.push(charge),
            Err(message) => strictness.check(
                ParseWarning {
                    line: index + 1,
                    content: line.to_string(),
                    message,
                },
                path,
                &mut warnings,
            )?,
        }
    }
    Ok((charges, warnings))
}

/// Parse an amino acid model (AAM) file
///
/// The first line is a header. Each following line has eight whitespace separated
/// fields: `name number x y z charge mass radius`, of which position and charge are used.
pub fn parse_aam(
    content: &str,
    path: &Path,
    strictness: Strictness,
) -> Result<(PointChargeSet, Vec<ParseWarning>), LoadError> {
    let mut charges = PointChargeSet::new();
    let mut warnings = Vec::new();
    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_aam_record(line) {
            Ok(charge) => charges.push(charge),
            Err(message) => strictness.check(
                ParseWarning {
                    line: index + 1,
                    content: line.to_string(),
                    message,
                },
                path,
                &mut warnings,
            )?,
        }
    }
    Ok((charges, warnings))
}

fn parse_aam_record(line: &str) -> Result<PointCharge, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 8 {
        return Err(format!("expected 8 fields, found {}", fields.len()));
    }
    let value = |i: usize| {
        fields[i]
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}' in field {}", fields[i], i + 1))
    };
    Ok(PointCharge::new(
        Vector3::new(value(2)?, value(3)?, value(4)?),
        value(5)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-column record with the charge in columns 56-63
    fn record(name: &str, x: f64, y: f64, z: f64, charge: f64) -> String {
        format!("{:<31}{:>8.3}{:>8.3}{:>8.3}{:>8.4} 1.55", name, x, y, z, charge)
    }

    #[test]
    fn record_helper_matches_layout() {
        let line = record("ATOM      1  N   MET A   1", 1.0, -2.5, 30.125, -0.3);
        assert_eq!(&line[31..39], "   1.000");
        assert_eq!(&line[55..63], " -0.3000");
    }

    #[test]
    fn atom_and_hetatm_records() {
        let content = [
            "REMARK   generated for testing".to_string(),
            record("ATOM      1  N   MET A   1", 1.0, -2.5, 30.125, -0.3),
            record("HETATM    2  O   HOH A   2", -10.0, 0.0, 5.5, 0.417),
            "TER".to_string(),
            "END".to_string(),
        ]
        .join("\n");
        let (charges, warnings) = parse_fixed_columns(
            &content,
            &ColumnLayout::default(),
            Path::new("test.pqr"),
            Strictness::Strict,
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(charges.len(), 2);
        let first = charges.as_slice()[0];
        assert_eq!(first.coordinate, Vector3::new(1.0, -2.5, 30.125));
        assert_eq!(first.charge, -0.3);
        assert_eq!(charges.as_slice()[1].charge, 0.417);
    }

    #[test]
    fn short_line_is_cut_at_line_end() {
        let line = format!("{:<31}{:>8.3}{:>8.3}{:>8.3}{:>7.3}", "ATOM", 1.0, 2.0, 3.0, 0.5);
        let charge = ColumnLayout::default().parse_record(&line).unwrap();
        assert_eq!(charge.charge, 0.5);
    }

    #[test]
    fn malformed_record_is_fatal_when_strict() {
        let content = format!(
            "{}\nATOM      2  CA  MET A   1    xxxxxxxx",
            record("ATOM      1  N   MET A   1", 1.0, 2.0, 3.0, 0.1)
        );
        let err = parse_fixed_columns(
            &content,
            &ColumnLayout::default(),
            Path::new("protein.pqr"),
            Strictness::Strict,
        )
        .unwrap_err();
        match err {
            LoadError::Record { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("x coordinate"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_record_is_skipped_when_lenient() {
        let content = format!(
            "HETATM\n{}",
            record("ATOM      1  N   MET A   1", 1.0, 2.0, 3.0, 0.1)
        );
        let (charges, warnings) = parse_fixed_columns(
            &content,
            &ColumnLayout::default(),
            Path::new("protein.pqr"),
            Strictness::Lenient,
        )
        .unwrap();
        assert_eq!(charges.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 1);
    }

    #[test]
    fn custom_layout() {
        let layout = ColumnLayout {
            x: 0..5,
            y: 5..10,
            z: 10..15,
            charge: 15..20,
        };
        let charge = layout.parse_record("ATOM 1.0  2.0  3.0  -1.0").unwrap_err();
        assert!(charge.contains("x coordinate"));
        let charge = layout.parse_record("  1.0  2.0  3.0 -1.0").unwrap();
        assert_eq!(charge.coordinate, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(charge.charge, -1.0);
    }

    #[test]
    fn aam_records() {
        let content = "3\n\
            ALA 1 0.0 1.0 2.0 0.5 71.0 3.3\n\
            \n\
            GLU 2 -1.0 -2.0 -3.0 -1.0 128.0 3.8\n\
            CTR 3 4.0 4.0 4.0 -1.0 16.0 2.0\n";
        let (charges, warnings) =
            parse_aam(content, Path::new("mol.aam"), Strictness::Strict).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(charges.len(), 3);
        assert_eq!(charges.as_slice()[1].coordinate, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(charges.total_charge(), -1.5);
    }

    #[test]
    fn aam_wrong_field_count() {
        let content = "1\nALA 1 0.0 1.0 2.0 0.5\n";
        let err = parse_aam(content, Path::new("mol.aam"), Strictness::Strict).unwrap_err();
        assert_eq!(err.to_string(), "mol.aam:2: expected 8 fields, found 6: 'ALA 1 0.0 1.0 2.0 0.5'");
        let (charges, warnings) =
            parse_aam(content, Path::new("mol.aam"), Strictness::Lenient).unwrap();
        assert!(charges.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
