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

//! Calculation options: dielectric constant, point quadrupole, and query points.

use super::{LoadError, ParseWarning, Strictness};
use crate::{units::QUADRUPOLE_TO_COULOMB_ANGSTROM2, Matrix3, Vector3};
use derive_getters::Getters;
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Independent components of the symmetric quadrupole tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadrupoleComponent {
    XX,
    YY,
    ZZ,
    XY,
    XZ,
    YZ,
}

impl QuadrupoleComponent {
    pub const ALL: [QuadrupoleComponent; 6] = [
        QuadrupoleComponent::XX,
        QuadrupoleComponent::YY,
        QuadrupoleComponent::ZZ,
        QuadrupoleComponent::XY,
        QuadrupoleComponent::XZ,
        QuadrupoleComponent::YZ,
    ];

    /// Row and column in the tensor; off-diagonal components are mirrored
    pub const fn indices(self) -> (usize, usize) {
        match self {
            QuadrupoleComponent::XX => (0, 0),
            QuadrupoleComponent::YY => (1, 1),
            QuadrupoleComponent::ZZ => (2, 2),
            QuadrupoleComponent::XY => (0, 1),
            QuadrupoleComponent::XZ => (0, 2),
            QuadrupoleComponent::YZ => (1, 2),
        }
    }

    /// Two letter key, e.g. `xy`
    pub const fn key(self) -> &'static str {
        match self {
            QuadrupoleComponent::XX => "xx",
            QuadrupoleComponent::YY => "yy",
            QuadrupoleComponent::ZZ => "zz",
            QuadrupoleComponent::XY => "xy",
            QuadrupoleComponent::XZ => "xz",
            QuadrupoleComponent::YZ => "yz",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Settings for a field calculation
///
/// The quadrupole is stored in C·Å², ready to be contracted with a field gradient in V/Å².
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Options {
    /// Relative permittivity of the medium
    dielectric: f64,
    /// Probe quadrupole moment (C·Å²)
    quadrupole: Matrix3,
    /// Positions where the field is evaluated (Å)
    points: Vec<Vector3>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dielectric: 1.0,
            quadrupole: Matrix3::zeros(),
            points: Vec::new(),
        }
    }
}

impl Options {
    /// New options with a quadrupole already in C·Å²
    pub fn new(dielectric: f64, quadrupole: Matrix3, points: Vec<Vector3>) -> Self {
        Self {
            dielectric,
            quadrupole,
            points,
        }
    }

    /// Set a quadrupole component given in atomic units, _e_·bohr²
    pub fn set_quadrupole_component(&mut self, component: QuadrupoleComponent, value: f64) {
        let value = value * QUADRUPOLE_TO_COULOMB_ANGSTROM2;
        let (i, j) = component.indices();
        self.quadrupole[(i, j)] = value;
        self.quadrupole[(j, i)] = value;
    }

    pub fn set_dielectric(&mut self, dielectric: f64) {
        self.dielectric = dielectric;
    }

    pub fn add_point(&mut self, point: Vector3) {
        self.points.push(point);
    }
}

/// A single interpreted line of an options file
#[derive(Debug, PartialEq)]
enum OptionLine {
    Quadrupole(QuadrupoleComponent, f64),
    Dielectric(f64),
    Point(Vector3),
    Blank,
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("invalid number '{}'", text))
}

impl std::str::FromStr for OptionLine {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.len() <= 2 || line.starts_with('#') {
            return Ok(OptionLine::Blank);
        }
        let content = line.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content.split_whitespace().collect();
        let key = fields[0];
        if let Some(component) = QuadrupoleComponent::from_key(key) {
            return match &fields[1..] {
                [value] => Ok(OptionLine::Quadrupole(component, parse_number(value)?)),
                _ => Err(format!("expected a single value after '{}'", key)),
            };
        }
        if key == "dielectric" {
            return match &fields[1..] {
                [value] => {
                    let dielectric = parse_number(value)?;
                    if dielectric > 0.0 {
                        Ok(OptionLine::Dielectric(dielectric))
                    } else {
                        Err(format!("dielectric constant must be positive, got {}", dielectric))
                    }
                }
                _ => Err("expected a single value after 'dielectric'".to_string()),
            };
        }
        match fields.as_slice() {
            [x, y, z] => Ok(OptionLine::Point(Vector3::new(
                parse_number(x)?,
                parse_number(y)?,
                parse_number(z)?,
            ))),
            _ => Err(format!(
                "expected three coordinates, found {} fields",
                fields.len()
            )),
        }
    }
}

/// Parse the line oriented options format
///
/// | Line                  | Effect                                               |
/// |-----------------------|------------------------------------------------------|
/// | `xx` ... `yz` value   | quadrupole component in _e_·bohr², mirrored          |
/// | `dielectric` value    | relative permittivity, default 1                     |
/// | `x y z`               | query point in Å                                     |
/// | `# ...`, short lines  | ignored                                              |
///
/// Keyed lines take exactly one value and points exactly three; anything following
/// a `#` is a comment.
///
/// # Examples
/// ~~~
/// use protein_field::io::{parse_options, Strictness};
/// use protein_field::Vector3;
/// let content = "dielectric 4.0\n1.0 2.0 3.0\nbadline\n";
/// let (options, warnings) =
///     parse_options(content, "options.txt".as_ref(), Strictness::Lenient).unwrap();
/// assert_eq!(*options.dielectric(), 4.0);
/// assert_eq!(options.points(), &vec![Vector3::new(1.0, 2.0, 3.0)]);
/// assert_eq!(warnings.len(), 1);
/// ~~~
pub fn parse_options(
    content: &str,
    path: &Path,
    strictness: Strictness,
) -> Result<(Options, Vec<ParseWarning>), LoadError> {
    let mut options = Options::default();
    let mut warnings = Vec::new();
    for (index, line) in content.lines().enumerate() {
        match line.parse::<OptionLine>() {
            Ok(OptionLine::Quadrupole(component, value)) => {
                options.set_quadrupole_component(component, value)
            }
            Ok(OptionLine::Dielectric(dielectric)) => options.set_dielectric(dielectric),
            Ok(OptionLine::Point(point)) => options.add_point(point),
            Ok(OptionLine::Blank) => {}
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
    Ok((options, warnings))
}

/// Quadrupole components in the YAML options format (_e_·bohr²)
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct QuadrupoleInput {
    xx: f64,
    yy: f64,
    zz: f64,
    xy: f64,
    xz: f64,
    yz: f64,
}

impl QuadrupoleInput {
    fn value(&self, component: QuadrupoleComponent) -> f64 {
        match component {
            QuadrupoleComponent::XX => self.xx,
            QuadrupoleComponent::YY => self.yy,
            QuadrupoleComponent::ZZ => self.zz,
            QuadrupoleComponent::XY => self.xy,
            QuadrupoleComponent::XZ => self.xz,
            QuadrupoleComponent::YZ => self.yz,
        }
    }
}

fn default_dielectric() -> f64 {
    1.0
}

/// YAML options file
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
struct OptionsInput {
    #[serde(default = "default_dielectric")]
    #[validate(range(exclusive_min = 0.0))]
    dielectric: f64,
    #[serde(default)]
    quadrupole: QuadrupoleInput,
    #[serde(default)]
    points: Vec<Vector3>,
}

/// Parse options in YAML format
///
/// ~~~
/// use protein_field::io::parse_yaml_options;
/// let yaml = "dielectric: 2.0\nquadrupole: {xx: 1.0, yz: -0.5}\npoints:\n  - [1.0, 0.0, 0.0]\n";
/// let options = parse_yaml_options(yaml, "options.yaml".as_ref()).unwrap();
/// assert_eq!(*options.dielectric(), 2.0);
/// assert_eq!(options.quadrupole()[(1, 2)], options.quadrupole()[(2, 1)]);
/// assert_eq!(options.points().len(), 1);
/// ~~~
pub fn parse_yaml_options(content: &str, path: &Path) -> Result<Options, LoadError> {
    let input: OptionsInput = serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    input.validate().map_err(|source| LoadError::Validation {
        path: path.to_path_buf(),
        source,
    })?;
    let mut options = Options::default();
    options.set_dielectric(input.dielectric);
    for component in QuadrupoleComponent::ALL {
        options.set_quadrupole_component(component, input.quadrupole.value(component));
    }
    input.points.into_iter().for_each(|p| options.add_point(p));
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lenient(content: &str) -> (Options, Vec<ParseWarning>) {
        parse_options(content, Path::new("options.txt"), Strictness::Lenient).unwrap()
    }

    #[test]
    fn keys_dielectric_and_points() {
        let (options, warnings) = lenient("xx 1.0\ndielectric 2.0\n1.0 2.0 3.0\n");
        assert!(warnings.is_empty());
        assert_eq!(options.quadrupole()[(0, 0)], 1.0 * QUADRUPOLE_TO_COULOMB_ANGSTROM2);
        assert_eq!(*options.dielectric(), 2.0);
        assert_eq!(options.points(), &vec![Vector3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn badline_is_skipped() {
        let (options, warnings) = lenient("1.0 2.0 3.0\nbadline\n4.0 5.0 6.0\n");
        assert_eq!(options.points().len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 2);
        assert_eq!(warnings[0].content, "badline");
    }

    #[test]
    fn defaults() {
        let (options, _) = lenient("");
        assert_eq!(options, Options::default());
        assert_eq!(*options.dielectric(), 1.0);
        assert_eq!(*options.quadrupole(), Matrix3::zeros());
    }

    #[test]
    fn off_diagonal_components_are_mirrored() {
        let (options, _) = lenient("xy 0.5\nxz -1.5\nyz 2.0\nyy 3.0\nzz -3.0\n");
        let q = options.quadrupole();
        for (i, j, value) in [(0, 1, 0.5), (0, 2, -1.5), (1, 2, 2.0)] {
            assert_relative_eq!(q[(i, j)], value * QUADRUPOLE_TO_COULOMB_ANGSTROM2);
            assert_eq!(q[(i, j)], q[(j, i)]);
        }
        assert_eq!(q[(0, 0)], 0.0);
        assert_relative_eq!(q[(1, 1)], 3.0 * QUADRUPOLE_TO_COULOMB_ANGSTROM2);
    }

    #[test]
    fn comments_and_short_lines_are_ignored() {
        let (options, warnings) = lenient("# query points\n\n  \nx\n0 0 1\n");
        assert!(warnings.is_empty());
        assert_eq!(options.points(), &vec![Vector3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn trailing_comments() {
        let content = "xx 1.0 # e bohr^2\ndielectric 80 # water\n0 0 1 # above\n";
        let (options, warnings) = lenient(content);
        assert!(warnings.is_empty());
        assert_eq!(options.quadrupole()[(0, 0)], QUADRUPOLE_TO_COULOMB_ANGSTROM2);
        assert_eq!(*options.dielectric(), 80.0);
        assert_eq!(options.points(), &vec![Vector3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn new_options_are_used_as_given() {
        let quadrupole = Matrix3::from_diagonal_element(2.0);
        let points = vec![Vector3::new(1.0, 0.0, 0.0)];
        let options = Options::new(4.0, quadrupole, points.clone());
        assert_eq!(*options.dielectric(), 4.0);
        assert_eq!(*options.quadrupole(), quadrupole);
        assert_eq!(options.points(), &points);
    }

    #[test]
    fn malformed_lines() {
        let content = "xx abc\ndielectric -1\ndielectric\n1.0 2.0\n1 2 three\nyy 1.0 2.0\n";
        let (options, warnings) = lenient(content);
        assert_eq!(options, Options::default());
        let lines: Vec<usize> = warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5, 6]);
        assert!(warnings[1].message.contains("positive"));
    }

    #[test]
    fn strict_options_fail_on_first_malformed_line() {
        let err = parse_options(
            "0 0 1\nbadline\n",
            Path::new("options.txt"),
            Strictness::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Record { line: 2, .. }));
    }

    #[test]
    fn yaml_options() {
        let yaml = "quadrupole:\n  zz: 2.0\n  xy: 1.0\npoints:\n  - [0.0, 0.0, 1.0]\n  - [0.0, 1.0, 0.0]\n";
        let options = parse_yaml_options(yaml, Path::new("o.yaml")).unwrap();
        assert_eq!(*options.dielectric(), 1.0);
        assert_relative_eq!(options.quadrupole()[(2, 2)], 2.0 * QUADRUPOLE_TO_COULOMB_ANGSTROM2);
        assert_eq!(options.quadrupole()[(1, 0)], options.quadrupole()[(0, 1)]);
        assert_eq!(options.points()[1], Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn yaml_options_are_validated() {
        let err = parse_yaml_options("dielectric: 0.0\n", Path::new("o.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Validation { .. }));
        let err = parse_yaml_options("temperature: 298\n", Path::new("o.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Yaml { .. }));
    }
}
