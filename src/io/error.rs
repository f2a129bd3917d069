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

use core::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal error while loading a structure or options file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", .path.display())]
    Record {
        path: PathBuf,
        /// One-based line number
        line: usize,
        message: String,
    },

    #[error("invalid YAML in '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid options in '{}': {source}", .path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: validator::ValidationErrors,
    },
}

/// A malformed line that was skipped in lenient parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// One-based line number
    pub line: usize,
    /// The offending line
    pub content: String,
    pub message: String,
}

impl ParseWarning {
    pub(crate) fn into_error(self, path: PathBuf) -> LoadError {
        LoadError::Record {
            path,
            line: self.line,
            message: format!("{}: '{}'", self.message, self.content),
        }
    }
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping line {} ({}): '{}'",
            self.line, self.message, self.content
        )
    }
}
