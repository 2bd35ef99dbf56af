// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for parsing [Gherkin] files into the [`model`].
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference
//! [`model`]: crate::model

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};

use crate::model;

/// Parser of `.feature` files into [`model::Feature`]s.
///
/// As there is no runtime-agnostic way to interact with io, this parser is
/// blocking.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureParser;

impl FeatureParser {
    /// Creates a new [`FeatureParser`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses the `.feature` file at the given `path`.
    ///
    /// # Errors
    ///
    /// [`FeatureParseError`] carrying the absolute path and the inner parser
    /// message, if the file cannot be read or is malformed.
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<model::Feature, FeatureParseError> {
        let path = path.as_ref();
        let env = gherkin::GherkinEnv::default();
        gherkin::Feature::parse_path(path, env)
            .map(|f| model::Feature::from(&f))
            .map_err(|e| FeatureParseError::new(path, e))
    }

    /// Parses the given feature `text` directly.
    ///
    /// `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// [`FeatureParseError`], if the text is not a valid feature.
    pub fn parse_str(
        &self,
        text: &str,
        path: impl AsRef<Path>,
    ) -> Result<model::Feature, FeatureParseError> {
        let env = gherkin::GherkinEnv::default();
        gherkin::Feature::parse(text, env)
            .map(|f| model::Feature::from(&f))
            .map_err(|e| FeatureParseError::new(path.as_ref(), e))
    }
}

/// Error of parsing a `.feature` file.
#[derive(Clone, Debug, Display, Error)]
#[display(
    fmt = "Failed to parse feature file {}: {}",
    "path.display()",
    message
)]
pub struct FeatureParseError {
    /// Path of the offending file.
    pub path: PathBuf,

    /// Message of the inner [`gherkin`] parser error.
    pub message: String,
}

impl FeatureParseError {
    /// Creates a [`FeatureParseError`] for the given `path`, resolving it to
    /// an absolute one where possible.
    pub(crate) fn new(path: &Path, source: impl ToString) -> Self {
        Self {
            path: path.canonicalize().unwrap_or_else(|_| path.to_owned()),
            message: source.to_string(),
        }
    }
}
