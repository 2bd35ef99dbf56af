// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Run configuration shared by the crawler and the result store.

use std::path::PathBuf;

use smart_default::SmartDefault;

use crate::results::TestResultsFormat;

/// How the crawler reacts to a malformed feature file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorHandling {
    /// Abort the crawl on the first parse error.
    #[default]
    Abort,

    /// Accumulate parse errors into the crawl report and continue.
    Collect,
}

/// Configuration of a documentation run.
///
/// Built once up front; both the [`Crawler`] and the [`ResultStore`] read it
/// and never write it back.
///
/// [`Crawler`]: crate::tree::Crawler
/// [`ResultStore`]: crate::results::ResultStore
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Directory the feature tree is crawled from.
    #[default(PathBuf::from("."))]
    pub feature_directory: PathBuf,

    /// Base URI cross-link URIs of tree nodes are computed against.
    #[default = ""]
    pub base_uri: String,

    /// Format of the supplied test result files.
    #[default(TestResultsFormat::NUnit)]
    pub test_results_format: TestResultsFormat,

    /// Semicolon-separated list of result files, each entry possibly a glob.
    ///
    /// `None` means no results were supplied at all.
    pub test_results_files: Option<String>,

    /// Tags whose scenarios are removed from the tree at build time.
    pub exclude_tags: Vec<String>,

    /// Tags whose scenarios are only annotated as hidden.
    pub hide_tags: Vec<String>,

    /// Reaction to malformed feature files.
    pub error_handling: ErrorHandling,

    /// Whether outline aggregation escalates `Inconclusive` to `Failed`.
    pub treat_inconclusive_as_failed: bool,
}

impl Config {
    /// Creates a [`Config`] rooted at the given feature directory.
    #[must_use]
    pub fn new(feature_directory: impl Into<PathBuf>) -> Self {
        Self { feature_directory: feature_directory.into(), ..Self::default() }
    }

    /// Sets the base URI for cross-link computation.
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = uri.into();
        self
    }

    /// Sets the test results format.
    #[must_use]
    pub fn results_format(mut self, format: TestResultsFormat) -> Self {
        self.test_results_format = format;
        self
    }

    /// Sets the semicolon-separated result file list.
    #[must_use]
    pub fn results_files(mut self, files: impl Into<String>) -> Self {
        self.test_results_files = Some(files.into());
        self
    }

    /// Sets exclude-tags from a semicolon-separated list.
    #[must_use]
    pub fn exclude_tags(mut self, tags: &str) -> Self {
        self.exclude_tags = split_tags(tags);
        self
    }

    /// Sets hide-tags from a semicolon-separated list.
    #[must_use]
    pub fn hide_tags(mut self, tags: &str) -> Self {
        self.hide_tags = split_tags(tags);
        self
    }

    /// Sets the reaction to malformed feature files.
    #[must_use]
    pub fn error_handling(mut self, handling: ErrorHandling) -> Self {
        self.error_handling = handling;
        self
    }

    /// Makes outline aggregation escalate `Inconclusive` to `Failed`.
    #[must_use]
    pub fn treat_inconclusive_as_failed(mut self, treat: bool) -> Self {
        self.treat_inconclusive_as_failed = treat;
        self
    }
}

/// Splits a semicolon-separated tag list, dropping empties and any leading
/// `@`.
fn split_tags(tags: &str) -> Vec<String> {
    tags.split(';')
        .map(|t| t.trim().trim_start_matches('@'))
        .filter(|t| !t.is_empty())
        .map(Into::into)
        .collect()
}
