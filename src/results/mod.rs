// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Test-result correlation: loading foreign report formats, binding their
//! records to scenarios and scenario-outline examples, and aggregating
//! per-example outcomes.

pub mod formats;
pub mod loader;
pub mod matcher;
pub mod store;

use std::{io, path::PathBuf};

use derive_more::{Display, Error};

#[doc(inline)]
pub use self::{
    loader::{ResultLoader, TestResultsFormat},
    matcher::{DisplayNamePatternMatcher, ExampleMatcher, ValueSetMatcher},
    store::ResultStore,
};

/// Outcome of one executed (or not executed) test case.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Outcome {
    /// The test case ran and passed.
    #[display(fmt = "Passed")]
    Passed,

    /// The test case ran and failed.
    #[display(fmt = "Failed")]
    Failed,

    /// The test case was not (successfully) executed: skipped, ignored,
    /// inconclusive, or simply absent from the supplied results.
    #[display(fmt = "Inconclusive")]
    Inconclusive,

    /// No test results were supplied at all.
    #[display(fmt = "NotProvided")]
    NotProvided,
}

impl Outcome {
    /// Whether this [`Outcome`] represents an actual executed verdict.
    #[must_use]
    pub fn is_conclusive(self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }
}

/// Qualified identity of a test case: the feature it belongs to plus the
/// scenario (or scenario outline) it instantiates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestCaseId {
    /// Name of the containing feature, as the source framework reported it.
    ///
    /// May be empty when the format carries no feature-level grouping.
    pub feature: String,

    /// Name of the scenario or scenario outline.
    pub scenario: String,
}

impl TestCaseId {
    /// Creates a [`TestCaseId`] from the given feature and scenario names.
    #[must_use]
    pub fn new(
        feature: impl Into<String>,
        scenario: impl Into<String>,
    ) -> Self {
        Self { feature: feature.into(), scenario: scenario.into() }
    }

    /// Normalized index key of this identity.
    #[must_use]
    pub(crate) fn key(&self) -> String {
        identity_key(&self.feature, &self.scenario)
    }
}

/// Builds the normalized index key for a feature/scenario name pair.
pub(crate) fn identity_key(feature: &str, scenario: &str) -> String {
    format!("{}::{}", normalize_identity(feature), normalize_identity(scenario))
}

/// Normalizes a feature or scenario name for identity comparison: lowercase,
/// alphanumerics only.
///
/// Bridges the gap between a Gherkin title (`Adding two numbers`) and the
/// identifier a framework generates from it (`AddingTwoNumbers`).
pub(crate) fn normalize_identity(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Framework-specific handle of a test record, kept for example re-matching.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NativeElement {
    /// Display name the source framework generated for this test case.
    pub display_name: String,
}

/// Normalized record of one executed test case from a foreign report format.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCaseRecord {
    /// Qualified identity of this record.
    pub id: TestCaseId,

    /// Parameter values embedded in the record, if the format carries them.
    ///
    /// Ordered or unordered depending on the framework; the value-set
    /// matcher compares them as a multiset.
    pub parameters: Vec<String>,

    /// Outcome of this record.
    ///
    /// Records the source framework marked ignored or skipped are
    /// normalized to [`Outcome::Inconclusive`] at load time.
    pub outcome: Outcome,

    /// Native handle for framework-specific re-matching, if available.
    pub native: Option<NativeElement>,
}

impl TestCaseRecord {
    /// Creates a [`TestCaseRecord`] without parameters or a native handle.
    #[must_use]
    pub fn new(id: TestCaseId, outcome: Outcome) -> Self {
        Self { id, parameters: vec![], outcome, native: None }
    }

    /// Attaches the framework-generated display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.native = Some(NativeElement { display_name: name.into() });
        self
    }

    /// Attaches embedded parameter values.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Error of loading a test result file.
///
/// Always fatal: no partial [`ResultStore`] is ever produced.
#[derive(Debug, Display, Error)]
pub enum ResultFileLoadError {
    /// The file could not be read.
    #[display(fmt = "Failed to read result file {}: {}", "path.display()", source)]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,

        /// Underlying [`io::Error`].
        source: io::Error,
    },

    /// The file does not conform to the expected wire schema.
    #[display(
        fmt = "Malformed result file {}: {}",
        "path.display()",
        message
    )]
    Malformed {
        /// Path of the offending file.
        path: PathBuf,

        /// What was wrong with it.
        message: String,
    },

    /// A native outcome value has no mapping to [`Outcome`].
    ///
    /// Silent defaulting would corrupt aggregated status, so this is fatal.
    #[display(
        fmt = "Unknown test outcome `{}` in result file {}",
        value,
        "path.display()"
    )]
    UnknownOutcome {
        /// Path of the offending file.
        path: PathBuf,

        /// The unmapped native outcome value.
        value: String,
    },
}
