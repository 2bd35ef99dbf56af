// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Normalized, immutable index of [`TestCaseRecord`]s plus the correlation
//! facade renderers query.

use std::{
    collections::HashSet,
    fmt,
    path::Path,
    sync::{Mutex, PoisonError},
};

use linked_hash_map::LinkedHashMap;
use tracing::debug;

use crate::{
    config::Config,
    model::{FeatureElement, Scenario, ScenarioOutline},
    results::{
        identity_key,
        loader::{self, TestResultsFormat},
        matcher::ExampleMatcher,
        Outcome, ResultFileLoadError, TestCaseRecord,
    },
};

/// Immutable index of loaded [`TestCaseRecord`]s, and the correlation facade
/// over it.
///
/// Built once before any rendering; afterwards the only mutable state is the
/// session-scoped set of consumed record indices, guarded by a [`Mutex`] so
/// renderers reading concurrently stay safe while example binding is
/// serialized.
pub struct ResultStore {
    /// All loaded records, in file/declaration order.
    records: Vec<TestCaseRecord>,

    /// Normalized scenario identity → indices into [`ResultStore::records`].
    index: LinkedHashMap<String, Vec<usize>>,

    /// Record indices already bound to an example row this session.
    consumed: Mutex<HashSet<usize>>,

    /// The active per-format example matcher.
    matcher: Box<dyn ExampleMatcher + Send + Sync>,

    /// Whether outline aggregation escalates `Inconclusive` to `Failed`.
    treat_inconclusive_as_failed: bool,
}

impl fmt::Debug for ResultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultStore")
            .field("records", &self.records.len())
            .field("identities", &self.index.len())
            .finish_non_exhaustive()
    }
}

impl ResultStore {
    /// Loads a [`ResultStore`] according to the given [`Config`].
    ///
    /// Result files are expanded from the configured semicolon/glob list
    /// relative to the current directory; entries matching nothing are
    /// dropped without error. An unset file list yields an empty store with
    /// [`ResultStore::has_test_results()`] being `false`.
    ///
    /// # Errors
    ///
    /// [`ResultFileLoadError`], if any matched file fails to load. No
    /// partial store is produced.
    pub fn load(config: &Config) -> Result<Self, ResultFileLoadError> {
        let format = config.test_results_format;
        let files = config
            .test_results_files
            .as_deref()
            .map(|list| loader::expand_result_files(list, Path::new(".")))
            .unwrap_or_default();

        let file_loader = format.loader();
        let mut records = Vec::new();
        for file in &files {
            let loaded = file_loader.load(file)?;
            debug!(
                file = %file.display(),
                records = loaded.len(),
                "result file loaded",
            );
            records.extend(loaded);
        }
        Ok(Self::from_records(
            records,
            format.matcher(),
            config.treat_inconclusive_as_failed,
        ))
    }

    /// Creates an empty [`ResultStore`] reporting every query as
    /// [`Outcome::NotProvided`].
    #[must_use]
    pub fn empty() -> Self {
        Self::from_records(
            vec![],
            TestResultsFormat::NUnit.matcher(),
            false,
        )
    }

    /// Builds a [`ResultStore`] from already-normalized loader output.
    ///
    /// Records are indexed by normalized identity in the given order, which
    /// is also the candidate order example binding runs over.
    #[must_use]
    pub fn from_records(
        records: Vec<TestCaseRecord>,
        matcher: Box<dyn ExampleMatcher + Send + Sync>,
        treat_inconclusive_as_failed: bool,
    ) -> Self {
        let mut index: LinkedHashMap<String, Vec<usize>> =
            LinkedHashMap::new();
        for (i, record) in records.iter().enumerate() {
            index.entry(record.id.key()).or_insert_with(Vec::new).push(i);
        }
        Self {
            records,
            index,
            consumed: Mutex::new(HashSet::new()),
            matcher,
            treat_inconclusive_as_failed,
        }
    }

    /// Whether any test records were loaded at all.
    #[must_use]
    pub fn has_test_results(&self) -> bool {
        !self.records.is_empty()
    }

    /// Outcome of a plain (example-less) [`Scenario`].
    ///
    /// The first record under the scenario's qualified identity wins; a
    /// loaded store without a matching record yields
    /// [`Outcome::Inconclusive`].
    #[must_use]
    pub fn scenario_result(
        &self,
        feature_name: &str,
        scenario: &Scenario,
    ) -> Outcome {
        if !self.has_test_results() {
            return Outcome::NotProvided;
        }
        self.candidates(feature_name, &scenario.name)
            .and_then(|indices| indices.first())
            .map_or(Outcome::Inconclusive, |&i| self.records[i].outcome)
    }

    /// Outcome of a single example row of a [`ScenarioOutline`].
    ///
    /// Resolves via the active example matcher against the records under the
    /// outline's identity, skipping records already consumed this session,
    /// in record order. On a match the record is consumed, so a duplicate
    /// value tuple binds the next distinct record on the next call.
    #[must_use]
    pub fn example_result(
        &self,
        feature_name: &str,
        outline: &ScenarioOutline,
        values: &[String],
    ) -> Outcome {
        if !self.has_test_results() {
            return Outcome::NotProvided;
        }
        let mut consumed =
            self.consumed.lock().unwrap_or_else(PoisonError::into_inner);
        self.bind_example(feature_name, outline, values, &mut consumed)
            .map_or(Outcome::Inconclusive, |i| self.records[i].outcome)
    }

    /// Aggregated outcome of a whole [`ScenarioOutline`].
    ///
    /// All example blocks are flattened in declaration order and bound
    /// row-by-row against a transient copy of the session's consumption
    /// state: aggregation observes the same deterministic binding as
    /// row-by-row queries without stealing their records.
    #[must_use]
    pub fn outline_result(
        &self,
        feature_name: &str,
        outline: &ScenarioOutline,
    ) -> Outcome {
        if !self.has_test_results() {
            return Outcome::NotProvided;
        }
        let mut consumed = self
            .consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let outcomes = outline
            .flattened_rows()
            .map(|row| {
                self.bind_example(feature_name, outline, row, &mut consumed)
                    .map_or(Outcome::Inconclusive, |i| self.records[i].outcome)
            })
            .collect::<Vec<_>>();
        self.fold_outcomes(&outcomes)
    }

    /// Outcome of any [`FeatureElement`], dispatching on its variant.
    #[must_use]
    pub fn element_result(
        &self,
        feature_name: &str,
        element: &FeatureElement,
    ) -> Outcome {
        match element {
            FeatureElement::Scenario(sc) => {
                self.scenario_result(feature_name, sc)
            }
            FeatureElement::Outline(outline) => {
                self.outline_result(feature_name, outline)
            }
        }
    }

    /// Finds the first unconsumed record matching the given example row and
    /// marks it consumed.
    fn bind_example(
        &self,
        feature_name: &str,
        outline: &ScenarioOutline,
        values: &[String],
        consumed: &mut HashSet<usize>,
    ) -> Option<usize> {
        let indices = self.candidates(feature_name, &outline.name)?;
        for &i in indices {
            if consumed.contains(&i) {
                continue;
            }
            if self.matcher.is_match(outline, values, &self.records[i]) {
                _ = consumed.insert(i);
                return Some(i);
            }
        }
        None
    }

    /// Record indices under the qualified identity, falling back to records
    /// without feature-level grouping.
    fn candidates(
        &self,
        feature_name: &str,
        scenario_name: &str,
    ) -> Option<&Vec<usize>> {
        self.index
            .get(&identity_key(feature_name, scenario_name))
            .or_else(|| self.index.get(&identity_key("", scenario_name)))
    }

    /// Folds bound example outcomes into an outline-level one.
    ///
    /// Precedence: Failed > Inconclusive > Passed. Zero rows means nothing
    /// was bindable, so Inconclusive.
    fn fold_outcomes(&self, outcomes: &[Outcome]) -> Outcome {
        if outcomes.is_empty() {
            return Outcome::Inconclusive;
        }
        if outcomes.contains(&Outcome::Failed) {
            return Outcome::Failed;
        }
        if outcomes.iter().any(|o| *o != Outcome::Passed) {
            return if self.treat_inconclusive_as_failed {
                Outcome::Failed
            } else {
                Outcome::Inconclusive
            };
        }
        Outcome::Passed
    }

    /// Drops all consumption bookkeeping, starting a fresh binding session
    /// over the same records.
    pub fn reset_session(&self) {
        self.consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
