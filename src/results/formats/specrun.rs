// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of SpecRun HTML reports.
//!
//! A SpecRun report is an HTML page with its result data embedded as a
//! `var resultsData = {...};` JSON assignment; the loader extracts and
//! deserializes that payload, ignoring the surrounding markup.

use std::path::Path;

use lazy_regex::regex;
use serde::Deserialize;

use crate::results::{
    formats::read_file, loader::ResultLoader, Outcome, ResultFileLoadError,
    TestCaseId, TestCaseRecord,
};

/// Loader of SpecRun HTML reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpecRunLoader;

impl SpecRunLoader {
    /// Creates a new [`SpecRunLoader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Embedded JSON payload of a SpecRun report.
#[derive(Debug, Deserialize)]
struct ResultsData {
    #[serde(default)]
    features: Vec<FeatureData>,
}

#[derive(Debug, Deserialize)]
struct FeatureData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    scenarios: Vec<ScenarioData>,
}

#[derive(Debug, Deserialize)]
struct ScenarioData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    result: String,
    #[serde(default, rename = "testName")]
    test_name: Option<String>,
}

impl ResultLoader for SpecRunLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let marker = regex!(r"var\s+resultsData\s*=")
            .find(&text)
            .ok_or_else(|| ResultFileLoadError::Malformed {
                path: path.to_owned(),
                message: "no `resultsData` payload found".into(),
            })?;

        // `Deserializer` stops after one complete JSON value, so the
        // trailing `;` and the rest of the page never get in the way.
        let payload = text[marker.end()..].trim_start();
        let mut de = serde_json::Deserializer::from_str(payload);
        let data = ResultsData::deserialize(&mut de).map_err(|e| {
            ResultFileLoadError::Malformed {
                path: path.to_owned(),
                message: e.to_string(),
            }
        })?;

        let mut records = Vec::new();
        for feature in &data.features {
            for scenario in &feature.scenarios {
                let display = scenario
                    .test_name
                    .clone()
                    .unwrap_or_else(|| scenario.title.clone());
                records.push(
                    TestCaseRecord::new(
                        TestCaseId::new(
                            feature.title.clone(),
                            scenario.title.clone(),
                        ),
                        outcome_of(&scenario.result, path)?,
                    )
                    .with_display_name(display),
                );
            }
        }
        Ok(records)
    }
}

/// Maps a SpecRun result string onto an [`Outcome`].
fn outcome_of(
    result: &str,
    path: &Path,
) -> Result<Outcome, ResultFileLoadError> {
    match result.to_lowercase().as_str() {
        "passed" => Ok(Outcome::Passed),
        "failed" => Ok(Outcome::Failed),
        "pending" | "skipped" | "ignored" | "inconclusive" | "notexecuted"
        | "" => Ok(Outcome::Inconclusive),
        _ => Err(ResultFileLoadError::UnknownOutcome {
            path: path.to_owned(),
            value: result.to_owned(),
        }),
    }
}
