// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of [Cucumber JSON format][1] reports.
//!
//! A feature element's outcome is folded from its step results: any failed
//! step fails the element, any skipped/pending/undefined step leaves it
//! inconclusive, and only all-passed steps pass it.
//!
//! [1]: https://github.com/cucumber/cucumber-json-schema

use std::path::Path;

use serde::Deserialize;

use crate::results::{
    formats::read_file, loader::ResultLoader, Outcome, ResultFileLoadError,
    TestCaseId, TestCaseRecord,
};

/// Loader of Cucumber JSON reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct CucumberJsonLoader;

impl CucumberJsonLoader {
    /// Creates a new [`CucumberJsonLoader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// One serialized feature of the report.
#[derive(Debug, Deserialize)]
struct JsonFeature {
    #[serde(default)]
    name: String,
    #[serde(default)]
    elements: Vec<JsonElement>,
}

/// One serialized scenario or background of a [`JsonFeature`].
#[derive(Debug, Deserialize)]
struct JsonElement {
    #[serde(default, rename = "type")]
    element_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    steps: Vec<JsonStep>,
}

#[derive(Debug, Deserialize)]
struct JsonStep {
    result: Option<JsonStepResult>,
}

#[derive(Debug, Deserialize)]
struct JsonStepResult {
    #[serde(default)]
    status: String,
}

impl ResultLoader for CucumberJsonLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let features: Vec<JsonFeature> = serde_json::from_str(&text)
            .map_err(|e| ResultFileLoadError::Malformed {
                path: path.to_owned(),
                message: e.to_string(),
            })?;

        let mut records = Vec::new();
        for feature in &features {
            for element in &feature.elements {
                if element.element_type == "background" {
                    continue;
                }
                records.push(
                    TestCaseRecord::new(
                        TestCaseId::new(
                            feature.name.clone(),
                            element.name.clone(),
                        ),
                        element_outcome(element, path)?,
                    )
                    .with_display_name(element.name.clone()),
                );
            }
        }
        Ok(records)
    }
}

/// Folds an element's step statuses into one [`Outcome`].
fn element_outcome(
    element: &JsonElement,
    path: &Path,
) -> Result<Outcome, ResultFileLoadError> {
    let mut outcome = Outcome::Passed;
    if element.steps.is_empty() {
        return Ok(Outcome::Inconclusive);
    }
    for step in &element.steps {
        let status = step
            .result
            .as_ref()
            .map(|r| r.status.as_str())
            .unwrap_or_default();
        let step_outcome = match status {
            "passed" => Outcome::Passed,
            "failed" | "ambiguous" => Outcome::Failed,
            "skipped" | "pending" | "undefined" | "" => Outcome::Inconclusive,
            other => {
                return Err(ResultFileLoadError::UnknownOutcome {
                    path: path.to_owned(),
                    value: other.to_owned(),
                });
            }
        };
        outcome = match (outcome, step_outcome) {
            (_, Outcome::Failed) | (Outcome::Failed, _) => Outcome::Failed,
            (_, Outcome::Inconclusive) | (Outcome::Inconclusive, _) => {
                Outcome::Inconclusive
            }
            _ => outcome,
        };
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const REPORT: &str = r#"[
  {
    "keyword": "Feature",
    "name": "Eating cucumbers",
    "elements": [
      {
        "type": "background",
        "name": "",
        "steps": [{"result": {"status": "passed"}}]
      },
      {
        "type": "scenario",
        "name": "Eating one",
        "steps": [
          {"result": {"status": "passed"}},
          {"result": {"status": "passed"}}
        ]
      },
      {
        "type": "scenario",
        "name": "Eating many 12 5 7",
        "steps": [
          {"result": {"status": "passed"}},
          {"result": {"status": "failed"}},
          {"result": {"status": "skipped"}}
        ]
      },
      {
        "type": "scenario",
        "name": "Never ran",
        "steps": [{"result": {"status": "skipped"}}]
      }
    ]
  }
]"#;

    #[test]
    fn folds_step_statuses_per_element() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.json");
        fs::write(&file, REPORT).unwrap();

        let records = CucumberJsonLoader::new().load(&file).unwrap();

        // Backgrounds never yield records.
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].id,
            TestCaseId::new("Eating cucumbers", "Eating one"),
        );
        assert_eq!(records[0].outcome, Outcome::Passed);
        assert_eq!(records[1].outcome, Outcome::Failed);
        assert_eq!(records[2].outcome, Outcome::Inconclusive);
    }

    #[test]
    fn unknown_step_status_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.json");
        fs::write(
            &file,
            r#"[{"name": "F", "elements": [
                {"type": "scenario", "name": "S",
                 "steps": [{"result": {"status": "exploded"}}]}
            ]}]"#,
        )
        .unwrap();

        assert!(matches!(
            CucumberJsonLoader::new().load(&file).unwrap_err(),
            ResultFileLoadError::UnknownOutcome { value, .. } if value == "exploded",
        ));
    }
}
