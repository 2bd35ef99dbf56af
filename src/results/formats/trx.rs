// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of MSTest/VSTest `.trx` reports (`<TestRun>`).

use std::{collections::HashMap, path::Path};

use crate::results::{
    formats::{
        elements_named, expect_root, last_segment, parenthesized_values,
        parse_xml, read_file, strip_feature_suffix, strip_parenthesized,
    },
    loader::ResultLoader,
    Outcome, ResultFileLoadError, TestCaseId, TestCaseRecord,
};

/// Loader of the TRX schema shared by MSTest and VSTest runs.
///
/// Each `UnitTestResult` is joined with its `UnitTest` definition via
/// `testId`; the definition supplies the feature class and the scenario
/// description.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrxLoader;

impl TrxLoader {
    /// Creates a new [`TrxLoader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// `UnitTest` definition data joined onto results.
struct Definition {
    feature: Option<String>,
    scenario: Option<String>,
}

impl ResultLoader for TrxLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let doc = parse_xml(&text, path)?;
        expect_root(&doc, "TestRun", path)?;

        let mut definitions = HashMap::new();
        for unit_test in elements_named(&doc, "UnitTest") {
            let Some(id) = unit_test.attribute("id") else {
                continue;
            };
            let method = unit_test
                .children()
                .find(|c| c.tag_name().name() == "TestMethod");
            let feature = method
                .and_then(|m| m.attribute("className"))
                .map(|class| {
                    let class =
                        class.split(',').next().unwrap_or(class).trim();
                    strip_feature_suffix(last_segment(class)).to_owned()
                });
            let scenario = unit_test
                .children()
                .find(|c| c.tag_name().name() == "Description")
                .and_then(|d| d.text())
                .map(|d| d.trim().to_owned())
                .or_else(|| {
                    method
                        .and_then(|m| m.attribute("name"))
                        .map(|m| strip_parenthesized(m).to_owned())
                });
            _ = definitions.insert(id, Definition { feature, scenario });
        }

        let mut records = Vec::new();
        for result in elements_named(&doc, "UnitTestResult") {
            let test_name = result.attribute("testName").unwrap_or_default();
            let outcome = outcome_of(result.attribute("outcome"), path)?;

            let definition = result
                .attribute("testId")
                .and_then(|id| definitions.get(id));
            let feature = definition
                .and_then(|d| d.feature.clone())
                .unwrap_or_default();
            let scenario = definition
                .and_then(|d| d.scenario.clone())
                .unwrap_or_else(|| {
                    strip_parenthesized(test_name).to_owned()
                });

            records.push(
                TestCaseRecord::new(
                    TestCaseId::new(feature, scenario),
                    outcome,
                )
                .with_display_name(test_name)
                .with_parameters(parenthesized_values(test_name)),
            );
        }
        Ok(records)
    }
}

/// Maps a TRX `outcome` attribute onto an [`Outcome`].
///
/// An absent attribute means the run never got to the test, which is the
/// not-executed state.
fn outcome_of(
    outcome: Option<&str>,
    path: &Path,
) -> Result<Outcome, ResultFileLoadError> {
    match outcome {
        Some("Passed" | "Completed" | "PassedButRunAborted") => {
            Ok(Outcome::Passed)
        }
        Some("Failed" | "Error" | "Timeout" | "Aborted") => {
            Ok(Outcome::Failed)
        }
        Some(
            "Inconclusive" | "NotExecuted" | "NotRunnable" | "Disconnected"
            | "Warning" | "Pending" | "InProgress",
        )
        | None => Ok(Outcome::Inconclusive),
        Some(other) => Err(ResultFileLoadError::UnknownOutcome {
            path: path.to_owned(),
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<TestRun id="aa0" xmlns="http://microsoft.com/schemas/VisualStudio/TeamTest/2010">
  <Results>
    <UnitTestResult testId="id-1" testName="EatingOne" outcome="Passed" />
    <UnitTestResult testId="id-2" testName="EatingMany (12,5,7)" outcome="Failed" />
    <UnitTestResult testId="id-3" testName="IgnoredOne" outcome="NotExecuted" />
  </Results>
  <TestDefinitions>
    <UnitTest name="EatingOne" id="id-1">
      <Description>Eating one</Description>
      <TestMethod className="Example.EatingCucumbersFeature, Example" name="EatingOne" />
    </UnitTest>
    <UnitTest name="EatingMany" id="id-2">
      <Description>Eating many</Description>
      <TestMethod className="Example.EatingCucumbersFeature, Example" name="EatingMany" />
    </UnitTest>
    <UnitTest name="IgnoredOne" id="id-3">
      <TestMethod className="Example.EatingCucumbersFeature, Example" name="IgnoredOne" />
    </UnitTest>
  </TestDefinitions>
</TestRun>
"#;

    #[test]
    fn joins_results_with_definitions() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.trx");
        fs::write(&file, REPORT).unwrap();

        let records = TrxLoader::new().load(&file).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].id,
            TestCaseId::new("EatingCucumbers", "Eating one"),
        );
        assert_eq!(records[0].outcome, Outcome::Passed);

        assert_eq!(records[1].outcome, Outcome::Failed);
        assert_eq!(records[1].parameters, ["12", "5", "7"]);

        // `NotExecuted` is the ignored state.
        assert_eq!(records[2].outcome, Outcome::Inconclusive);
        assert_eq!(records[2].id.scenario, "IgnoredOne");
    }

    #[test]
    fn unknown_outcome_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.trx");
        fs::write(
            &file,
            r#"<TestRun><Results>
  <UnitTestResult testName="X" outcome="Melted" />
</Results></TestRun>"#,
        )
        .unwrap();

        assert!(matches!(
            TrxLoader::new().load(&file).unwrap_err(),
            ResultFileLoadError::UnknownOutcome { value, .. } if value == "Melted",
        ));
    }
}
