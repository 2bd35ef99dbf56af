// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of NUnit 2 XML reports (`<test-results>`).

use std::path::Path;

use crate::results::{
    formats::{
        elements_named, expect_root, last_segment, parenthesized_values,
        parse_xml, read_file, strip_feature_suffix, strip_parenthesized,
    },
    loader::ResultLoader,
    Outcome, ResultFileLoadError, TestCaseId, TestCaseRecord,
};

/// Loader of NUnit 2 XML reports.
///
/// Feature and scenario titles are taken from the `description` attributes
/// code generators emit on fixtures and test cases, falling back to the
/// generated identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NUnitLoader;

impl NUnitLoader {
    /// Creates a new [`NUnitLoader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResultLoader for NUnitLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let doc = parse_xml(&text, path)?;
        expect_root(&doc, "test-results", path)?;

        let mut records = Vec::new();
        for case in elements_named(&doc, "test-case") {
            let name = case.attribute("name").unwrap_or_default();
            let outcome = outcome_of(&case, path)?;

            let feature = case
                .ancestors()
                .find_map(|a| {
                    (a.tag_name().name() == "test-suite")
                        .then(|| a.attribute("description"))
                        .flatten()
                })
                .map(str::to_owned)
                .or_else(|| {
                    case.ancestors()
                        .find(|a| a.tag_name().name() == "test-suite")
                        .and_then(|a| a.attribute("name"))
                        .map(|n| {
                            strip_feature_suffix(last_segment(n)).to_owned()
                        })
                })
                .unwrap_or_default();
            let scenario = case
                .attribute("description")
                .map(str::to_owned)
                .unwrap_or_else(|| {
                    last_segment(strip_parenthesized(name)).to_owned()
                });

            records.push(
                TestCaseRecord::new(
                    TestCaseId::new(feature, scenario),
                    outcome,
                )
                .with_display_name(name)
                .with_parameters(parenthesized_values(name)),
            );
        }
        Ok(records)
    }
}

/// Maps one `test-case` element onto an [`Outcome`].
///
/// NUnit 2 reports either a `result` attribute or the `executed`/`success`
/// pair; an explicitly ignored case is always `Inconclusive`.
fn outcome_of(
    case: &roxmltree::Node<'_, '_>,
    path: &Path,
) -> Result<Outcome, ResultFileLoadError> {
    if let Some(result) = case.attribute("result") {
        return match result {
            "Success" | "Passed" => Ok(Outcome::Passed),
            "Failure" | "Failed" | "Error" => Ok(Outcome::Failed),
            "Ignored" | "Skipped" | "NotRunnable" | "Inconclusive" => {
                Ok(Outcome::Inconclusive)
            }
            other => Err(ResultFileLoadError::UnknownOutcome {
                path: path.to_owned(),
                value: other.to_owned(),
            }),
        };
    }
    match (case.attribute("executed"), case.attribute("success")) {
        (Some("False"), _) => Ok(Outcome::Inconclusive),
        (_, Some("True")) => Ok(Outcome::Passed),
        (_, Some("False")) => Ok(Outcome::Failed),
        _ => Err(ResultFileLoadError::UnknownOutcome {
            path: path.to_owned(),
            value: "(missing)".into(),
        }),
    }
}
