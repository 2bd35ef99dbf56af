// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of NUnit 3 XML reports (`<test-run>`).

use std::path::Path;

use crate::results::{
    formats::{
        elements_named, expect_root, last_segment, parenthesized_values,
        parse_xml, read_file, strip_feature_suffix, strip_parenthesized,
    },
    loader::ResultLoader,
    Outcome, ResultFileLoadError, TestCaseId, TestCaseRecord,
};

/// Loader of NUnit 3 XML reports.
///
/// Titles come from the `Description` properties attached to fixtures and
/// test cases, falling back to generated class and method names.
#[derive(Clone, Copy, Debug, Default)]
pub struct NUnit3Loader;

impl NUnit3Loader {
    /// Creates a new [`NUnit3Loader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResultLoader for NUnit3Loader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let doc = parse_xml(&text, path)?;
        expect_root(&doc, "test-run", path)?;

        let mut records = Vec::new();
        for case in elements_named(&doc, "test-case") {
            let name = case.attribute("name").unwrap_or_default();
            let outcome = outcome_of(&case, path)?;

            let feature = case
                .ancestors()
                .filter(|a| a.tag_name().name() == "test-suite")
                .find_map(|a| description_property(&a).map(str::to_owned))
                .or_else(|| {
                    case.attribute("classname").map(|c| {
                        strip_feature_suffix(last_segment(c)).to_owned()
                    })
                })
                .unwrap_or_default();
            let scenario = description_property(&case)
                .map(str::to_owned)
                .or_else(|| {
                    case.attribute("methodname")
                        .map(|m| strip_parenthesized(m).to_owned())
                })
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

/// The `Description` property value of a suite or case, if present.
fn description_property<'a>(
    node: &roxmltree::Node<'a, '_>,
) -> Option<&'a str> {
    node.children()
        .find(|c| c.tag_name().name() == "properties")?
        .children()
        .find(|p| {
            p.tag_name().name() == "property"
                && p.attribute("name") == Some("Description")
        })?
        .attribute("value")
}

/// Maps one `test-case` element onto an [`Outcome`].
///
/// An `Ignored` label or run state always wins over the `result` attribute.
fn outcome_of(
    case: &roxmltree::Node<'_, '_>,
    path: &Path,
) -> Result<Outcome, ResultFileLoadError> {
    let ignored = case.attribute("label") == Some("Ignored")
        || matches!(
            case.attribute("runstate"),
            Some("Ignored" | "Skipped" | "NotRunnable"),
        );
    if ignored {
        return Ok(Outcome::Inconclusive);
    }
    match case.attribute("result") {
        Some("Passed") => Ok(Outcome::Passed),
        Some("Failed") => Ok(Outcome::Failed),
        Some("Skipped" | "Inconclusive" | "Warning") => {
            Ok(Outcome::Inconclusive)
        }
        Some(other) => Err(ResultFileLoadError::UnknownOutcome {
            path: path.to_owned(),
            value: other.to_owned(),
        }),
        None => Err(ResultFileLoadError::UnknownOutcome {
            path: path.to_owned(),
            value: "(missing)".into(),
        }),
    }
}
