// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of xUnit 1 XML reports (`<assembly>`).

use std::path::Path;

use crate::results::{
    formats::{
        elements_named, expect_root, last_segment, parenthesized_values,
        parse_xml, read_file, strip_feature_suffix, strip_parenthesized,
        trait_value,
    },
    loader::ResultLoader,
    Outcome, ResultFileLoadError, TestCaseId, TestCaseRecord,
};

/// Loader of xUnit 1 XML reports.
///
/// Feature and scenario titles come from the `FeatureTitle` and
/// `Description` traits code generators attach to each test, falling back
/// to the test's type and method names.
#[derive(Clone, Copy, Debug, Default)]
pub struct XUnitLoader;

impl XUnitLoader {
    /// Creates a new [`XUnitLoader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResultLoader for XUnitLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let doc = parse_xml(&text, path)?;
        expect_root(&doc, "assembly", path)?;
        load_tests(&doc, path)
    }
}

/// Shared `<test>` element extraction for both xUnit schema generations.
pub(crate) fn load_tests(
    doc: &roxmltree::Document<'_>,
    path: &Path,
) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
    let mut records = Vec::new();
    for test in elements_named(doc, "test") {
        let name = test.attribute("name").unwrap_or_default();
        let outcome = match test.attribute("result") {
            Some("Pass") => Outcome::Passed,
            Some("Fail") => Outcome::Failed,
            Some("Skip" | "NotRun") => Outcome::Inconclusive,
            Some(other) => {
                return Err(ResultFileLoadError::UnknownOutcome {
                    path: path.to_owned(),
                    value: other.to_owned(),
                });
            }
            None => {
                return Err(ResultFileLoadError::UnknownOutcome {
                    path: path.to_owned(),
                    value: "(missing)".into(),
                });
            }
        };

        let feature = trait_value(&test, "FeatureTitle")
            .map(str::to_owned)
            .or_else(|| {
                test.attribute("type").map(|t| {
                    strip_feature_suffix(last_segment(t)).to_owned()
                })
            })
            .unwrap_or_default();
        let scenario = trait_value(&test, "Description")
            .map(str::to_owned)
            .or_else(|| {
                test.attribute("method")
                    .map(|m| strip_parenthesized(m).to_owned())
            })
            .unwrap_or_else(|| {
                last_segment(strip_parenthesized(name)).to_owned()
            });

        records.push(
            TestCaseRecord::new(TestCaseId::new(feature, scenario), outcome)
                .with_display_name(name)
                .with_parameters(parenthesized_values(name)),
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<assembly name="Example.dll" total="2" passed="1" failed="1">
  <class name="Example.EatingCucumbersFeature">
    <test name="Example.EatingCucumbersFeature.EatingOne"
          type="Example.EatingCucumbersFeature" method="EatingOne"
          result="Pass">
      <traits>
        <trait name="FeatureTitle" value="Eating cucumbers" />
        <trait name="Description" value="Eating one" />
      </traits>
    </test>
    <test name="Example.EatingCucumbersFeature.EatingMany(start: &quot;12&quot;, eat: &quot;5&quot;, left: &quot;7&quot;)"
          type="Example.EatingCucumbersFeature" method="EatingMany"
          result="Fail">
      <traits>
        <trait name="FeatureTitle" value="Eating cucumbers" />
        <trait name="Description" value="Eating many" />
      </traits>
    </test>
  </class>
</assembly>
"#;

    #[test]
    fn loads_records_from_traits() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.xml");
        fs::write(&file, REPORT).unwrap();

        let records = XUnitLoader::new().load(&file).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].id,
            TestCaseId::new("Eating cucumbers", "Eating one"),
        );
        assert_eq!(records[0].outcome, Outcome::Passed);
        assert_eq!(records[1].outcome, Outcome::Failed);
        assert_eq!(records[1].parameters, ["start: 12", "eat: 5", "left: 7"]);
    }

    #[test]
    fn falls_back_to_type_and_method_names() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.xml");
        fs::write(
            &file,
            r#"<assembly>
  <test name="Ns.SomeFeature.DoThing" type="Ns.SomeFeature"
        method="DoThing" result="Skip" />
</assembly>"#,
        )
        .unwrap();

        let records = XUnitLoader::new().load(&file).unwrap();

        assert_eq!(records[0].id, TestCaseId::new("Some", "DoThing"));
        assert_eq!(records[0].outcome, Outcome::Inconclusive);
    }
}
