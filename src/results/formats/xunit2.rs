// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loader of xUnit 2 XML reports (`<assemblies>`).

use std::path::Path;

use crate::results::{
    formats::{expect_root, parse_xml, read_file, xunit::load_tests},
    loader::ResultLoader,
    ResultFileLoadError, TestCaseRecord,
};

/// Loader of xUnit 2 XML reports.
///
/// The per-test schema is the same as xUnit 1's, wrapped in an
/// `<assemblies>` envelope with `<collection>` groupings; the `NotRun`
/// result value is additionally possible.
#[derive(Clone, Copy, Debug, Default)]
pub struct XUnit2Loader;

impl XUnit2Loader {
    /// Creates a new [`XUnit2Loader`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResultLoader for XUnit2Loader {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseRecord>, ResultFileLoadError> {
        let text = read_file(path)?;
        let doc = parse_xml(&text, path)?;
        expect_root(&doc, "assemblies", path)?;
        load_tests(&doc, path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    use crate::results::{Outcome, TestCaseId};

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<assemblies timestamp="01/01/2024 10:00:00">
  <assembly name="Example.dll" total="2">
    <collection name="Test collection for Example.EatingCucumbersFeature">
      <test name="Example.EatingCucumbersFeature.EatingMany(start: &quot;12&quot;, eat: &quot;5&quot;, left: &quot;7&quot;)"
            type="Example.EatingCucumbersFeature" method="EatingMany"
            result="Pass">
        <traits>
          <trait name="FeatureTitle" value="Eating cucumbers" />
          <trait name="Description" value="Eating many" />
        </traits>
      </test>
      <test name="Example.EatingCucumbersFeature.NotRunOne"
            type="Example.EatingCucumbersFeature" method="NotRunOne"
            result="NotRun">
        <traits>
          <trait name="FeatureTitle" value="Eating cucumbers" />
          <trait name="Description" value="Not run one" />
        </traits>
      </test>
    </collection>
  </assembly>
</assemblies>
"#;

    #[test]
    fn loads_records_including_not_run_ones() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.xml");
        fs::write(&file, REPORT).unwrap();

        let records = XUnit2Loader::new().load(&file).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].id,
            TestCaseId::new("Eating cucumbers", "Eating many"),
        );
        assert_eq!(records[0].outcome, Outcome::Passed);
        assert_eq!(records[1].outcome, Outcome::Inconclusive);
    }

    #[test]
    fn xunit1_report_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.xml");
        fs::write(&file, "<assembly/>").unwrap();

        assert!(matches!(
            XUnit2Loader::new().load(&file).unwrap_err(),
            ResultFileLoadError::Malformed { .. },
        ));
    }
}
