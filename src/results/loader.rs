// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-format loader selection and result-file expansion.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use derive_more::{Display, Error};
use tracing::debug;

use crate::results::{
    formats::{
        cucumber_json::CucumberJsonLoader,
        nunit::NUnitLoader,
        nunit3::NUnit3Loader,
        specrun::SpecRunLoader,
        trx::TrxLoader,
        xunit::XUnitLoader,
        xunit2::XUnit2Loader,
    },
    matcher::{DisplayNamePatternMatcher, ExampleMatcher, ValueSetMatcher},
    ResultFileLoadError, TestCaseRecord,
};

/// Loader of one fixed test-report wire schema into [`TestCaseRecord`]s.
///
/// One implementation per report format, selected via
/// [`TestResultsFormat::loader()`].
pub trait ResultLoader {
    /// Loads all records from the result file at the given `path`.
    ///
    /// # Errors
    ///
    /// [`ResultFileLoadError`], if the file is unreadable, malformed, or
    /// carries an outcome value with no [`Outcome`] mapping.
    ///
    /// [`Outcome`]: crate::results::Outcome
    fn load(&self, path: &Path)
        -> Result<Vec<TestCaseRecord>, ResultFileLoadError>;
}

/// Supported test-report formats.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TestResultsFormat {
    /// MSTest `.trx` report.
    #[display(fmt = "mstest")]
    MsTest,

    /// NUnit 2 XML report.
    #[display(fmt = "nunit")]
    NUnit,

    /// NUnit 3 XML report.
    #[display(fmt = "nunit3")]
    NUnit3,

    /// xUnit XML report. Legacy alias of [`TestResultsFormat::XUnit1`].
    #[display(fmt = "xunit")]
    XUnit,

    /// xUnit 1 XML report.
    #[display(fmt = "xunit1")]
    XUnit1,

    /// xUnit 2 XML report.
    #[display(fmt = "xunit2")]
    XUnit2,

    /// Cucumber JSON report.
    #[display(fmt = "cucumberjson")]
    CucumberJson,

    /// SpecRun HTML report with its embedded JSON payload.
    #[display(fmt = "specrun")]
    SpecRun,

    /// VSTest `.trx` report.
    #[display(fmt = "vstest")]
    VsTest,
}

impl TestResultsFormat {
    /// The [`ResultLoader`] parsing this format.
    #[must_use]
    pub fn loader(self) -> Box<dyn ResultLoader + Send + Sync> {
        match self {
            Self::MsTest | Self::VsTest => Box::new(TrxLoader::new()),
            Self::NUnit => Box::new(NUnitLoader::new()),
            Self::NUnit3 => Box::new(NUnit3Loader::new()),
            Self::XUnit | Self::XUnit1 => Box::new(XUnitLoader::new()),
            Self::XUnit2 => Box::new(XUnit2Loader::new()),
            Self::CucumberJson => Box::new(CucumberJsonLoader::new()),
            Self::SpecRun => Box::new(SpecRunLoader::new()),
        }
    }

    /// The [`ExampleMatcher`] binding this format's records to example rows.
    ///
    /// TRX-based frameworks carry explicit parameter values without a stable
    /// order, so they match by value set; the rest match by generated
    /// display name.
    #[must_use]
    pub fn matcher(self) -> Box<dyn ExampleMatcher + Send + Sync> {
        match self {
            Self::MsTest | Self::VsTest => Box::new(ValueSetMatcher),
            Self::NUnit | Self::NUnit3 | Self::XUnit | Self::XUnit1
            | Self::XUnit2 => Box::new(DisplayNamePatternMatcher::quoted()),
            Self::CucumberJson | Self::SpecRun => {
                Box::new(DisplayNamePatternMatcher::verbatim())
            }
        }
    }
}

/// Error of parsing a [`TestResultsFormat`] from a string.
#[derive(Clone, Debug, Display, Error)]
#[display(fmt = "Unknown test results format `{}`", _0)]
pub struct UnknownFormatError(#[error(not(source))] pub String);

impl FromStr for TestResultsFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mstest" => Ok(Self::MsTest),
            "nunit" => Ok(Self::NUnit),
            "nunit3" => Ok(Self::NUnit3),
            "xunit" => Ok(Self::XUnit),
            "xunit1" => Ok(Self::XUnit1),
            "xunit2" => Ok(Self::XUnit2),
            "cucumberjson" => Ok(Self::CucumberJson),
            "specrun" => Ok(Self::SpecRun),
            "vstest" => Ok(Self::VsTest),
            other => Err(UnknownFormatError(other.into())),
        }
    }
}

/// Expands a semicolon-separated result-file list into concrete paths.
///
/// Each entry may be a glob pattern; entries matching nothing are silently
/// dropped. Relative entries are resolved against `base_dir`. The returned
/// paths are in entry order, glob matches sorted for determinism.
#[must_use]
pub fn expand_result_files(list: &str, base_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for entry in list.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        if entry.chars().any(|c| matches!(c, '*' | '?' | '[' | '{')) {
            let walker = globwalk::GlobWalkerBuilder::new(base_dir, entry)
                .case_insensitive(true)
                .build();
            let mut matched: Vec<_> = match walker {
                Ok(walker) => walker
                    .filter_map(Result::ok)
                    .map(|e| e.path().to_owned())
                    .collect(),
                Err(_) => vec![],
            };
            if matched.is_empty() {
                debug!(pattern = entry, "result glob matched nothing");
            }
            matched.sort();
            paths.extend(matched);
        } else {
            let path = if Path::new(entry).is_absolute() {
                PathBuf::from(entry)
            } else {
                base_dir.join(entry)
            };
            if path.is_file() {
                paths.push(path);
            } else {
                debug!(path = entry, "result file not found, dropping");
            }
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn format_round_trips_through_from_str() {
        for format in [
            TestResultsFormat::MsTest,
            TestResultsFormat::NUnit,
            TestResultsFormat::NUnit3,
            TestResultsFormat::XUnit,
            TestResultsFormat::XUnit1,
            TestResultsFormat::XUnit2,
            TestResultsFormat::CucumberJson,
            TestResultsFormat::SpecRun,
            TestResultsFormat::VsTest,
        ] {
            assert_eq!(format.to_string().parse::<TestResultsFormat>().ok(), Some(format));
        }
        assert!("junit".parse::<TestResultsFormat>().is_err());
    }

    #[test]
    fn expansion_drops_unmatched_entries_silently() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.xml"), "<x/>").unwrap();
        fs::write(dir.path().join("two.xml"), "<x/>").unwrap();
        fs::write(dir.path().join("other.txt"), "").unwrap();

        let paths =
            expand_result_files("*.xml;missing.xml;no-match-*.xml", dir.path());

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["one.xml", "two.xml"]);
    }

    #[test]
    fn expansion_keeps_entry_order_for_plain_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xml"), "").unwrap();
        fs::write(dir.path().join("a.xml"), "").unwrap();

        let paths = expand_result_files("b.xml;a.xml", dir.path());

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["b.xml", "a.xml"]);
    }
}
