// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Strategies binding an example row to a [`TestCaseRecord`].

use std::fmt::Write as _;

use itertools::Itertools as _;
use regex::Regex;

use crate::{model::ScenarioOutline, results::TestCaseRecord};

/// Strategy deciding whether one example row corresponds to one
/// [`TestCaseRecord`].
///
/// Implementations never error: an unanswerable question (absent native
/// element, empty row) is simply not a match.
pub trait ExampleMatcher {
    /// Whether the given example row of the `outline` is the one the
    /// `record` was produced by.
    #[must_use]
    fn is_match(
        &self,
        outline: &ScenarioOutline,
        example_values: &[String],
        record: &TestCaseRecord,
    ) -> bool;
}

/// Matcher comparing the example row against the parameter values embedded
/// in the record, as an unordered multiset.
///
/// Used by frameworks that carry explicit parameter values but do not
/// guarantee a stable parameter order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueSetMatcher;

impl ExampleMatcher for ValueSetMatcher {
    fn is_match(
        &self,
        _outline: &ScenarioOutline,
        example_values: &[String],
        record: &TestCaseRecord,
    ) -> bool {
        if example_values.is_empty() {
            return false;
        }
        let mut row = example_values.to_vec();
        let mut embedded = record.parameters.clone();
        row.sort_unstable();
        embedded.sort_unstable();
        row == embedded
    }
}

/// Matcher testing a pattern built from the example row against the display
/// name the source framework generated for the record.
///
/// Every row value is escaped, so it is matched as literal text and never as
/// pattern syntax. Returns no match, never an error, when the record has no
/// native element (e.g. an outline skipped entirely at run time).
#[derive(Clone, Copy, Debug, Default)]
pub struct DisplayNamePatternMatcher {
    /// Whether the framework renders parameter values in double quotes
    /// (`Scenario("12","5")`), constraining what may separate two values.
    quoted: bool,
}

impl DisplayNamePatternMatcher {
    /// Matcher for frameworks quoting parameter values in display names.
    #[must_use]
    pub fn quoted() -> Self {
        Self { quoted: true }
    }

    /// Matcher for frameworks rendering parameter values verbatim.
    #[must_use]
    pub fn verbatim() -> Self {
        Self { quoted: false }
    }

    /// Builds the literal-text pattern for one example row.
    fn pattern(&self, example_values: &[String]) -> String {
        if self.quoted {
            // Values appear as `"v1"` separated by unquoted punctuation, so
            // two adjacent row values may not skip over a third quoted one.
            let mut pattern = String::new();
            for (i, value) in example_values.iter().enumerate() {
                if i > 0 {
                    pattern.push_str("[^\"]*");
                }
                // PANIC: `write!` into a `String` never fails.
                #[allow(clippy::unwrap_used)]
                write!(pattern, "\"?{}\"?", regex::escape(value)).unwrap();
            }
            pattern
        } else {
            example_values.iter().map(|v| regex::escape(v)).join(".*?")
        }
    }
}

impl ExampleMatcher for DisplayNamePatternMatcher {
    fn is_match(
        &self,
        _outline: &ScenarioOutline,
        example_values: &[String],
        record: &TestCaseRecord,
    ) -> bool {
        let Some(native) = &record.native else {
            return false;
        };
        if example_values.is_empty() {
            return false;
        }
        Regex::new(&self.pattern(example_values))
            .map(|re| re.is_match(&native.display_name))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::results::{Outcome, TestCaseId};

    fn outline() -> ScenarioOutline {
        ScenarioOutline {
            name: "outline".into(),
            description: None,
            tags: vec![],
            steps: vec![],
            examples: vec![],
            hidden: false,
        }
    }

    fn record(display_name: &str) -> TestCaseRecord {
        TestCaseRecord::new(
            TestCaseId::new("Feature", "outline"),
            Outcome::Passed,
        )
        .with_display_name(display_name)
    }

    fn values(vals: &[&str]) -> Vec<String> {
        vals.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn value_set_matches_as_multiset() {
        let matcher = ValueSetMatcher;
        let record = TestCaseRecord::new(
            TestCaseId::new("Feature", "outline"),
            Outcome::Passed,
        )
        .with_parameters(values(&["7", "12", "5"]));

        assert!(matcher.is_match(&outline(), &values(&["12", "5", "7"]), &record));
        assert!(!matcher.is_match(&outline(), &values(&["12", "5"]), &record));
        assert!(!matcher.is_match(&outline(), &values(&["12", "5", "8"]), &record));
        assert!(!matcher.is_match(&outline(), &[], &record));
    }

    #[test]
    fn display_name_matches_quoted_values() {
        let matcher = DisplayNamePatternMatcher::quoted();
        let record = record(r#"EatingMany("12","5","7",null)"#);

        assert!(matcher.is_match(&outline(), &values(&["12", "5", "7"]), &record));
        assert!(matcher.is_match(&outline(), &values(&["12"]), &record));
        assert!(!matcher.is_match(&outline(), &values(&["12", "7", "5"]), &record));
        assert!(!matcher.is_match(&outline(), &values(&["120", "5"]), &record));
    }

    #[test]
    fn display_name_does_not_skip_over_quoted_values() {
        let matcher = DisplayNamePatternMatcher::quoted();
        let record = record(r#"Outline("a","b","c")"#);

        assert!(matcher.is_match(&outline(), &values(&["a", "b", "c"]), &record));
        assert!(!matcher.is_match(&outline(), &values(&["a", "c"]), &record));
    }

    #[test]
    fn display_name_matches_parameter_name_separators() {
        let matcher = DisplayNamePatternMatcher::quoted();
        let record =
            record(r#"Eating.Many(start: "12", eat: "5", left: "7")"#);

        assert!(matcher.is_match(&outline(), &values(&["12", "5", "7"]), &record));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let matcher = DisplayNamePatternMatcher::quoted();

        for special in
            ["**", "++", ".*", "[]", "{}", "()", r"^.*(?<foo>BAR)\s[^0-9]{3,4}A+$"]
        {
            let rec = record(&format!(r#"Outline("{special}")"#));
            assert!(
                matcher.is_match(&outline(), &values(&[special]), &rec),
                "expected literal match for {special}",
            );
        }

        // `.*` as pattern syntax would match anything; as literal text it
        // must not match a record carrying a different value.
        let other = record(r#"Outline("something else")"#);
        assert!(!matcher.is_match(&outline(), &values(&[".*"]), &other));
    }

    #[test]
    fn absent_native_element_is_no_match_not_a_panic() {
        let matcher = DisplayNamePatternMatcher::quoted();
        let rec = TestCaseRecord::new(
            TestCaseId::new("Feature", "outline"),
            Outcome::Inconclusive,
        );

        assert!(!matcher.is_match(&outline(), &values(&["1"]), &rec));
        assert!(!matcher.is_match(&outline(), &[], &rec));
    }

    #[test]
    fn verbatim_matcher_joins_values_in_order() {
        let matcher = DisplayNamePatternMatcher::verbatim();
        let record = record("Eating many: 12 cucumbers, eat 5, left 7");

        assert!(matcher.is_match(&outline(), &values(&["12", "5", "7"]), &record));
        assert!(!matcher.is_match(&outline(), &values(&["7", "12"]), &record));
    }
}
