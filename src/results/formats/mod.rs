// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loaders of the supported test-report wire schemas.
//!
//! Each submodule normalizes one fixed external format into
//! [`TestCaseRecord`]s; the schemas themselves are external contracts and
//! are not redesigned here.
//!
//! [`TestCaseRecord`]: crate::results::TestCaseRecord

pub mod cucumber_json;
pub mod nunit;
pub mod nunit3;
pub mod specrun;
pub mod trx;
pub mod xunit;
pub mod xunit2;

use std::{fs, path::Path};

use crate::results::ResultFileLoadError;

/// Reads a result file into memory.
pub(crate) fn read_file(path: &Path) -> Result<String, ResultFileLoadError> {
    fs::read_to_string(path).map_err(|source| ResultFileLoadError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Parses a result file's text as XML.
pub(crate) fn parse_xml<'i>(
    text: &'i str,
    path: &Path,
) -> Result<roxmltree::Document<'i>, ResultFileLoadError> {
    roxmltree::Document::parse(text).map_err(|e| {
        ResultFileLoadError::Malformed {
            path: path.to_owned(),
            message: e.to_string(),
        }
    })
}

/// Checks the document's root element, rejecting files of another format.
pub(crate) fn expect_root(
    doc: &roxmltree::Document<'_>,
    expected: &str,
    path: &Path,
) -> Result<(), ResultFileLoadError> {
    let root = doc.root_element().tag_name().name().to_owned();
    if root == expected {
        Ok(())
    } else {
        Err(ResultFileLoadError::Malformed {
            path: path.to_owned(),
            message: format!("expected <{expected}> root, found <{root}>"),
        })
    }
}

/// All elements of the document with the given local name, in document
/// order, regardless of namespace.
pub(crate) fn elements_named<'a, 'i>(
    doc: &'a roxmltree::Document<'i>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'i>> + 'a {
    doc.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Strips a trailing parenthesized argument list from a generated test name.
pub(crate) fn strip_parenthesized(name: &str) -> &str {
    name.find('(').map_or(name, |i| &name[..i]).trim_end()
}

/// Extracts the values of a trailing parenthesized argument list, dropping
/// surrounding quotes and `null` placeholder arguments.
pub(crate) fn parenthesized_values(name: &str) -> Vec<String> {
    let Some(open) = name.find('(') else {
        return vec![];
    };
    let Some(inner) = name[open + 1..].strip_suffix(')') else {
        return vec![];
    };

    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in inner.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !inner.is_empty() {
        values.push(current);
    }

    values
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && v.as_str() != "null")
        .collect()
}

/// The value of an xUnit `trait` child with the given name, if present.
pub(crate) fn trait_value<'a>(
    test: &roxmltree::Node<'a, '_>,
    name: &str,
) -> Option<&'a str> {
    test.children()
        .find(|c| c.tag_name().name() == "traits")?
        .children()
        .find(|t| {
            t.tag_name().name() == "trait" && t.attribute("name") == Some(name)
        })?
        .attribute("value")
}

/// Last `.`-separated segment of a qualified name.
pub(crate) fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Strips the `Feature` suffix code generators append to feature classes.
pub(crate) fn strip_feature_suffix(name: &str) -> &str {
    name.strip_suffix("Feature").filter(|s| !s.is_empty()).unwrap_or(name)
}
