// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Living documentation core for [Gherkin] feature suites.
//!
//! This crate turns a directory of `.feature` files into an ordered,
//! cross-linkable document [`Tree`], and correlates test reports from
//! heterogeneous frameworks with the scenarios and scenario-outline
//! examples those features declare:
//!
//! - [`tree::Crawler`] walks the feature directory into a [`Tree`] of
//!   [`Node`]s in a fixed depth-first order every renderer can rely on;
//! - [`ResultStore`] loads one of the supported [`TestResultsFormat`]s and
//!   answers scenario-, outline- and example-level [`Outcome`] queries with
//!   deterministic tie-breaking for duplicate example rows.
//!
//! Both are built once per run and shared read-only with every downstream
//! consumer; rendering itself is out of scope here.
//!
//! ```no_run
//! use livingdoc::{Config, ResultStore, TestResultsFormat, tree::Crawler};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new("docs/features")
//!     .results_format(TestResultsFormat::NUnit3)
//!     .results_files("TestResults/*.xml")
//!     .exclude_tags("wip");
//!
//! let report = Crawler::new(&config).crawl()?;
//! let results = ResultStore::load(&config)?;
//!
//! for node in &report.tree {
//!     if let Some(feature) = node.feature() {
//!         for element in &feature.elements {
//!             let outcome = results.element_result(&feature.name, element);
//!             println!("{}: {outcome}", element.name());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod config;
pub mod model;
pub mod parser;
pub mod results;
pub mod tree;
pub mod uri;

pub use self::{
    config::{Config, ErrorHandling},
    parser::{FeatureParseError, FeatureParser},
    results::{
        Outcome, ResultFileLoadError, ResultStore, TestCaseRecord,
        TestResultsFormat,
    },
    tree::{CrawlError, CrawlReport, Crawler, Node, NodeKind, Tree},
};
