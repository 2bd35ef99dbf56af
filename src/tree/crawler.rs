// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Directory-to-tree crawler.

use std::{
    cmp::Ordering,
    fs, io,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error, From};
use tracing::{debug, warn};

use crate::{
    config::{Config, ErrorHandling},
    model,
    parser::{FeatureParseError, FeatureParser},
    tree::{
        detect::{FileKind, RelevantFileDetector},
        Node, NodeKind, Tree,
    },
};

/// Result of a finished crawl: the built [`Tree`] plus any parse errors
/// accumulated under [`ErrorHandling::Collect`].
#[derive(Clone, Debug)]
pub struct CrawlReport {
    /// The built document [`Tree`].
    pub tree: Tree,

    /// Parse errors of malformed feature files the crawl continued past.
    ///
    /// Always empty under [`ErrorHandling::Abort`].
    pub errors: Vec<FeatureParseError>,
}

/// Error aborting a crawl.
#[derive(Debug, Display, Error, From)]
pub enum CrawlError {
    /// Filesystem access failed.
    #[display(fmt = "Failed to read {}: {}", "path.display()", source)]
    Io {
        /// Path the access failed on.
        path: PathBuf,

        /// Underlying [`io::Error`].
        source: io::Error,
    },

    /// A feature file failed to parse under [`ErrorHandling::Abort`].
    #[display(fmt = "{}", _0)]
    Parse(FeatureParseError),
}

/// Crawler turning a feature directory into a [`Tree`].
///
/// Traversal is depth-first pre-order; within a directory, entries are
/// sorted by name under one fixed collation (case-insensitive, byte order as
/// tie-break), directories and files interleaved. Downstream renderers rely
/// on this order for tables of contents and default navigation.
#[derive(Debug)]
pub struct Crawler<'c> {
    config: &'c Config,
    parser: FeatureParser,
    detector: RelevantFileDetector,
}

impl<'c> Crawler<'c> {
    /// Creates a [`Crawler`] for the given [`Config`] with the default file
    /// detector.
    #[must_use]
    pub fn new(config: &'c Config) -> Self {
        Self::with_detector(config, RelevantFileDetector::new())
    }

    /// Creates a [`Crawler`] with a custom [`RelevantFileDetector`].
    #[must_use]
    pub fn with_detector(
        config: &'c Config,
        detector: RelevantFileDetector,
    ) -> Self {
        Self { config, parser: FeatureParser::new(), detector }
    }

    /// Crawls the configured feature directory into a [`CrawlReport`].
    ///
    /// # Errors
    ///
    /// - [`CrawlError::Io`], if a directory or content file cannot be read.
    /// - [`CrawlError::Parse`], if a feature file is malformed and the
    ///   [`Config`] says [`ErrorHandling::Abort`].
    pub fn crawl(&self) -> Result<CrawlReport, CrawlError> {
        let root = &self.config.feature_directory;
        let mut errors = Vec::new();
        let nodes = self.visit_dir(root, "", &mut errors)?;
        debug!(
            root = %root.display(),
            nodes = nodes.len(),
            errors = errors.len(),
            "feature tree built",
        );
        Ok(CrawlReport { tree: Tree::new(root.clone(), nodes), errors })
    }

    /// Visits one directory, returning the [`Node`]s of its subtree in
    /// depth-first pre-order.
    fn visit_dir(
        &self,
        dir: &Path,
        relative: &str,
        errors: &mut Vec<FeatureParseError>,
    ) -> Result<Vec<Node>, CrawlError> {
        let io_err = |path: &Path| {
            let path = path.to_owned();
            move |source| CrawlError::Io { path, source }
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let entry = entry.map_err(io_err(dir))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push((name, entry.path()));
        }
        entries.sort_by(|(a, _), (b, _)| collate(a, b));

        let mut nodes = Vec::new();
        for (name, path) in entries {
            let child_relative = if relative.is_empty() {
                name
            } else {
                format!("{relative}/{name}")
            };

            if path.is_dir() {
                let children =
                    self.visit_dir(&path, &child_relative, errors)?;
                if children.is_empty() {
                    debug!(path = %path.display(), "pruning empty folder");
                } else {
                    nodes.push(Node::new(
                        path,
                        child_relative,
                        NodeKind::Folder,
                    ));
                    nodes.extend(children);
                }
                continue;
            }

            match self.detector.classify(&path) {
                FileKind::Feature => match self.parser.parse_file(&path) {
                    Ok(feature) => {
                        if let Some(feature) = self.apply_tag_filters(feature)
                        {
                            nodes.push(Node::new(
                                path,
                                child_relative,
                                NodeKind::Feature(feature),
                            ));
                        } else {
                            debug!(
                                path = %path.display(),
                                "feature removed by exclude-tags",
                            );
                        }
                    }
                    Err(e) => match self.config.error_handling {
                        ErrorHandling::Abort => return Err(e.into()),
                        ErrorHandling::Collect => {
                            warn!(error = %e, "skipping malformed feature");
                            errors.push(e);
                        }
                    },
                },
                FileKind::Content => {
                    let text =
                        fs::read_to_string(&path).map_err(io_err(&path))?;
                    nodes.push(Node::new(
                        path,
                        child_relative,
                        NodeKind::Content(text),
                    ));
                }
                FileKind::Ignored => {
                    debug!(path = %path.display(), "ignoring file");
                }
                FileKind::PassThrough => {
                    nodes.push(Node::new(path, child_relative, NodeKind::Other));
                }
            }
        }
        Ok(nodes)
    }

    /// Applies exclude- and hide-tag filtering to a parsed feature.
    ///
    /// Returns [`None`] when the feature's own tags match an exclude-tag.
    /// Matching elements are removed; the feature node itself survives even
    /// if emptied. Hide-tags only annotate.
    fn apply_tag_filters(
        &self,
        mut feature: model::Feature,
    ) -> Option<model::Feature> {
        let exclude = &self.config.exclude_tags;
        let hide = &self.config.hide_tags;

        if matches_any(&feature.tags, exclude) {
            return None;
        }
        feature.elements.retain(|el| !matches_any(el.tags(), exclude));

        feature.hidden = matches_any(&feature.tags, hide);
        for el in &mut feature.elements {
            let hidden = feature.hidden || matches_any(el.tags(), hide);
            el.set_hidden(hidden);
        }
        Some(feature)
    }
}

/// The fixed sibling collation: case-insensitive name comparison with byte
/// order as tie-break.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Whether any of the `tags` matches any of the `wanted` ones, ignoring case
/// and leading `@`s.
fn matches_any(tags: &[String], wanted: &[String]) -> bool {
    tags.iter().any(|tag| {
        wanted.iter().any(|w| {
            tag.trim_start_matches('@')
                .eq_ignore_ascii_case(w.trim_start_matches('@'))
        })
    })
}
