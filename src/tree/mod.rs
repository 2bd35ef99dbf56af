// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Document tree built from a crawled feature directory.
//!
//! A [`Tree`] is an ordered, depth-first pre-order sequence of [`Node`]s
//! rooted at the scanned directory. It is built once by the
//! [`Crawler`] and read-only afterwards; every renderer consumes the same
//! snapshot for navigation and cross-linking.

pub mod crawler;
pub mod detect;

use std::{
    path::{Path, PathBuf},
    slice,
};

use crate::model;

#[doc(inline)]
pub use self::{
    crawler::{CrawlError, CrawlReport, Crawler},
    detect::{FileKind, RelevantFileDetector},
};

/// Discriminated payload of a [`Node`].
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A directory containing at least one other [`Node`].
    Folder,

    /// A parsed feature file.
    Feature(model::Feature),

    /// Structural markdown content.
    Content(String),

    /// Any other file, copied through untouched.
    Other,
}

impl NodeKind {
    /// Short lowercase label of this [`NodeKind`], for diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Feature(_) => "feature",
            Self::Content(_) => "content",
            Self::Other => "other",
        }
    }
}

/// One entry of the document [`Tree`].
#[derive(Clone, Debug)]
pub struct Node {
    original_location: PathBuf,
    relative_path: String,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn new(
        original_location: PathBuf,
        relative_path: String,
        kind: NodeKind,
    ) -> Self {
        Self { original_location, relative_path, kind }
    }

    /// Filesystem location this [`Node`] was built from.
    #[must_use]
    pub fn original_location(&self) -> &Path {
        &self.original_location
    }

    /// `/`-separated path of this [`Node`] relative to the tree root.
    ///
    /// Unique per [`Tree`]; used for output placement and cross-link URIs.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Payload of this [`Node`].
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Last segment of [`Node::relative_path()`].
    #[must_use]
    pub fn name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Whether this [`Node`] is a [`NodeKind::Folder`].
    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    /// The parsed [`model::Feature`], if this is a feature [`Node`].
    #[must_use]
    pub fn feature(&self) -> Option<&model::Feature> {
        match &self.kind {
            NodeKind::Feature(feature) => Some(feature),
            _ => None,
        }
    }
}

/// Ordered, depth-first-traversable container of [`Node`]s rooted at the
/// scanned directory.
///
/// The root directory itself yields no [`Node`]; relative paths are computed
/// from it. Iteration order is the fixed depth-first pre-order the crawler
/// produced, which downstream rendering relies on.
#[derive(Clone, Debug)]
pub struct Tree {
    root: PathBuf,
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn new(root: PathBuf, nodes: Vec<Node>) -> Self {
        debug_assert!(
            {
                let mut paths: Vec<_> =
                    nodes.iter().map(Node::relative_path).collect();
                paths.sort_unstable();
                paths.windows(2).all(|w| w[0] != w[1])
            },
            "relative paths must be unique per tree",
        );
        Self { root, nodes }
    }

    /// Directory this [`Tree`] was built from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Iterates [`Node`]s in depth-first pre-order.
    pub fn iter(&self) -> slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Number of [`Node`]s in this [`Tree`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether this [`Tree`] holds no [`Node`]s at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a [`Node`] by its exact relative path.
    #[must_use]
    pub fn find(&self, relative_path: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.relative_path == relative_path)
    }
}

impl<'t> IntoIterator for &'t Tree {
    type Item = &'t Node;
    type IntoIter = slice::Iter<'t, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
