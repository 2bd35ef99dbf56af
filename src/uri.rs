// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Cross-link URI computation over tree nodes.
//!
//! All helpers operate on the `/`-separated relative paths of [`Node`]s, so
//! the produced URIs are platform-neutral regardless of where the tree was
//! crawled.

use itertools::Itertools as _;

use crate::tree::Node;

/// Normalizes a base URI to end with exactly one `/`.
#[must_use]
pub fn folder_uri(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("{trimmed}/")
    }
}

/// Absolute URI of a [`Node`] under the given base URI.
///
/// Folder URIs always carry a trailing `/`.
#[must_use]
pub fn node_uri(base: &str, node: &Node) -> String {
    let base = folder_uri(base);
    if node.is_folder() {
        format!("{base}{}/", node.relative_path())
    } else {
        format!("{base}{}", node.relative_path())
    }
}

/// Relative URI leading from one [`Node`] to another within the same tree.
///
/// A node links to itself as `#`; a file links to its own directory as `./`.
#[must_use]
pub fn relative_uri(from: &Node, to: &Node) -> String {
    if from.relative_path() == to.relative_path() {
        return "#".to_owned();
    }

    // Links originate from the directory the node lives in (for folders,
    // the folder itself).
    let from_dir: Vec<&str> = if from.is_folder() {
        from.relative_path().split('/').collect()
    } else {
        let mut segments: Vec<_> = from.relative_path().split('/').collect();
        _ = segments.pop();
        segments.retain(|s| !s.is_empty());
        segments
    };
    let target: Vec<&str> = to.relative_path().split('/').collect();

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = "../".repeat(from_dir.len() - common);
    let down = target[common..].iter().join("/");

    let mut uri = ups;
    if !down.is_empty() {
        uri.push_str(&down);
        if to.is_folder() {
            uri.push('/');
        }
    }
    if uri.is_empty() {
        uri = "./".to_owned();
    }
    uri
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    use crate::tree::NodeKind;

    fn file(relative: &str) -> Node {
        Node::new(PathBuf::from(relative), relative.to_owned(), NodeKind::Other)
    }

    fn folder(relative: &str) -> Node {
        Node::new(
            PathBuf::from(relative),
            relative.to_owned(),
            NodeKind::Folder,
        )
    }

    #[test]
    fn folder_uris_end_with_a_slash() {
        assert_eq!(folder_uri("http://example.com/docs"), "http://example.com/docs/");
        assert_eq!(folder_uri("http://example.com/docs/"), "http://example.com/docs/");
        assert_eq!(folder_uri(""), "/");
    }

    #[test]
    fn node_uris_join_base_and_relative_path() {
        assert_eq!(
            node_uri("http://example.com/docs", &file("b/b1.feature")),
            "http://example.com/docs/b/b1.feature",
        );
        assert_eq!(
            node_uri("http://example.com/docs", &folder("b")),
            "http://example.com/docs/b/",
        );
    }

    #[test]
    fn sibling_files_link_by_file_name() {
        assert_eq!(
            relative_uri(&file("b/b1.feature"), &file("b/b2.feature")),
            "b2.feature",
        );
    }

    #[test]
    fn file_links_to_its_own_folder_as_current_directory() {
        assert_eq!(relative_uri(&file("b/b1.feature"), &folder("b")), "./");
    }

    #[test]
    fn links_climb_out_of_subfolders() {
        assert_eq!(
            relative_uri(&file("b/b1.feature"), &file("a.feature")),
            "../a.feature",
        );
        assert_eq!(
            relative_uri(&file("a.feature"), &file("b/b1.feature")),
            "b/b1.feature",
        );
        assert_eq!(relative_uri(&folder("b"), &folder("b/c")), "c/");
        assert_eq!(
            relative_uri(&file("b/c/deep.feature"), &folder("b")),
            "../",
        );
    }

    #[test]
    fn node_links_to_itself_as_fragment() {
        assert_eq!(relative_uri(&file("a.feature"), &file("a.feature")), "#");
    }
}
