//! Classification of crawled files.

use std::path::Path;

/// Classification of a single file encountered by the crawler.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileKind {
    /// A Gherkin `.feature` file to be parsed.
    Feature,

    /// Structural markdown to be embedded as documentation content.
    Content,

    /// A file producing no tree node at all.
    Ignored,

    /// Any other file, copied through as an opaque asset.
    PassThrough,
}

/// Detector classifying directory entries by file name.
///
/// Extension matching is case-insensitive, the same way `.feature` globbing
/// is elsewhere in this crate.
#[derive(Clone, Debug)]
pub struct RelevantFileDetector {
    feature_extensions: Vec<String>,
    content_extensions: Vec<String>,
    ignored_extensions: Vec<String>,
}

impl Default for RelevantFileDetector {
    fn default() -> Self {
        Self {
            feature_extensions: vec!["feature".into()],
            content_extensions: vec![
                "md".into(),
                "markdown".into(),
                "mdown".into(),
                "mkdn".into(),
            ],
            ignored_extensions: vec!["ignore".into()],
        }
    }
}

impl RelevantFileDetector {
    /// Creates a detector with the default extension sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extension (without the dot) whose files yield no node.
    #[must_use]
    pub fn ignore_extension(mut self, ext: impl Into<String>) -> Self {
        self.ignored_extensions.push(ext.into());
        self
    }

    /// Classifies the file at the given `path`.
    ///
    /// Dot-files are always [`FileKind::Ignored`].
    #[must_use]
    pub fn classify(&self, path: &Path) -> FileKind {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.starts_with('.') {
            return FileKind::Ignored;
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let matches =
            |exts: &[String]| exts.iter().any(|e| e.eq_ignore_ascii_case(&ext));

        if matches(&self.feature_extensions) {
            FileKind::Feature
        } else if matches(&self.content_extensions) {
            FileKind::Content
        } else if matches(&self.ignored_extensions) {
            FileKind::Ignored
        } else {
            FileKind::PassThrough
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        let detector = RelevantFileDetector::new();

        assert_eq!(
            detector.classify(Path::new("a/b.feature")),
            FileKind::Feature,
        );
        assert_eq!(
            detector.classify(Path::new("a/B.FEATURE")),
            FileKind::Feature,
        );
        assert_eq!(detector.classify(Path::new("index.md")), FileKind::Content);
        assert_eq!(detector.classify(Path::new("x.ignore")), FileKind::Ignored);
        assert_eq!(
            detector.classify(Path::new("logo.png")),
            FileKind::PassThrough,
        );
    }

    #[test]
    fn dot_files_are_ignored() {
        let detector = RelevantFileDetector::new();

        assert_eq!(
            detector.classify(Path::new("a/.gitkeep")),
            FileKind::Ignored,
        );
        assert_eq!(
            detector.classify(Path::new(".hidden.feature")),
            FileKind::Ignored,
        );
    }

    #[test]
    fn extra_ignored_extensions_are_honored() {
        let detector = RelevantFileDetector::new().ignore_extension("bak");

        assert_eq!(detector.classify(Path::new("old.bak")), FileKind::Ignored);
    }
}
