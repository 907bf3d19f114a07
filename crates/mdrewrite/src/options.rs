//! Configuration options for the transform

/// Default column width for re-flowed text
pub const DEFAULT_WIDTH: usize = 80;

/// Default limit on source tree depth.
///
/// Every source level costs several stack frames, so the limit keeps a
/// conversion within a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Options for a transform.
///
/// Handlers receive the options in effect for the node they handle and may
/// override some of them for their children with an [`OptionsPatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Re-flow text nodes to `width` columns
    pub should_wrap: bool,

    /// Keep wrapped text on a single line
    pub single_line: bool,

    /// Column width for re-flowed text
    pub width: usize,

    /// Summary text of the document, matched by the summary rules
    pub summary: Option<String>,

    /// Deepest source tree accepted
    pub max_depth: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            should_wrap: false,
            single_line: false,
            width: DEFAULT_WIDTH,
            summary: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TransformOptions {
    /// Shallow override: every field set in `patch` replaces ours
    pub fn merge(&self, patch: &OptionsPatch) -> TransformOptions {
        TransformOptions {
            should_wrap: patch.should_wrap.unwrap_or(self.should_wrap),
            single_line: patch.single_line.unwrap_or(self.single_line),
            width: patch.width.unwrap_or(self.width),
            summary: match &patch.summary {
                Some(summary) => summary.clone(),
                None => self.summary.clone(),
            },
            max_depth: self.max_depth,
        }
    }
}

/// Partial options applied on top of the current ones for a subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsPatch {
    pub should_wrap: Option<bool>,
    pub single_line: Option<bool>,
    pub width: Option<usize>,
    /// `Some(None)` clears the summary
    pub summary: Option<Option<String>>,
}

impl OptionsPatch {
    /// Wrapped text kept on one line, as used for headings
    pub fn single_line() -> Self {
        Self {
            should_wrap: Some(true),
            single_line: Some(true),
            ..Default::default()
        }
    }

    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self == &OptionsPatch::default()
    }
}
