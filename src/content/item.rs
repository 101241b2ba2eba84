use std::fmt;
use std::path::Path;

use super::kind::FormatKind;

// @module: Content items, fragment groups and document entries

// @const: Preview widths used by display labels
const PRIMARY_PREVIEW_CHARS: usize = 20;
const SECONDARY_PREVIEW_CHARS: usize = 10;

/// One semantic unit of content.
///
/// Items are immutable once built; editing an item means building a new one
/// and replacing it in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    kind: FormatKind,
    // @field: Source-language text (Latin), or the path of an image
    primary_text: String,
    // @field: Target-language text
    secondary_text: String,
    // @field: Kind-dependent auxiliary value (antiphon number, image height)
    extra: String,
}

impl ContentItem {
    /// Create a new content item
    pub fn new(
        kind: FormatKind,
        primary_text: impl Into<String>,
        secondary_text: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        ContentItem {
            kind,
            primary_text: primary_text.into(),
            secondary_text: secondary_text.into(),
            extra: extra.into(),
        }
    }

    /// Create an item with all text fields empty, as used for structural markers
    pub fn marker(kind: FormatKind) -> Self {
        Self::new(kind, "", "", "")
    }

    /// Create an image item; `height` may be empty to use the document default
    pub fn image(path: impl Into<String>, height: impl Into<String>) -> Self {
        Self::new(FormatKind::Image, path, "", height)
    }

    /// Build an item from a tabular row `(kind, primary, secondary, extra)`
    pub fn from_row(kind: &str, primary: &str, secondary: &str, extra: &str) -> Self {
        Self::new(FormatKind::from_tag(kind), primary, secondary, extra)
    }

    pub fn kind(&self) -> &FormatKind {
        &self.kind
    }

    pub fn primary_text(&self) -> &str {
        &self.primary_text
    }

    pub fn secondary_text(&self) -> &str {
        &self.secondary_text
    }

    pub fn extra(&self) -> &str {
        &self.extra
    }

    /// Fixed 4-column row for tabular export
    pub fn to_row(&self) -> [String; 4] {
        [
            self.kind.tag().to_string(),
            self.primary_text.clone(),
            self.secondary_text.clone(),
            self.extra.clone(),
        ]
    }

    /// Short human-readable summary of the item
    pub fn display_label(&self) -> String {
        match &self.kind {
            FormatKind::Image => {
                let name = Path::new(&self.primary_text)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.primary_text.clone());
                format!("[image] {}", name)
            }
            FormatKind::Rule => "[rule]".to_string(),
            FormatKind::ThickRule => "[thick rule]".to_string(),
            FormatKind::PageBreak => "[page break]".to_string(),
            FormatKind::TocStart => "[toc start]".to_string(),
            FormatKind::SingleColumn => "[column toggle]".to_string(),
            kind => format!(
                "[{}] {} | {}",
                kind.tag(),
                preview(&self.primary_text, PRIMARY_PREVIEW_CHARS),
                preview(&self.secondary_text, SECONDARY_PREVIEW_CHARS)
            ),
        }
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

/// Truncate to `max_chars` characters, appending an ellipsis when anything was cut
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// An ordered, non-empty batch of items loaded from one fragment file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentGroup {
    // @field: Name of the file the items came from
    source_file: String,
    items: Vec<ContentItem>,
}

impl FragmentGroup {
    /// Create a group; returns `None` for an empty item list
    pub fn new(source_file: impl Into<String>, items: Vec<ContentItem>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        Some(FragmentGroup {
            source_file: source_file.into(),
            items,
        })
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Number of items in the group
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; groups are never empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Label built from the first item plus the count of the remaining lines
    pub fn display_label(&self) -> String {
        let first = &self.items[0];
        format!(
            "[{}] {} | {} (+{} lines)",
            first.kind().tag(),
            preview(first.primary_text(), PRIMARY_PREVIEW_CHARS),
            preview(first.secondary_text(), SECONDARY_PREVIEW_CHARS),
            self.items.len() - 1
        )
    }
}

/// One entry of the document sequence: a single item or a whole fragment group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEntry {
    Leaf(ContentItem),
    Group(FragmentGroup),
}

impl DocumentEntry {
    pub fn display_label(&self) -> String {
        match self {
            Self::Leaf(item) => item.display_label(),
            Self::Group(group) => group.display_label(),
        }
    }

    /// The leaf items of this entry, in order
    pub fn items(&self) -> &[ContentItem] {
        match self {
            Self::Leaf(item) => std::slice::from_ref(item),
            Self::Group(group) => group.items(),
        }
    }

    /// Tabular rows of every leaf item in this entry
    pub fn rows(&self) -> Vec<[String; 4]> {
        self.items().iter().map(ContentItem::to_row).collect()
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl From<ContentItem> for DocumentEntry {
    fn from(item: ContentItem) -> Self {
        Self::Leaf(item)
    }
}

impl From<FragmentGroup> for DocumentEntry {
    fn from(group: FragmentGroup) -> Self {
        Self::Group(group)
    }
}
