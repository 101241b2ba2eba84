use log::{debug, warn};

use super::mapping::{instantiate, rendering, Rendering};
use crate::content::ContentItem;

// @module: Layout-tracking transducer from content items to LaTeX lines

// @const: Two-column region brackets
pub const REGION_OPEN: &str = r"\begin{paracol}{2}";
pub const REGION_CLOSE: &str = r"\end{paracol}";

// @const: Single-column suspension of the region
pub const SINGLE_COLUMN_ENTER: &str = r"\psEnterSingleCol";
pub const SINGLE_COLUMN_EXIT: &str = r"\psExitSingleCol";

pub const PAGE_BREAK: &str = r"\psPageBreak";
pub const SINGLE_PAGE_BREAK: &str = r"\psSinglePageBreak";

// @const: Emitted in order at every table-of-contents boundary
pub const TOC_SEQUENCE: [&str; 4] = [
    r"\psPrintToc",
    r"\clearpage",
    r"\pagenumbering{arabic}",
    r"\pagestyle{fancy}",
];

/// Layout state threaded through a compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Inside the two-column region
    #[default]
    TwoColumn,
    /// Region suspended in favour of full-width text
    SingleColumn,
}

impl LayoutMode {
    pub fn is_single_column(self) -> bool {
        self == Self::SingleColumn
    }

    fn toggled(self) -> Self {
        match self {
            Self::TwoColumn => Self::SingleColumn,
            Self::SingleColumn => Self::TwoColumn,
        }
    }
}

/// Output of a walk over a flattened item sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// Per-item output lines, without the outer region brackets
    pub lines: Vec<String>,
    /// Layout in effect after the last item
    pub final_mode: LayoutMode,
}

/// Walk `items` once, left to right, starting in two-column mode.
///
/// The outer region brackets are not emitted here; see [`compile`].
pub fn compile_items(items: &[ContentItem]) -> Compilation {
    let (final_mode, lines) = items.iter().fold(
        (LayoutMode::default(), Vec::with_capacity(items.len() + 2)),
        |(mode, mut lines), item| {
            let next = step(mode, item, &mut lines);
            (next, lines)
        },
    );

    Compilation { lines, final_mode }
}

/// Compile a flattened item sequence into LaTeX command lines.
///
/// The region is opened before the first item and closed after the last one
/// unless the document ends in single-column mode, where it is left
/// suspended. An empty sequence compiles to no lines at all.
pub fn compile(items: &[ContentItem]) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }

    let Compilation { lines: body, final_mode } = compile_items(items);

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(REGION_OPEN.to_string());
    lines.extend(body);
    if final_mode == LayoutMode::TwoColumn {
        lines.push(REGION_CLOSE.to_string());
    } else {
        debug!("Document ends in single-column mode, leaving the column region open");
    }

    lines
}

/// Emit the lines for one item and return the layout that follows it
pub fn step(mode: LayoutMode, item: &ContentItem, lines: &mut Vec<String>) -> LayoutMode {
    let single = mode.is_single_column();
    let (l, c, a) = (item.primary_text(), item.secondary_text(), item.extra());

    match rendering(item.kind()) {
        Rendering::Template(pair) => {
            lines.push(instantiate(pair.select(single), l, c, a));
            mode
        }
        Rendering::TocStart => {
            if !single {
                lines.push(REGION_CLOSE.to_string());
            }
            lines.extend(TOC_SEQUENCE.iter().map(|cmd| cmd.to_string()));
            if single {
                lines.push(SINGLE_COLUMN_EXIT.to_string());
            } else {
                lines.push(REGION_OPEN.to_string());
            }
            LayoutMode::TwoColumn
        }
        Rendering::ColumnToggle => {
            let next = mode.toggled();
            if next.is_single_column() {
                lines.push(SINGLE_COLUMN_ENTER.to_string());
            } else {
                lines.push(SINGLE_COLUMN_EXIT.to_string());
            }
            next
        }
        Rendering::PageBreak => {
            let cmd = if single { SINGLE_PAGE_BREAK } else { PAGE_BREAK };
            lines.push(cmd.to_string());
            mode
        }
        Rendering::NumberedAntiphon => {
            // single-column drops the primary text
            let line = if single {
                format!(r"\psSingleAntiphonNum{{{}}}{{{}}}", a, c)
            } else {
                format!(r"\psAntiphonNum{{{}}}{{{}}}{{{}}}", a, l, c)
            };
            lines.push(line);
            mode
        }
        Rendering::Image => {
            let line = if single {
                format!(r"\psSingleImage{{{}}}", l)
            } else {
                format!(r"\psImageFullWidth{{{}}}", l)
            };
            lines.push(line);
            mode
        }
        Rendering::Unknown => {
            let tag = item.kind().tag();
            warn!("Unknown content kind '{}', emitting a comment instead", tag);
            lines.push(format!("% unknown kind: {} | {} | {}", tag, l, c));
            mode
        }
    }
}
