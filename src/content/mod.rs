/*!
 * Content model for psalter documents.
 *
 * This module contains the value types the rest of the crate passes around:
 * - `kind`: the closed set of format tags (`FormatKind`)
 * - `item`: single content items, fragment groups and document entries
 */

pub mod item;
pub mod kind;

// Re-export main types
pub use item::{ContentItem, DocumentEntry, FragmentGroup};
pub use kind::FormatKind;
