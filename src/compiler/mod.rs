/*!
 * Content-to-LaTeX compilation.
 *
 * This module provides:
 * - `mapping`: the static kind-to-template table
 * - `engine`: the single pass over a flattened item sequence that tracks the
 *   single-column/two-column layout and keeps the `paracol` region balanced
 *
 * Compilation is a pure function of its input and never fails.
 */

pub mod engine;
pub mod mapping;

// Re-export main types
pub use engine::{compile, compile_items, Compilation, LayoutMode};
pub use mapping::{instantiate, rendering, templates, Rendering, TemplatePair};
