/*!
 * Project interchange and body output.
 *
 * Projects are saved as CSV: one row per leaf item (groups expanded), four
 * columns `kind, primary, secondary, extra`, no header. The compiled body is
 * written as a `.tex` file whose first line identifies the generator.
 */

use log::{debug, info};
use std::io::{Read, Write};
use std::path::Path;

use crate::compiler;
use crate::content::{ContentItem, DocumentEntry};
use crate::errors::ExportError;
use crate::file_utils::FileManager;

// @const: First line of every generated body file
pub const GENERATOR_LINE: &str = "% Generated by psalter (direct TeX mode)";

/// Write the rows of `entries` as CSV to `writer`
pub fn write_csv<W: Write>(entries: &[DocumentEntry], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut rows = 0;
    for entry in entries {
        for row in entry.rows() {
            csv_writer.write_record(&row)?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

/// Read CSV rows back as items.
///
/// Short rows are padded with empty fields and columns past the fourth are
/// ignored. Blank lines are skipped by the reader; a row of empty fields is
/// an item with an empty tag and is kept.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ContentItem>, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut items = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or("");
        items.push(ContentItem::from_row(field(0), field(1), field(2), field(3)));
    }

    Ok(items)
}

/// Save a project file
pub fn save_project<P: AsRef<Path>>(entries: &[DocumentEntry], path: P) -> Result<usize, ExportError> {
    let path = path.as_ref();
    if entries.is_empty() {
        return Err(ExportError::EmptyProject);
    }

    let mut buffer = Vec::new();
    let rows = write_csv(entries, &mut buffer)?;
    let content = String::from_utf8(buffer).map_err(|e| ExportError::Csv(e.to_string()))?;

    FileManager::write_atomically(path, &content).map_err(|e| ExportError::Io(e.to_string()))?;

    info!("Saved {} row(s) to {:?}", rows, path);
    Ok(rows)
}

/// Load a project file as a flat list of items
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<Vec<ContentItem>, ExportError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| ExportError::Io(format!("Failed to open {:?}: {}", path, e)))?;

    let items = read_csv(file)?;
    debug!("Loaded {} item(s) from {:?}", items.len(), path);
    Ok(items)
}

/// Compile `items` and prefix the generator line
pub fn render_body(items: &[ContentItem]) -> String {
    let lines = compiler::compile(items);

    let mut body = String::from(GENERATOR_LINE);
    body.push('\n');
    body.push_str(&lines.join("\n"));
    body
}

/// Compile `items` and write the body file
pub fn write_body<P: AsRef<Path>>(items: &[ContentItem], path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    if items.is_empty() {
        return Err(ExportError::EmptyProject);
    }

    let body = render_body(items);
    FileManager::write_atomically(path, &body).map_err(|e| ExportError::Io(e.to_string()))?;

    info!("Wrote body with {} item(s) to {:?}", items.len(), path);
    Ok(())
}
