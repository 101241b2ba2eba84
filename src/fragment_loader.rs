/*!
 * Fragment library loading.
 *
 * Fragments live in one directory per category under the content directory.
 * Each fragment file is UTF-8, line oriented: blank lines and lines starting
 * with `#` are skipped, every other line is a `|`-delimited record
 * `kind|primary|secondary[|extra]`. The parse is forgiving: records with
 * fewer than three fields are dropped without failing the file.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::content::{ContentItem, FragmentGroup};
use crate::errors::FragmentError;
use crate::file_utils::FileManager;

// @const: Embedded integer token in a file name, ASCII or full-width digits
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9０-９]+").unwrap());

// @const: Sort key for file names without any number
pub const UNNUMBERED_SORT_KEY: u64 = 999;

// @const: Extension of fragment files
const FRAGMENT_EXTENSION: &str = "txt";

/// Fixed fragment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Psalms,
    Canticles,
    Hymns,
    Antiphons,
    Lessons,
    Responsories,
    Collects,
    Common,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Category::Psalms,
        Category::Canticles,
        Category::Hymns,
        Category::Antiphons,
        Category::Lessons,
        Category::Responsories,
        Category::Collects,
        Category::Common,
    ];

    // @returns: Directory name of the category
    pub fn key(&self) -> &'static str {
        match self {
            Self::Psalms => "psalms",
            Self::Canticles => "canticles",
            Self::Hymns => "hymns",
            Self::Antiphons => "antiphons",
            Self::Lessons => "lessons",
            Self::Responsories => "responsories",
            Self::Collects => "collects",
            Self::Common => "common",
        }
    }

    // @returns: Human-readable category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Psalms => "Psalms",
            Self::Canticles => "Canticles",
            Self::Hymns => "Hymns",
            Self::Antiphons => "Antiphons",
            Self::Lessons => "Lessons",
            Self::Responsories => "Responsories",
            Self::Collects => "Collects",
            Self::Common => "Common texts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.key() == s.trim().to_lowercase())
            .ok_or_else(|| FragmentError::UnknownCategory(s.to_string()))
    }
}

/// Sort key derived from the integers embedded in a file name.
///
/// The first integer is the primary key; when a second one exists the key is
/// `first * 100 + second`, so `ps9_2.txt` sorts as 902. Full-width digits
/// count like ASCII ones (`圣咏３.txt` sorts as 3). Names without digits
/// get [`UNNUMBERED_SORT_KEY`].
pub fn natural_sort_key(file_name: &str) -> u64 {
    let mut numbers = NUMBER_REGEX
        .find_iter(file_name)
        .map(|m| digits_value(m.as_str()));

    match (numbers.next(), numbers.next()) {
        (None, _) => UNNUMBERED_SORT_KEY,
        (Some(first), None) => first,
        (Some(first), Some(second)) => first.saturating_mul(100).saturating_add(second),
    }
}

/// Decimal value of a run of ASCII or full-width digits, saturating on overflow
fn digits_value(digits: &str) -> u64 {
    digits
        .chars()
        .filter_map(|c| match c {
            '０'..='９' => Some(c as u64 - '０' as u64),
            _ => c.to_digit(10).map(u64::from),
        })
        .fold(0u64, |value, digit| value.saturating_mul(10).saturating_add(digit))
}

/// Parse a single fragment record; `None` for records with fewer than three fields
pub fn parse_record(line: &str) -> Option<ContentItem> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 3 {
        return None;
    }

    let extra = fields.get(3).copied().unwrap_or("");
    Some(ContentItem::from_row(fields[0], fields[1], fields[2], extra))
}

/// Parse the content of a fragment file into items, skipping what cannot be read
pub fn parse_fragment_str(content: &str) -> Vec<ContentItem> {
    let mut items = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_record(line) {
            Some(item) => items.push(item),
            None => debug!("Skipping malformed fragment line {}: {}", index + 1, line),
        }
    }

    items
}

/// Reads fragment files from a content directory
#[derive(Debug, Clone)]
pub struct FragmentLoader {
    content_dir: PathBuf,
}

impl FragmentLoader {
    /// Create a loader rooted at `content_dir`
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Create the directory of every category
    pub fn ensure_layout(&self) -> Result<()> {
        for category in Category::ALL {
            FileManager::ensure_dir(self.category_dir(category))?;
        }
        Ok(())
    }

    /// The fixed categories with their display names
    pub fn list_categories(&self) -> Vec<(Category, &'static str)> {
        Category::ALL
            .iter()
            .map(|category| (*category, category.display_name()))
            .collect()
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.content_dir.join(category.key())
    }

    /// Fragment file names of a category, in natural order
    pub fn list_files(&self, category: Category) -> Result<Vec<String>> {
        let dir = self.category_dir(category);
        let mut files = FileManager::list_file_names(&dir, FRAGMENT_EXTENSION)
            .with_context(|| format!("Failed to list fragments in {:?}", dir))?;

        files.sort_by(|a, b| {
            natural_sort_key(a)
                .cmp(&natural_sort_key(b))
                .then_with(|| a.cmp(b))
        });

        debug!("Found {} fragment file(s) in {}", files.len(), category);
        Ok(files)
    }

    /// Load every item of a fragment file; a missing file yields no items
    pub fn load_file(&self, category: Category, file_name: &str) -> Result<Vec<ContentItem>> {
        let path = self.category_dir(category).join(file_name);
        if !FileManager::file_exists(&path) {
            warn!("Fragment file not found: {:?}", path);
            return Ok(Vec::new());
        }

        let content = FileManager::read_to_string(&path).map_err(|e| FragmentError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(parse_fragment_str(&content))
    }

    /// Load a fragment file as one group; `None` when it yields no items
    pub fn load_as_group(&self, category: Category, file_name: &str) -> Result<Option<FragmentGroup>> {
        let items = self.load_file(category, file_name)?;
        if items.is_empty() {
            debug!("Fragment {}/{} has no items", category, file_name);
        }
        Ok(FragmentGroup::new(file_name, items))
    }
}
