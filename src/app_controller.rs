use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::content::{ContentItem, DocumentEntry, FormatKind, FragmentGroup};
use crate::errors::TypesetError;
use crate::export;
use crate::file_utils::FileManager;
use crate::fragment_loader::{self, Category, FragmentLoader};
use crate::session::EditingSession;
use crate::typesetter::{TypesetReport, Typesetter};

// @module: Application controller wiring library, session, compiler and typesetter

// @const: File the captured engine output is written to after a failed run
pub const TYPESET_LOG_FILE: &str = "psalter.typeset.log";

/// One edit applied to a saved project; positions are 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    MoveUp(usize),
    MoveDown(usize),
    Delete(usize),
    /// Replace with a single item given in `parse_entry` syntax
    Replace(usize, String),
    Clear,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Fragment library reader
    loader: FragmentLoader,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let loader = FragmentLoader::new(&config.content_dir);

        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &FragmentLoader {
        &self.loader
    }

    /// List fragment files per category, in natural order
    pub fn library(&self, category: Option<Category>) -> Result<Vec<(Category, Vec<String>)>> {
        let categories: Vec<Category> = match category {
            Some(category) => vec![category],
            None => Category::ALL.to_vec(),
        };

        categories
            .into_iter()
            .map(|category| -> Result<(Category, Vec<String>)> {
                Ok((category, self.loader.list_files(category)?))
            })
            .collect()
    }

    /// Load one fragment file as a group; an empty file is an error here
    pub fn fragment(&self, category: Category, file_name: &str) -> Result<FragmentGroup> {
        self.loader
            .load_as_group(category, file_name)?
            .ok_or_else(|| anyhow!("Fragment {}/{} has no items", category, file_name))
    }

    /// Copy an image into the images directory and build its item.
    ///
    /// An image that is already present under the same name is not overwritten.
    pub fn import_image(&self, source: &Path, height: &str) -> Result<ContentItem> {
        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow!("Image path has no file name: {:?}", source))?;

        let destination = self.config.images_dir.join(file_name);
        if FileManager::file_exists(&destination) {
            debug!("Image {:?} already imported", destination);
        } else {
            FileManager::copy_file(source, &destination)?;
            info!("Imported image {:?}", destination);
        }

        let dir_name = self
            .config
            .images_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "images".to_string());
        let document_path = format!("{}/{}", dir_name, file_name.to_string_lossy());

        Ok(ContentItem::image(document_path, height))
    }

    /// Turn one command-line entry into a document entry.
    ///
    /// Accepted forms:
    /// - `@kind`: structural marker such as `@tocstart` or `@singlecol`
    /// - `image:<path>[:height]`: imported image; the height is whatever
    ///   follows the last `:`, so a path that contains a colon needs an
    ///   explicit (possibly empty) height, as in `image:C:\art\cross.png:`
    /// - `kind|primary|secondary[|extra]`: custom item
    /// - `category/file.txt`: fragment group
    pub fn parse_entry(&self, input: &str) -> Result<DocumentEntry> {
        if let Some(tag) = input.strip_prefix('@') {
            let kind = FormatKind::from_tag(tag);
            if !kind.is_marker() {
                return Err(anyhow!("Not a structural marker: {}", tag));
            }
            return Ok(ContentItem::marker(kind).into());
        }

        if let Some(rest) = input.strip_prefix("image:") {
            let (path, height) = rest.rsplit_once(':')
                .filter(|(path, _)| !path.is_empty())
                .unwrap_or((rest, ""));
            return Ok(self.import_image(Path::new(path), height)?.into());
        }

        if input.contains('|') {
            return fragment_loader::parse_record(input)
                .map(DocumentEntry::from)
                .ok_or_else(|| anyhow!("Custom entry needs at least kind|primary|secondary: {}", input));
        }

        let (category, file_name) = input
            .split_once('/')
            .ok_or_else(|| anyhow!("Expected category/file, marker, image or custom entry: {}", input))?;
        let category: Category = category.parse()?;

        Ok(self.fragment(category, file_name)?.into())
    }

    /// Build (or extend) a project file from command-line entries
    pub fn assemble(&self, inputs: &[String], project_path: &Path, append: bool) -> Result<usize> {
        let mut session = if append && FileManager::file_exists(project_path) {
            EditingSession::from_items(export::load_project(project_path)?)
        } else {
            EditingSession::new()
        };

        for input in inputs {
            let entry = self.parse_entry(input)?;
            debug!("Adding {}", entry.display_label());
            session.insert(entry, true);
        }

        let rows = export::save_project(session.entries(), project_path)?;

        info!("Project {:?} now has {} item(s)", project_path, rows);
        Ok(rows)
    }

    /// Apply one edit to a saved project and save it again.
    ///
    /// Positions are 1-based, as printed by `outline`. Returns the number of
    /// rows left in the project.
    pub fn edit(&self, project_path: &Path, operation: EditOperation) -> Result<usize> {
        let mut session = EditingSession::from_items(export::load_project(project_path)?);

        match operation {
            EditOperation::MoveUp(position) => {
                let index = Self::index_of(position)?;
                if session.move_up(index) == index {
                    warn!("Entry {} cannot move up", position);
                }
            }
            EditOperation::MoveDown(position) => {
                let index = Self::index_of(position)?;
                if session.move_down(index) == index {
                    warn!("Entry {} cannot move down", position);
                }
            }
            EditOperation::Delete(position) => {
                let removed = session
                    .delete_at(Self::index_of(position)?)
                    .ok_or_else(|| anyhow!("No entry at position {}", position))?;
                info!("Deleted {}", removed.display_label());
            }
            EditOperation::Replace(position, input) => {
                let index = Self::index_of(position)?;
                if index >= session.len() {
                    return Err(anyhow!("No entry at position {}", position));
                }

                match self.parse_entry(&input)? {
                    DocumentEntry::Leaf(item) => {
                        if !session.replace_at(index, item) {
                            warn!("Entry {} is a fragment group and was left unchanged", position);
                        }
                    }
                    DocumentEntry::Group(group) => {
                        warn!(
                            "Replacement {} is a fragment group, only single items can replace an entry",
                            group.source_file()
                        );
                    }
                }
            }
            EditOperation::Clear => session.clear(),
        }

        if session.is_empty() {
            FileManager::write_atomically(project_path, "")?;
            info!("Project {:?} is now empty", project_path);
            return Ok(0);
        }

        let rows = export::save_project(session.entries(), project_path)?;
        Ok(rows)
    }

    fn index_of(position: usize) -> Result<usize> {
        position
            .checked_sub(1)
            .ok_or_else(|| anyhow!("Positions start at 1"))
    }

    /// Display labels of every item in a project
    pub fn outline(&self, project_path: &Path) -> Result<Vec<String>> {
        let items = export::load_project(project_path)?;
        Ok(EditingSession::from_items(items).labels())
    }

    /// Compile a project into a body file.
    ///
    /// Returns the written path, or `None` when the file exists and
    /// `force_overwrite` is off.
    pub fn compile_project(
        &self,
        project_path: &Path,
        body_path: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let body_path = body_path.unwrap_or_else(|| self.config.body_path());

        if body_path.exists() && !force_overwrite {
            warn!("Skipping, {:?} already exists (use -f to force overwrite)", body_path);
            return Ok(None);
        }

        let items = export::load_project(project_path)?;
        export::write_body(&items, &body_path)?;

        Ok(Some(body_path))
    }

    /// Compile a project into the configured body file and typeset the main document
    pub async fn build(&self, project_path: &Path) -> Result<TypesetReport> {
        let items = export::load_project(project_path)?;
        export::write_body(&items, self.config.body_path())?;

        let typesetter = Typesetter::new(self.config.typesetting.clone());
        typesetter.check_resources()?;

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(format!("Typesetting with {}", self.config.typesetting.engine));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = typesetter.run().await;
        spinner.finish_and_clear();

        match result {
            Ok(report) => {
                info!(
                    "Built {:?} in {}",
                    report.artifact,
                    Self::format_duration(report.elapsed)
                );
                Ok(report)
            }
            Err(e) => {
                error!("{}", e);
                if let Some(log) = e.log() {
                    self.write_typeset_log(log, &e);
                }
                Err(e.into())
            }
        }
    }

    /// Keep the engine output next to the main document for later inspection
    fn write_typeset_log(&self, log: &str, failure: &TypesetError) {
        let path = self.config.typesetting.working_dir.join(TYPESET_LOG_FILE);

        let mut content = String::new();
        content.push_str(&format!("Typeset Log - {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
        content.push_str(&format!("Failure: {}\n\n", failure));
        content.push_str(log);

        match FileManager::write_to_file(&path, &content) {
            Ok(()) => info!("Engine output written to {:?}", path),
            Err(e) => warn!("Failed to write typeset log: {}", e),
        }
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
