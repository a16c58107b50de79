use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use similar::TextDiff;

use crate::DocsError;
use crate::DocsResult;

/// A documentation or test file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	path: PathBuf,
	contents: String,
	/// The contents as they were read.
	original: String,
}

impl File {
	pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
		let contents = contents.into();
		Self {
			path: path.into(),
			original: contents.clone(),
			contents,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn contents(&self) -> &str {
		&self.contents
	}

	/// Whether the in-memory contents differ from what was read.
	pub fn is_modified(&self) -> bool {
		self.contents != self.original
	}
}

/// A documentation file whose in-memory contents differ from what was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
	pub path: PathBuf,
	pub original: String,
	pub updated: String,
}

impl PendingChange {
	/// A unified diff from the original to the updated contents.
	pub fn unified_diff(&self) -> String {
		let path = self.path.display().to_string();
		TextDiff::from_lines(&self.original, &self.updated)
			.unified_diff()
			.context_radius(3)
			.header(&path, &path)
			.to_string()
	}
}

/// Loaded files keyed by path, with a documentation view and a test view.
///
/// A path that belongs to both views is stored once, so an edit made
/// through the documentation view is visible through the test view.
#[derive(Debug, Default)]
pub struct FileStore {
	files: Vec<File>,
	index: HashMap<PathBuf, usize>,
	documentation: Vec<usize>,
	tests: Vec<usize>,
}

impl FileStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read every documentation and test path from disk.
	pub fn read(documentation: &[PathBuf], tests: &[PathBuf]) -> DocsResult<Self> {
		let mut store = Self::new();

		for path in documentation {
			let id = store.load(path)?;
			push_unique(&mut store.documentation, id);
		}

		for path in tests {
			let id = store.load(path)?;
			push_unique(&mut store.tests, id);
		}

		tracing::debug!(
			files = store.files.len(),
			documentation = store.documentation.len(),
			tests = store.tests.len(),
			"read files"
		);
		Ok(store)
	}

	fn load(&mut self, path: &Path) -> DocsResult<usize> {
		if let Some(&id) = self.index.get(path) {
			return Ok(id);
		}

		let contents = std::fs::read_to_string(path).map_err(|source| {
			DocsError::FileRead {
				path: path.to_path_buf(),
				source,
			}
		})?;
		tracing::trace!(path = %path.display(), bytes = contents.len(), "read file");

		Ok(self.insert(File::new(path, contents)))
	}

	fn insert(&mut self, file: File) -> usize {
		if let Some(&id) = self.index.get(&file.path) {
			return id;
		}

		let id = self.files.len();
		self.index.insert(file.path.clone(), id);
		self.files.push(file);
		id
	}

	/// Add an in-memory documentation file. When `path` is already loaded the
	/// existing record is shared and `contents` is ignored.
	pub fn add_documentation(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
		let id = self.insert(File::new(path, contents));
		push_unique(&mut self.documentation, id);
	}

	/// Add an in-memory test file. When `path` is already loaded the existing
	/// record is shared and `contents` is ignored.
	pub fn add_test(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
		let id = self.insert(File::new(path, contents));
		push_unique(&mut self.tests, id);
	}

	pub fn get(&self, path: &Path) -> Option<&File> {
		self.index.get(path).map(|&id| &self.files[id])
	}

	pub fn documentation(&self) -> impl Iterator<Item = &File> {
		self.documentation.iter().map(|&id| &self.files[id])
	}

	pub fn tests(&self) -> impl Iterator<Item = &File> {
		self.tests.iter().map(|&id| &self.files[id])
	}

	/// Replace the contents of each documentation file, in order, with the
	/// output of `update`. Returns how many files changed.
	///
	/// An error stops the iteration; files updated before it keep their new
	/// contents.
	pub fn update_documentation<F>(&mut self, mut update: F) -> DocsResult<usize>
	where
		F: FnMut(&File) -> DocsResult<String>,
	{
		let mut changed = 0;

		for &id in &self.documentation {
			let file = &mut self.files[id];
			let contents = update(file)?;
			if contents != file.contents {
				tracing::trace!(path = %file.path.display(), "documentation changed");
				file.contents = contents;
				changed += 1;
			}
		}

		Ok(changed)
	}

	/// Write every documentation file to disk. Test files are never written.
	pub fn write_documentation(&self) -> DocsResult<()> {
		for file in self.documentation() {
			std::fs::write(&file.path, &file.contents).map_err(|source| {
				DocsError::FileWrite {
					path: file.path.clone(),
					source,
				}
			})?;
		}

		tracing::debug!(files = self.documentation.len(), "wrote documentation");
		Ok(())
	}

	pub fn pending_changes(&self) -> Vec<PendingChange> {
		self.documentation()
			.filter(|file| file.is_modified())
			.map(|file| {
				PendingChange {
					path: file.path.clone(),
					original: file.original.clone(),
					updated: file.contents.clone(),
				}
			})
			.collect()
	}
}

fn push_unique(view: &mut Vec<usize>, id: usize) {
	if !view.contains(&id) {
		view.push(id);
	}
}
