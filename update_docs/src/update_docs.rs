use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::BlockSyntax;
use crate::DefaultSyntax;
use crate::DocsError;
use crate::DocsResult;
use crate::ExampleMap;
use crate::File;
use crate::FileStore;
use crate::PendingChange;
use crate::PrettyCompact;
use crate::Stringify;
use crate::Token;
use crate::UpdateDocsConfig;
use crate::collector::collect_examples;
use crate::discovery::GlobList;
use crate::discovery::collect_candidates;
use crate::replacer::replace_examples;
use crate::token::replace_token;

/// Where an [`UpdateDocs`] instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsState {
	/// Files haven't been read yet.
	Unloaded,
	/// Files are read and the documentation matches what's on disk.
	Loaded,
	/// At least one documentation file differs from what was read.
	Modified,
}

/// Syncs examples from test sources into documentation code blocks.
///
/// 1. Create an instance with [`UpdateDocs::new`], which reads the files
///    matched by the configured globs. Call [`read`](Self::read) to read them
///    again.
/// 2. [`collect_examples`](Self::collect_examples) gathers the code between
///    `// start docs Example Name` and `// end docs Example Name` comments in
///    the test files. Multiple blocks for the same example are concatenated.
/// 3. [`replace_examples`](Self::replace_examples) rewrites the code blocks
///    under `<!---Example Name-->` comments in the documentation files.
///    [`update_examples`](Self::update_examples) does both steps at once.
/// 4. While the tests run, [`replace_token`](Self::replace_token) injects
///    values computed by the tests into the examples.
/// 5. [`write`](Self::write) saves the documentation. Nothing is written
///    before that.
pub struct UpdateDocs {
	config: UpdateDocsConfig,
	syntax: Box<dyn BlockSyntax + Send + Sync>,
	stringifier: Box<dyn Stringify + Send + Sync>,
	store: FileStore,
	loaded: bool,
}

impl fmt::Debug for UpdateDocs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UpdateDocs")
			.field("config", &self.config)
			.field("store", &self.store)
			.field("state", &self.state())
			.finish_non_exhaustive()
	}
}

impl UpdateDocs {
	/// Create an instance and read the configured files.
	pub fn new(config: UpdateDocsConfig) -> DocsResult<Self> {
		let mut docs = Self::unloaded(config);
		docs.read()?;
		Ok(docs)
	}

	/// Create an instance without reading any files.
	pub fn unloaded(config: UpdateDocsConfig) -> Self {
		let stringifier =
			PrettyCompact::new(config.indent.clone()).with_max_length(config.max_line_length);

		Self {
			config,
			syntax: Box::new(DefaultSyntax),
			stringifier: Box::new(stringifier),
			store: FileStore::new(),
			loaded: false,
		}
	}

	/// Load the config file found in `root` and read the configured files.
	pub fn from_root(root: &Path) -> DocsResult<Self> {
		let config = UpdateDocsConfig::load(root)?.ok_or_else(|| {
			DocsError::ConfigNotFound {
				root: root.to_path_buf(),
			}
		})?;
		Self::new(config)
	}

	/// Create an instance over files that are already in memory. The globs
	/// in `config` are only used by a later [`read`](Self::read).
	pub fn from_store(config: UpdateDocsConfig, store: FileStore) -> Self {
		let mut docs = Self::unloaded(config);
		docs.store = store;
		docs.loaded = true;
		docs
	}

	/// Use a different marker syntax for test sources and documentation.
	#[must_use]
	pub fn with_syntax(mut self, syntax: impl BlockSyntax + Send + Sync + 'static) -> Self {
		self.syntax = Box::new(syntax);
		self
	}

	/// Use a different stringifier for non-string token values.
	#[must_use]
	pub fn with_stringifier(mut self, stringifier: impl Stringify + Send + Sync + 'static) -> Self {
		self.stringifier = Box::new(stringifier);
		self
	}

	pub fn config(&self) -> &UpdateDocsConfig {
		&self.config
	}

	pub fn state(&self) -> DocsState {
		if !self.loaded {
			DocsState::Unloaded
		} else if self.store.documentation().any(File::is_modified) {
			DocsState::Modified
		} else {
			DocsState::Loaded
		}
	}

	pub fn store(&self) -> &FileStore {
		&self.store
	}

	pub fn documentation_files(&self) -> impl Iterator<Item = &File> {
		self.store.documentation()
	}

	pub fn test_files(&self) -> impl Iterator<Item = &File> {
		self.store.tests()
	}

	/// Documentation files that differ from what was read.
	pub fn pending_changes(&self) -> Vec<PendingChange> {
		self.store.pending_changes()
	}

	/// Read the documentation and test files again, dropping any changes that
	/// weren't written.
	pub fn read(&mut self) -> DocsResult<()> {
		let documentation = GlobList::new(&self.config.documentation_globs)?;
		let tests = GlobList::new(&self.config.test_globs)?;
		let candidates = collect_candidates(
			&self.config.root,
			&[&documentation, &tests],
			self.config.disable_gitignore,
		)?;

		self.store = FileStore::read(&documentation.select(&candidates), &tests.select(&candidates))?;
		self.loaded = true;
		Ok(())
	}

	/// Write the documentation files. Test files are never written, even when
	/// they are also documentation.
	pub fn write(&self) -> DocsResult<()> {
		self.ensure_loaded()?;
		self.store.write_documentation()
	}

	/// Collect the examples from the test files.
	pub fn collect_examples(&self) -> DocsResult<ExampleMap> {
		self.ensure_loaded()?;
		let pattern = self.syntax.test_block_pattern()?;
		collect_examples(self.store.tests().map(File::contents), &pattern)
	}

	/// Replace every anchored code block in the documentation with the
	/// matching examples.
	pub fn replace_examples(&mut self, examples: &ExampleMap) -> DocsResult<()> {
		self.ensure_loaded()?;
		let pattern = self.syntax.documentation_block_pattern(None)?;
		let changed = self
			.store
			.update_documentation(|file| Ok(replace_examples(file.contents(), examples, &pattern)))?;

		tracing::debug!(changed, "replaced examples");
		Ok(())
	}

	/// [`collect_examples`](Self::collect_examples) followed by
	/// [`replace_examples`](Self::replace_examples).
	pub fn update_examples(&mut self) -> DocsResult<()> {
		let examples = self.collect_examples()?;
		self.replace_examples(&examples)
	}

	/// Replace `token` with `value` in every code block labelled `example`.
	///
	/// Strings are inserted as they are; any other value is rendered by the
	/// stringifier. The token has to occur exactly once in each of the code
	/// blocks, otherwise [`DocsError::TokenCount`] is returned. Documentation
	/// files processed before the failing one keep their replacements.
	///
	/// ```rust
	/// use update_docs::FileStore;
	/// use update_docs::UpdateDocs;
	/// use update_docs::UpdateDocsConfig;
	///
	/// let mut store = FileStore::new();
	/// store.add_documentation("readme.md", "<!---sum-->\n```rust\n2 + 2 // result\n```\n");
	/// let mut docs = UpdateDocs::from_store(UpdateDocsConfig::default(), store);
	///
	/// docs.replace_token("sum", "result", &4).unwrap();
	/// let readme = docs.documentation_files().next().unwrap();
	/// assert_eq!(readme.contents(), "<!---sum-->\n```rust\n2 + 2 // 4\n```\n");
	/// ```
	pub fn replace_token<T>(
		&mut self,
		example: &str,
		token: impl Into<Token>,
		value: &T,
	) -> DocsResult<()>
	where
		T: Serialize + ?Sized,
	{
		self.ensure_loaded()?;
		let token = token.into();
		let value = self.stringify_value(value)?;
		let pattern = self.syntax.documentation_block_pattern(Some(example))?;
		let changed = self.store.update_documentation(|file| {
			replace_token(file.contents(), &pattern, example, &token, &value)
		})?;

		tracing::debug!(example, %token, changed, "replaced token");
		Ok(())
	}

	fn stringify_value<T>(&self, value: &T) -> DocsResult<String>
	where
		T: Serialize + ?Sized,
	{
		let value = match serde_json::to_value(value)? {
			Value::String(string) => string,
			value => self.stringifier.stringify(&value),
		};

		Ok(value)
	}

	fn ensure_loaded(&self) -> DocsResult<()> {
		if self.loaded {
			Ok(())
		} else {
			Err(DocsError::NotLoaded)
		}
	}
}
