use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::DocsError;
use crate::DocsResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"update-docs.toml",
	".update-docs.toml",
	".config/update-docs.toml",
];

/// Default indentation unit used when pretty-printing non-string token
/// values.
pub const DEFAULT_INDENT: &str = "\t";

/// Default line width the stringifier tries to keep values within.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Configuration for an [`UpdateDocs`](crate::UpdateDocs) instance.
///
/// It can be built in code or loaded from an `update-docs.toml` file:
///
/// ```toml
/// documentation_globs = ["**/*.md"]
/// test_globs = ["tests/**/*.rs"]
/// indent = "  "
/// max_line_length = 100
/// disable_gitignore = false
/// ```
///
/// Globs are resolved relative to [`root`](Self::root), which is the
/// directory holding the config file when loaded with [`load`](Self::load).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UpdateDocsConfig {
	/// Globs that select the documentation files whose code blocks are
	/// updated.
	#[serde(default)]
	pub documentation_globs: Vec<String>,
	/// Globs that select the test sources examples are collected from.
	#[serde(default)]
	pub test_globs: Vec<String>,
	/// Indentation unit for object and array values passed to
	/// [`replace_token`](crate::UpdateDocs::replace_token).
	#[serde(default = "default_indent")]
	pub indent: String,
	#[serde(default = "default_max_line_length")]
	pub max_line_length: usize,
	/// When true, `.gitignore` files are not used for filtering discovered
	/// files.
	#[serde(default)]
	pub disable_gitignore: bool,
	/// Directory the globs are resolved against.
	#[serde(skip, default = "default_root")]
	pub root: PathBuf,
}

fn default_indent() -> String {
	DEFAULT_INDENT.to_string()
}

fn default_max_line_length() -> usize {
	DEFAULT_MAX_LINE_LENGTH
}

fn default_root() -> PathBuf {
	PathBuf::from(".")
}

impl Default for UpdateDocsConfig {
	fn default() -> Self {
		Self {
			documentation_globs: Vec::new(),
			test_globs: Vec::new(),
			indent: default_indent(),
			max_line_length: default_max_line_length(),
			disable_gitignore: false,
			root: default_root(),
		}
	}
}

impl UpdateDocsConfig {
	pub fn new<D, T>(documentation_globs: D, test_globs: T, indent: impl Into<String>) -> Self
	where
		D: IntoIterator,
		D::Item: Into<String>,
		T: IntoIterator,
		T::Item: Into<String>,
	{
		Self {
			documentation_globs: documentation_globs.into_iter().map(Into::into).collect(),
			test_globs: test_globs.into_iter().map(Into::into).collect(),
			indent: indent.into(),
			..Self::default()
		}
	}

	/// Set the directory the globs are resolved against.
	#[must_use]
	pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.root = root.into();
		self
	}

	/// Resolve the config file path for `root`, if any.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first candidate file found in `root`.
	/// Returns `Ok(None)` when there is no config file.
	pub fn load(root: &Path) -> DocsResult<Option<UpdateDocsConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path).map_err(|source| {
			DocsError::FileRead {
				path: config_path.clone(),
				source,
			}
		})?;
		let mut config = Self::parse(&content)?;
		config.root = root.to_path_buf();
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse a config from TOML text. The root is left at its default.
	pub fn parse(content: &str) -> DocsResult<UpdateDocsConfig> {
		toml::from_str(content).map_err(|e| DocsError::ConfigParse(e.to_string()))
	}
}
