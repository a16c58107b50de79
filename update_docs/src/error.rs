use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocsError {
	#[error(transparent)]
	#[diagnostic(code(update_docs::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{}`", .path.display())]
	#[diagnostic(code(update_docs::file_read))]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write `{}`", .path.display())]
	#[diagnostic(code(update_docs::file_write))]
	FileWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("token {token} appeared {count} times in example `{example}`")]
	#[diagnostic(
		code(update_docs::token_count),
		help("a token must occur exactly once in every code block labelled `{example}`")
	)]
	TokenCount {
		example: String,
		token: String,
		count: usize,
	},

	#[error("invalid block pattern: {0}")]
	#[diagnostic(code(update_docs::invalid_pattern))]
	InvalidPattern(#[from] regex::Error),

	#[error("end marker template `{template}` does not contain `{{name}}`")]
	#[diagnostic(
		code(update_docs::missing_name_placeholder),
		help("an end marker must repeat the example name, e.g. `// end docs {{name}}`")
	)]
	MissingNamePlaceholder { template: String },

	#[error("invalid glob `{glob}`: {reason}")]
	#[diagnostic(code(update_docs::invalid_glob))]
	InvalidGlob { glob: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(update_docs::config_parse),
		help("check that update-docs.toml is valid TOML with `documentation_globs` and `test_globs`")
	)]
	ConfigParse(String),

	#[error("no config file found in `{}`", .root.display())]
	#[diagnostic(
		code(update_docs::config_not_found),
		help("create an `update-docs.toml` file or construct `UpdateDocsConfig` directly")
	)]
	ConfigNotFound { root: PathBuf },

	#[error("failed to serialize token value: {0}")]
	#[diagnostic(code(update_docs::serialize))]
	Serialize(#[from] serde_json::Error),

	#[error("files have not been read yet")]
	#[diagnostic(
		code(update_docs::not_loaded),
		help("call `read()` before updating or writing documentation")
	)]
	NotLoaded,
}

pub type DocsResult<T> = Result<T, DocsError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
