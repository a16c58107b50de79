use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobMatcher;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::DocsError;
use crate::DocsResult;

/// A file found below the root, with its `/`-separated relative path.
pub type Candidate = (String, PathBuf);

/// An ordered list of compiled globs.
#[derive(Debug)]
pub struct GlobList {
	globs: Vec<String>,
	matchers: Vec<GlobMatcher>,
	/// The leading literal directories of each glob, e.g. `.github` for
	/// `.github/*.md`.
	literal_prefixes: Vec<String>,
}

impl GlobList {
	pub fn new(globs: &[String]) -> DocsResult<Self> {
		let globs = globs
			.iter()
			.map(|glob| glob.strip_prefix("./").unwrap_or(glob).to_string())
			.collect::<Vec<_>>();
		let matchers = globs
			.iter()
			.map(|glob| build_glob_matcher(glob))
			.collect::<DocsResult<Vec<_>>>()?;
		let literal_prefixes = globs.iter().map(|glob| literal_prefix(glob)).collect();

		Ok(Self {
			globs,
			matchers,
			literal_prefixes,
		})
	}

	pub fn is_empty(&self) -> bool {
		self.globs.is_empty()
	}

	/// Whether a glob spells out the directory `relative` (or a directory
	/// below it) without wildcards.
	pub fn names_directory(&self, relative: &str) -> bool {
		self.literal_prefixes.iter().any(|prefix| {
			prefix == relative
				|| prefix
					.strip_prefix(relative)
					.is_some_and(|rest| rest.starts_with('/'))
		})
	}

	/// The candidates matched by the first glob in order, then those of the
	/// second glob that weren't already listed, and so on.
	pub fn select(&self, candidates: &[Candidate]) -> Vec<PathBuf> {
		let mut seen = HashSet::new();
		let mut files = Vec::new();
		for matcher in &self.matchers {
			for (relative, path) in candidates {
				if matcher.is_match(relative) && seen.insert(path) {
					files.push(path.clone());
				}
			}
		}

		tracing::debug!(globs = ?self.globs, count = files.len(), "matched files");
		files
	}
}

/// Walk `root` once and return every file that any of `lists` may select,
/// sorted by relative path.
///
/// Hidden directories, `node_modules` and `target` are skipped unless a glob
/// names them literally, so `.github/*.md` matches while `**/*.md` doesn't
/// descend into `.github`.
pub fn collect_candidates(
	root: &Path,
	lists: &[&GlobList],
	disable_gitignore: bool,
) -> DocsResult<Vec<Candidate>> {
	if lists.iter().all(|list| list.is_empty()) {
		return Ok(Vec::new());
	}

	let gitignore = if disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};

	let mut walker = Walker {
		root,
		lists,
		gitignore: &gitignore,
		visited_dirs: HashSet::new(),
		files: Vec::new(),
	};
	walker.walk_dir(root)?;

	let mut candidates = walker.files;
	candidates.sort();
	tracing::debug!(root = %root.display(), count = candidates.len(), "walked files");
	Ok(candidates)
}

fn build_glob_matcher(glob: &str) -> DocsResult<GlobMatcher> {
	GlobBuilder::new(glob)
		.literal_separator(true)
		.build()
		.map(|glob| glob.compile_matcher())
		.map_err(|e| {
			DocsError::InvalidGlob {
				glob: glob.to_string(),
				reason: e.kind().to_string(),
			}
		})
}

/// The directory components of `glob` before its first wildcard.
fn literal_prefix(glob: &str) -> String {
	let components = glob.split('/').collect::<Vec<_>>();
	let directories = &components[..components.len().saturating_sub(1)];

	directories
		.iter()
		.take_while(|component| !component.contains(['*', '?', '[', '{', '\\']))
		.copied()
		.collect::<Vec<_>>()
		.join("/")
}

/// Build a `Gitignore` matcher from the root's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
	let relative = path.strip_prefix(root).ok()?;
	let relative = relative
		.components()
		.map(|component| component.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/");

	Some(relative)
}

struct Walker<'a> {
	root: &'a Path,
	lists: &'a [&'a GlobList],
	gitignore: &'a Gitignore,
	visited_dirs: HashSet<PathBuf>,
	files: Vec<Candidate>,
}

impl Walker<'_> {
	fn is_skipped_directory(&self, path: &Path) -> bool {
		let ignored_name = path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(is_ignored_directory_name);
		if !ignored_name {
			return false;
		}

		relative_path(self.root, path)
			.is_none_or(|relative| !self.lists.iter().any(|list| list.names_directory(&relative)))
	}

	/// Collect every file below `dir`.
	fn walk_dir(&mut self, dir: &Path) -> DocsResult<()> {
		// Symlinked directories are only walked once.
		let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
		if !self.visited_dirs.insert(canonical) {
			return Ok(());
		}

		let entries = std::fs::read_dir(dir).map_err(|source| {
			DocsError::FileRead {
				path: dir.to_path_buf(),
				source,
			}
		})?;

		for entry in entries {
			let path = entry?.path();
			let is_dir = path.is_dir();

			if is_dir && self.is_skipped_directory(&path) {
				tracing::trace!(path = %path.display(), "skipped directory");
				continue;
			}

			if self.gitignore.matched(&path, is_dir).is_ignore() {
				continue;
			}

			if is_dir {
				self.walk_dir(&path)?;
			} else if let Some(relative) = relative_path(self.root, &path) {
				self.files.push((relative, path));
			}
		}

		Ok(())
	}
}
