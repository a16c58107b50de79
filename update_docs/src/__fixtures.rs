use crate::BlockSyntax;
use crate::DefaultSyntax;
use crate::FileStore;
use crate::TestBlockPattern;
use crate::UpdateDocs;
use crate::UpdateDocsConfig;

pub const GREET_TEST: &str = "// start docs greet\nconst x = 1\n// end docs greet";
pub const GREET_DOC: &str = "<!---greet--> ```js\nold\n```";

pub fn test_pattern() -> TestBlockPattern {
	DefaultSyntax
		.test_block_pattern()
		.unwrap_or_else(|e| panic!("test pattern: {e}"))
}

pub fn docs_pattern(name: Option<&str>) -> regex::Regex {
	DefaultSyntax
		.documentation_block_pattern(name)
		.unwrap_or_else(|e| panic!("documentation pattern: {e}"))
}

/// An `UpdateDocs` over in-memory files.
pub fn docs_with(documentation: &[(&str, &str)], tests: &[(&str, &str)]) -> UpdateDocs {
	let mut store = FileStore::new();
	for (path, contents) in documentation {
		store.add_documentation(*path, *contents);
	}
	for (path, contents) in tests {
		store.add_test(*path, *contents);
	}

	UpdateDocs::from_store(UpdateDocsConfig::default(), store)
}

pub fn contents_of(docs: &UpdateDocs, path: &str) -> String {
	docs.store()
		.get(std::path::Path::new(path))
		.unwrap_or_else(|| panic!("missing file `{path}`"))
		.contents()
		.to_string()
}
