use std::collections::HashMap;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::DocsResult;
use crate::syntax::TestBlockPattern;

/// Examples collected from test sources, keyed by example name.
///
/// Each name maps to every block found for it, in the order the blocks were
/// encountered. Names that were never collected resolve to an empty slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct ExampleMap(HashMap<String, Vec<String>>);

impl ExampleMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// The blocks collected for `name`.
	pub fn blocks(&self, name: &str) -> &[String] {
		self.0.get(name).map_or(&[], Vec::as_slice)
	}

	/// All blocks for `name` joined with newlines.
	pub fn joined(&self, name: &str) -> String {
		self.blocks(name).join("\n")
	}

	pub fn push(&mut self, name: impl Into<String>, code: impl Into<String>) {
		self.0.entry(name.into()).or_default().push(code.into());
	}
}

/// Collect the examples from every test source in `sources`, in order.
pub fn collect_examples<'a>(
	sources: impl IntoIterator<Item = &'a str>,
	pattern: &TestBlockPattern,
) -> DocsResult<ExampleMap> {
	let mut examples = ExampleMap::new();

	for source in sources {
		scan(source, pattern, &mut examples)?;
	}

	tracing::debug!(names = examples.len(), "collected examples");
	Ok(examples)
}

/// Scan `text` for marker pairs. Each captured body is dedented, recorded and
/// then scanned again for nested examples.
fn scan(text: &str, pattern: &TestBlockPattern, examples: &mut ExampleMap) -> DocsResult<()> {
	let mut cursor = 0;

	while let Some(start) = pattern.start().captures_at(text, cursor) {
		let Some(marker) = start.get(0) else {
			break;
		};
		let body_start = marker.end();
		// A marker at the very end of the text can't have a body.
		let Some(first) = text[body_start..].chars().next() else {
			break;
		};
		let Some(name) = start.name("name") else {
			cursor = next_char_boundary(text, marker.start());
			continue;
		};

		// The body holds at least one character before the end marker.
		let Some(end) = pattern
			.end(name.as_str())?
			.find_at(text, body_start + first.len_utf8())
		else {
			tracing::trace!(name = name.as_str(), "unterminated example");
			cursor = body_start.max(next_char_boundary(text, marker.start()));
			continue;
		};

		let indent = start.name("indent").map_or("", |m| m.as_str());
		let code = dedent(&text[body_start..end.start()], indent);
		tracing::trace!(name = name.as_str(), lines = code.lines().count(), "found example");

		examples.push(name.as_str(), code.clone());
		scan(&code, pattern, examples)?;

		cursor = end.end().max(next_char_boundary(text, marker.start()));
	}

	Ok(())
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
	text[offset..]
		.chars()
		.next()
		.map_or(text.len(), |c| offset + c.len_utf8())
}

/// Remove `indent` from the start of every line that begins with it. Lines
/// without the prefix are left unchanged.
pub fn dedent(code: &str, indent: &str) -> String {
	if indent.is_empty() {
		return code.to_string();
	}

	code.split('\n')
		.map(|line| line.strip_prefix(indent).unwrap_or(line))
		.collect::<Vec<_>>()
		.join("\n")
}
