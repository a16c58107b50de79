//! Patterns that locate examples in test sources and their anchors in
//! documentation.
//!
//! The default syntax marks an example in a test file with a pair of line
//! comments:
//!
//! ```text
//! // start docs My Example
//! let value = 2 + 2;
//! // end docs My Example
//! ```
//!
//! and the documentation side with an HTML comment directly above a fenced
//! code block:
//!
//! ````markdown
//! <!---My Example-->
//! ```rust
//! let value = 2 + 2;
//! ```
//! ````
//!
//! Implement [`BlockSyntax`] and pass it to
//! [`UpdateDocs::with_syntax`](crate::UpdateDocs::with_syntax) to use a
//! different convention.

use regex::Regex;

use crate::DocsError;
use crate::DocsResult;

/// Placeholder replaced with the escaped example name in
/// [`TestBlockPattern`] end templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

const DEFAULT_TEST_START: &str = r"(?m)^(?P<indent>[^\S\n]*)// start docs (?P<name>[^\n]+)\n";
const DEFAULT_TEST_END: &str = r"\n[^\S\n]*// end docs {name}[^\S\n]*(?m:$)";
/// An anchor name: a single line that never contains `-->`.
const DEFAULT_ANCHOR_NAME: &str = r"(?:[^\n-]|-[^\n-]|--[^\n>])+?";

/// Produces the patterns used to find examples.
///
/// Documentation patterns must define the named groups `header`, `body` and
/// `footer`, and `name` when matching any example. Only the `body` is ever
/// rewritten; everything before and after it is kept verbatim.
pub trait BlockSyntax {
	/// The pattern for an anchor followed by a fenced code block.
	///
	/// With `Some(name)` it matches only anchors for that exact example. With
	/// `None` it matches every anchor and captures the example name in the
	/// `name` group.
	fn documentation_block_pattern(&self, name: Option<&str>) -> DocsResult<Regex>;

	/// The start and end markers delimiting an example in a test source.
	fn test_block_pattern(&self) -> DocsResult<TestBlockPattern>;
}

/// The `// start docs` / `<!---name-->` convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSyntax;

impl BlockSyntax for DefaultSyntax {
	fn documentation_block_pattern(&self, name: Option<&str>) -> DocsResult<Regex> {
		let name = name.map_or_else(|| DEFAULT_ANCHOR_NAME.to_string(), regex::escape);
		let pattern =
			format!(r"(?s)(?P<header><!---(?P<name>{name})-->\s*```[A-Za-z0-9]*)(?P<body>.+?)(?P<footer>```)");

		Ok(Regex::new(&pattern)?)
	}

	fn test_block_pattern(&self) -> DocsResult<TestBlockPattern> {
		TestBlockPattern::new(DEFAULT_TEST_START, DEFAULT_TEST_END)
	}
}

/// Start and end markers for examples in test sources.
///
/// The `start` pattern must capture the marker's leading whitespace as
/// `indent` and the example name as `name`; the example body begins right
/// after the match. The end marker is built per example from a template in
/// which [`NAME_PLACEHOLDER`] stands for the escaped name, so a block is only
/// ever closed by an end marker carrying the same name. Templates without the
/// placeholder are rejected. The example body ends
/// where the end marker match begins.
#[derive(Debug, Clone)]
pub struct TestBlockPattern {
	start: Regex,
	end_template: String,
}

impl TestBlockPattern {
	pub fn new(start: &str, end_template: &str) -> DocsResult<Self> {
		if !end_template.contains(NAME_PLACEHOLDER) {
			return Err(DocsError::MissingNamePlaceholder {
				template: end_template.to_string(),
			});
		}

		let pattern = Self {
			start: Regex::new(start)?,
			end_template: end_template.to_string(),
		};
		// Validate the template once with a placeholder name.
		pattern.end(NAME_PLACEHOLDER)?;

		Ok(pattern)
	}

	pub fn start(&self) -> &Regex {
		&self.start
	}

	/// The end marker pattern for the example `name`.
	pub fn end(&self, name: &str) -> DocsResult<Regex> {
		let pattern = self
			.end_template
			.replace(NAME_PLACEHOLDER, &regex::escape(name));

		Ok(Regex::new(&pattern)?)
	}
}
