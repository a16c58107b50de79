use regex::Regex;

use crate::ExampleMap;

/// Replace the body of every anchored code block in `content` with the
/// examples collected for the anchor's name.
///
/// The anchor, the whitespace after it and both fences are copied unchanged.
/// The new body is the joined examples on their own lines, so an anchor with
/// no collected examples ends up with an empty code block.
pub fn replace_examples(content: &str, examples: &ExampleMap, pattern: &Regex) -> String {
	let mut result = String::with_capacity(content.len());
	let mut last = 0;
	let mut replaced = 0;

	for captures in pattern.captures_iter(content) {
		let (Some(name), Some(body)) = (captures.name("name"), captures.name("body")) else {
			continue;
		};
		let name = name.as_str();

		if examples.blocks(name).is_empty() {
			tracing::warn!(name, "no examples collected for anchor");
		}

		result.push_str(&content[last..body.start()]);
		result.push('\n');
		result.push_str(&examples.joined(name));
		result.push('\n');
		last = body.end();
		replaced += 1;
	}

	result.push_str(&content[last..]);
	tracing::trace!(replaced, "replaced anchored code blocks");

	result
}
