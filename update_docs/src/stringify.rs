use serde_json::Value;

use crate::config::DEFAULT_MAX_LINE_LENGTH;

/// Turns a non-string token value into the text inserted into an example.
///
/// Any `Fn(&Value) -> String` closure can be used as a stringifier.
pub trait Stringify {
	fn stringify(&self, value: &Value) -> String;
}

impl<F> Stringify for F
where
	F: Fn(&Value) -> String,
{
	fn stringify(&self, value: &Value) -> String {
		self(value)
	}
}

/// JSON printer that keeps values on one line while they fit and otherwise
/// puts one array item or object entry per line.
///
/// ```rust
/// use update_docs::PrettyCompact;
/// use update_docs::Stringify;
///
/// let printer = PrettyCompact::new("  ");
/// let value = serde_json::json!({ "sum": 4, "terms": [2, 2] });
/// assert_eq!(printer.stringify(&value), r#"{ "sum": 4, "terms": [ 2, 2 ] }"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyCompact {
	indent: String,
	max_length: usize,
	margins: bool,
}

impl PrettyCompact {
	pub fn new(indent: impl Into<String>) -> Self {
		Self {
			indent: indent.into(),
			max_length: DEFAULT_MAX_LINE_LENGTH,
			margins: true,
		}
	}

	#[must_use]
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	/// Whether single-line arrays and objects get a space inside their
	/// brackets.
	#[must_use]
	pub fn with_margins(mut self, margins: bool) -> Self {
		self.margins = margins;
		self
	}

	fn render(&self, value: &Value, current_indent: &str, reserved: usize) -> String {
		let compact = value.to_string();
		let prettified = prettify(&compact, self.margins);
		if self.fits(&prettified, current_indent, reserved) {
			return prettified;
		}

		let next_indent = format!("{current_indent}{}", self.indent);
		let (start, end, items): (char, char, Vec<String>) = match value {
			Value::Array(values) if !values.is_empty() => {
				let last = values.len() - 1;
				let items = values
					.iter()
					.enumerate()
					.map(|(index, item)| self.render(item, &next_indent, usize::from(index != last)))
					.collect();
				('[', ']', items)
			}
			Value::Object(entries) if !entries.is_empty() => {
				let last = entries.len() - 1;
				let items = entries
					.iter()
					.enumerate()
					.map(|(index, (key, item))| {
						let key = format!("{}: ", Value::String(key.clone()));
						let reserved = key.chars().count() + usize::from(index != last);
						format!("{key}{}", self.render(item, &next_indent, reserved))
					})
					.collect();
				('{', '}', items)
			}
			_ => return compact,
		};

		let separator = format!(",\n{next_indent}");
		format!(
			"{start}\n{next_indent}{}\n{current_indent}{end}",
			items.join(&separator)
		)
	}

	fn fits(&self, text: &str, current_indent: &str, reserved: usize) -> bool {
		// An empty indent can't express nesting, so everything stays inline.
		if self.indent.is_empty() {
			return true;
		}

		self.max_length
			.checked_sub(current_indent.chars().count() + reserved)
			.is_some_and(|available| text.chars().count() <= available)
	}
}

impl Stringify for PrettyCompact {
	fn stringify(&self, value: &Value) -> String {
		self.render(value, "", 0)
	}
}

/// Add a space after `,` and `:` outside of string literals, and inside
/// non-empty brackets when `margins` is set.
fn prettify(json: &str, margins: bool) -> String {
	let mut output = String::with_capacity(json.len() * 2);
	let mut chars = json.chars().peekable();
	let mut in_string = false;
	let mut escaped = false;

	while let Some(ch) = chars.next() {
		if in_string {
			output.push(ch);
			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == '"' {
				in_string = false;
			}
			continue;
		}

		match ch {
			'"' => {
				in_string = true;
				output.push(ch);
			}
			',' | ':' => {
				output.push(ch);
				output.push(' ');
			}
			'{' | '[' => {
				output.push(ch);
				if margins && !matches!(chars.peek(), Some('}' | ']')) {
					output.push(' ');
				}
			}
			'}' | ']' => {
				if margins && !output.ends_with(['{', '[']) {
					output.push(' ');
				}
				output.push(ch);
			}
			_ => output.push(ch),
		}
	}

	output
}
