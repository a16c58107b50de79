use std::fmt;

use regex::NoExpand;
use regex::Regex;

use crate::DocsError;
use crate::DocsResult;

/// A placeholder inside an example body that is replaced with a runtime
/// value.
///
/// String tokens match as plain substrings, with no regard for identifier
/// boundaries: replacing `x` in `const x = 1` also looks at the `x` in
/// `max`. Use a [`Regex`] token when that matters.
#[derive(Debug, Clone)]
pub enum Token {
	Literal(String),
	Pattern(Regex),
}

impl Token {
	/// Number of non-overlapping occurrences of the token in `text`.
	pub fn count_in(&self, text: &str) -> usize {
		match self {
			Self::Literal(literal) => text.matches(literal.as_str()).count(),
			Self::Pattern(pattern) => pattern.find_iter(text).count(),
		}
	}

	/// Replace every occurrence of the token in `text` with `value`, which is
	/// inserted as is.
	pub fn replace_in(&self, text: &str, value: &str) -> String {
		match self {
			Self::Literal(literal) => text.replace(literal.as_str(), value),
			Self::Pattern(pattern) => pattern.replace_all(text, NoExpand(value)).into_owned(),
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(literal) => write!(f, "`{literal}`"),
			Self::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
		}
	}
}

impl From<&str> for Token {
	fn from(value: &str) -> Self {
		Self::Literal(value.to_string())
	}
}

impl From<String> for Token {
	fn from(value: String) -> Self {
		Self::Literal(value)
	}
}

impl From<Regex> for Token {
	fn from(value: Regex) -> Self {
		Self::Pattern(value)
	}
}

impl From<&Regex> for Token {
	fn from(value: &Regex) -> Self {
		Self::Pattern(value.clone())
	}
}

/// Replace `token` with `value` in the body of every code block matched by
/// `pattern`.
///
/// The token must occur exactly once in each body. The first body where it
/// doesn't aborts the whole replacement with [`DocsError::TokenCount`].
pub fn replace_token(
	content: &str,
	pattern: &Regex,
	example: &str,
	token: &Token,
	value: &str,
) -> DocsResult<String> {
	let mut result = String::with_capacity(content.len() + value.len());
	let mut last = 0;

	for captures in pattern.captures_iter(content) {
		let Some(body) = captures.name("body") else {
			continue;
		};

		let count = token.count_in(body.as_str());
		if count != 1 {
			return Err(DocsError::TokenCount {
				example: example.to_string(),
				token: token.to_string(),
				count,
			});
		}

		result.push_str(&content[last..body.start()]);
		result.push_str(&token.replace_in(body.as_str(), value));
		last = body.end();
	}

	result.push_str(&content[last..]);
	Ok(result)
}
