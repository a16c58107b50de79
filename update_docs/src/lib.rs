//! `update_docs` keeps the code examples in your documentation identical to
//! the tests they come from, and lets those tests write the values they
//! compute back into the examples.
//!
//! ## How it works
//!
//! ```text
//! Test sources                       Documentation
//!   // start docs Name                 <!---Name-->
//!   ...code...          ──collect──▶   ```rust
//!   // end docs Name                   ...code...
//!                                      ```
//! ```
//!
//! 1. Examples are marked in test sources with `// start docs Name` and
//!    `// end docs Name` comments. Blocks can be nested and the same name can
//!    be used several times; the blocks are joined in the order they appear.
//! 2. Each marked block is dedented by the indentation of its start marker.
//! 3. In documentation, a `<!---Name-->` comment followed by a fenced code
//!    block receives the examples collected for `Name`. Only the body of the
//!    code block changes.
//! 4. Tests call [`UpdateDocs::replace_token`] to put computed values into an
//!    example, and [`UpdateDocs::write`] saves the documentation files.
//!
//! ## Modules
//!
//! - [`config`] — [`UpdateDocsConfig`] and `update-docs.toml` loading.
//! - [`syntax`] — the [`BlockSyntax`] trait and the default marker syntax.
//! - [`collector`] — collecting examples from test sources into an
//!   [`ExampleMap`].
//! - [`replacer`] — rewriting anchored code blocks in documentation.
//! - [`token`] — replacing a unique [`Token`] with a value.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use update_docs::UpdateDocs;
//! use update_docs::UpdateDocsConfig;
//!
//! let config = UpdateDocsConfig::new(["**/*.md"], ["tests/**/*.rs"], "  ");
//! let mut docs = UpdateDocs::new(config).unwrap();
//! docs.update_examples().unwrap();
//!
//! // start docs Addition
//! let sum = 2 + 2; // {{sum}}
//! // end docs Addition
//! docs.replace_token("Addition", "{{sum}}", &sum).unwrap();
//!
//! docs.write().unwrap();
//! ```

pub use collector::ExampleMap;
pub use config::*;
pub use error::*;
pub use store::*;
pub use stringify::*;
pub use syntax::BlockSyntax;
pub use syntax::DefaultSyntax;
pub use syntax::TestBlockPattern;
pub use token::Token;
pub use update_docs::*;

pub mod collector;
pub mod config;
mod discovery;
#[allow(unused_assignments)]
mod error;
pub mod replacer;
mod store;
mod stringify;
pub mod syntax;
pub mod token;
mod update_docs;

#[cfg(test)]
mod __fixtures;
