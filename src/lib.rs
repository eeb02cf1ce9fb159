//! h2h: convert static-site post front matter between Hexo and Hugo
//!
//! Posts carry a metadata block between two `---` lines. This library reads
//! that block as YAML or TOML, renames the keys that differ between the two
//! platforms (`permalink`/`slug`, `updated`/`lastmod`, `sticky`/`weight`),
//! writes it back in either format, and leaves the body untouched. It can do
//! that for a single string or for a whole directory tree.
//!
//! # Quick Start
//!
//! ## Converting a single document
//!
//! ```rust
//! use h2h::{Direction, Format, FrontMatterConverter, MarkdownConverter, Result};
//!
//! fn main() -> Result<()> {
//!     let converter = MarkdownConverter::new(FrontMatterConverter::new(
//!         Format::Yaml,
//!         Format::Toml,
//!         Direction::HexoToHugo.key_map(),
//!     ));
//!
//!     let output = converter.convert("---\ntitle: Hello\npermalink: /x\n---\nBody")?;
//!     assert_eq!(output, "---\nslug = \"/x\"\ntitle = \"Hello\"\n---\n\nBody");
//!     Ok(())
//! }
//! ```
//!
//! ## Converting a directory tree
//!
//! ```rust,no_run
//! use h2h::{convert_tree, ConvertConfig, Direction, Format, H2hError};
//!
//! let config = ConvertConfig::default()
//!     .with_target_format(Format::Toml)
//!     .with_direction(Direction::HexoToHugo)
//!     .with_max_concurrency(4);
//!
//! match convert_tree("source/_posts", "content/posts", &config) {
//!     Ok(summary) => println!("Processed {} files", summary.converted),
//!     Err(H2hError::Conversion { summary }) => {
//!         for failure in &summary.failures {
//!             eprintln!("Error: {}", failure);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`](crate::core): formats, key tables, front matter and document conversion
//! - [`io`]: file enumeration and atomic writes
//! - [`ops`]: the concurrent directory conversion
//! - [`config`]: run configuration
//! - [`error`]: error taxonomy

// Public API exports
pub use crate::error::{H2hError, Result};

pub use crate::config::ConvertConfig;
pub use crate::core::{
    split_document, Direction, Format, FrontMatterConverter, KeyMap, MarkdownConverter, Metadata,
};
pub use crate::ops::{convert_file, convert_tree, ConversionSummary, FileFailure};

pub mod args;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod ops;
