pub mod document;
pub mod format;
pub mod front_matter;
pub mod key_map;

pub use document::{split_document, MarkdownConverter, SplitDocument};
pub use format::{Format, Metadata};
pub use front_matter::{FrontMatterConverter, FRONT_MATTER_DELIMITER};
pub use key_map::{Direction, KeyMap};
