pub mod fs;

pub use fs::{collect_files, has_suffix, mirror_path, read_to_string, write_atomic};
