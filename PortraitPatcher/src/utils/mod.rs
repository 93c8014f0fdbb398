//! Utility functions

pub mod backup;
pub mod path;
pub mod tree;

pub use backup::{BACKUP_EXTENSION, ModWriter, WriteMode, backup_path, file_or_backup};
pub use path::{join_mod_path, normalize_lexically, normalize_path, relative_path};
pub use tree::clone_dir_tree;
