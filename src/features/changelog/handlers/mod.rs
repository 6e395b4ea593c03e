pub mod changelog_handler;

pub use changelog_handler::{__path_list_changelog, list_changelog};
