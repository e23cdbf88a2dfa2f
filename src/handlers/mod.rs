mod get_file;
mod health;
mod index;
mod list_files;
mod not_found;

pub use get_file::get_file;
pub use health::health;
pub use index::index;
pub use list_files::list_files;
pub use not_found::not_found;
