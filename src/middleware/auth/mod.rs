pub mod access;

pub use access::{apply, extract_token};
