pub mod common;
pub mod completions;
pub mod image;
pub mod login;
pub mod note;
pub mod reset;
pub mod share;
pub mod status;
