pub mod comments;
pub mod search;
