pub mod error;
pub mod notice;
