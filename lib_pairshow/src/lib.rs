pub mod error;
pub mod plain_text;
