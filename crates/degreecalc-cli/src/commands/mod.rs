pub mod evaluate;
pub mod export;
pub mod init;
pub mod schema;
pub mod validate;
