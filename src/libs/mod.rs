pub mod aggregate;
pub mod classify;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod pipeline;
pub mod schema;
pub mod table;
pub mod time;
pub mod view;
