//! firstrep - rotating workout generator with history and personal records
//!
//! The engine picks the next split and variation, annotates each exercise
//! with rest guidance, and keeps history and PRs in a key-value store.

pub mod chat;
pub mod db;
pub mod error;
pub mod export;
pub mod history;
pub mod library;
pub mod records;
pub mod rest;
pub mod rotation;
pub mod session;
pub mod split;
pub mod store;
pub mod tracker;
pub mod tui;

pub use db::Database;
pub use tracker::Tracker;
