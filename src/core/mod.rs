//! Core building blocks: the store contract and its backends, the editor and
//! scratch file collaborators, configuration, and the edit session itself.

pub mod annotation;
pub mod config;
pub mod editor;
pub mod error;
pub mod kind;
pub mod logging;
pub mod memory_store;
pub mod redis_store;
pub mod scratch;
pub mod session;
pub mod store;
