pub mod application;
pub mod catalog;
pub mod config;
pub mod consultation;
pub mod error;
pub mod lead;
pub mod memory;
pub mod post;
pub mod status;
pub mod store;
pub mod validate;

pub use error::{Result, ZenithError};
pub use store::{Backend, ObjectStorage, Store};
