//! External collaborators and glue pipelines.

pub mod identity;
pub mod import;
pub mod speech;
pub mod storage;
pub mod translate;
