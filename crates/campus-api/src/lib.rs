// Backend access for the academic structure navigator
// This crate provides the entity types, the read-only Backend trait and its
// REST and in-memory implementations

mod backend;
mod config;
mod entities;
mod http;
mod memory;

pub use backend::Backend;
pub use config::ApiConfig;
pub use entities::{
    AcademicYear, Batch, PracticalBatch, Program, Regulation, Section, Semester, Subject,
    SubjectType,
};
pub use http::HttpBackend;
pub use memory::{Endpoint, InMemoryBackend};
