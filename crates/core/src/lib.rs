//! Functional core for kennel.
//!
//! Pure types and functions shared by the server: the dog record, request
//! validation, path id coercion, and the storage contract. Nothing in this
//! crate performs I/O.

pub mod dog;
pub mod storage;
