//! Libris application library
//!
//! Authors and books resources, their data access layer, and the start-up
//! glue shared by the binaries.

pub mod bootstrap;
pub mod catalog;
pub mod modules;
pub mod responses;
pub mod seed;
pub mod validation;
