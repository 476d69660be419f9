//! a2conv - Apple II graphics converter
//!
//! PNG in, Apple II double hi-res, lo-res and super hi-res files out.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
