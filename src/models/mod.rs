//! Data models for the employee service.
//!
//! The record is what the database stores; the representation is what travels over HTTP.

mod employee;

pub use employee::*;
