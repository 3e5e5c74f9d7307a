//! Salary Ledger Service
//!
//! This crate computes monthly salary records from employee attendance and
//! keeps exactly one record per employee and month. Generated records are
//! locked; only configured override roles may change a locked amount.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
