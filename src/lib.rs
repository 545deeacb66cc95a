// src/lib.rs

//! Shelfmark: borrowing-state logic for a campus library's admin and
//! student portals.

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
