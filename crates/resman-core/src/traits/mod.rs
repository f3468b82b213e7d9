//! Core traits for resman backends.

mod client;

pub use client::*;
