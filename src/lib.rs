//! A tiny server-rendered blog: SQLite-backed posts served as HTML with an
//! HTMX-style partial refresh on create.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
