//! Core library for fieldtools
//!
//! This crate implements the **Functional Core** of the fieldtools
//! application, following the Functional Core - Imperative Shell
//! architectural pattern.
//!
//! # Architecture Overview
//!
//! The fieldtools project uses a two-crate architecture to enforce separation
//! of concerns:
//!
//! - **`fieldtools_core`** (this crate): Pure field-normalization logic with
//!   zero I/O
//! - **`fieldtools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! Everything lives under [`fields`], split by concern:
//!
//! - [`fields::catalog`]: the closed table of canonical field-type names
//! - [`fields::descriptor`]: resolved-field model and wire-response matching
//! - [`fields::coder`]: per-category value encoding and decoding
//! - [`fields::cascading`]: the textual cascading-select grammar
//! - [`fields::options`]: membership editing for multi-valued fields
//! - [`fields::payload`]: submission bodies for the issue edit endpoint
//! - [`fields::error`]: the error taxonomy shared by all of the above
//!
//! The shell fetches documents over HTTP and hands them to this crate; this
//! crate decides what the next request body must look like.

pub mod fields;
