// ABOUTME: Core types and constants for the recipe rotation job
// ABOUTME: Foundation crate with error handling, recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! rotation job. It changes rarely, so the main crate recompiles faster.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Table/column names, flag encodings and configuration defaults
//! - **models**: The `Recipe` record and its `Y`/`N` flag encoding

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Recipe data model
pub mod models;
