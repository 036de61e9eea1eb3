// ABOUTME: Configuration management module for the rotation job
// ABOUTME: Loads database, email and selection settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org
//! Configuration module
//!
//! All configuration comes from environment variables:
//!
//! - **Environment**: top-level `RotationConfig` and the parsing helpers
//! - **Database**: connection URL (split MySQL credentials or a full URL)
//! - **Email**: provider endpoint, credentials, sender and recipients

/// Top-level configuration loaded from the environment
pub mod environment;

/// Database connection configuration
pub mod database;

/// Email delivery configuration
pub mod email;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use email::EmailConfig;
pub use environment::RotationConfig;
