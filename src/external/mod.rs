// ABOUTME: External API client modules (transactional email)
// ABOUTME: Provides recipe email delivery over an HTTP email API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! External API Clients
//!
//! This module contains clients for external APIs used by the rotation job.

pub mod email_client;

// Re-export commonly used types
pub use email_client::{
    deliver, DeliveryOutcome, EmailBody, EmailMessage, EmailSender, HttpEmailClient,
    MockEmailSender,
};
