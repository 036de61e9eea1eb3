// ABOUTME: Email body formatting for the selected recipe batch
// ABOUTME: Renders recipes as an HTML list document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Output formatting
//!
//! The weekly email is a static HTML document with one list entry per
//! recipe. Names and sources are escaped before they are placed in markup.

pub mod html;

pub use html::{render_email_document, render_recipe_entry, render_recipe_list};
