// ABOUTME: HTML rendering for recipe list entries and the email document
// ABOUTME: Link sources become anchors, other sources are shown as plain text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::models::Recipe;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Render one `<li>` for a recipe
///
/// A source containing `https` becomes a "View recipe" link; any other
/// non-empty source is appended as text.
#[must_use]
pub fn render_recipe_entry(recipe: &Recipe) -> String {
    let name = encode_text(&recipe.name);
    let source = recipe.source.trim();

    if source.is_empty() {
        format!("<li><strong>{name}</strong></li>")
    } else if recipe.has_link_source() {
        format!(
            "<li><strong>{name}</strong> - <a href=\"{}\">View recipe</a></li>",
            encode_double_quoted_attribute(source)
        )
    } else {
        format!("<li><strong>{name}</strong> - {}</li>", encode_text(source))
    }
}

/// Render the `<ul>` wrapping every entry, in batch order
#[must_use]
pub fn render_recipe_list(recipes: &[Recipe]) -> String {
    let mut list = String::from("<ul>\n");
    for recipe in recipes {
        let _ = writeln!(list, "  {}", render_recipe_entry(recipe));
    }
    list.push_str("</ul>");
    list
}

/// Render the complete email document
#[must_use]
pub fn render_email_document(recipes: &[Recipe]) -> String {
    let body = if recipes.is_empty() {
        "<p>No recipes are in the rotation yet.</p>".to_owned()
    } else {
        render_recipe_list(recipes)
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>This week's recipes</title></head>\n\
         <body>\n\
         <h2>This week's recipes</h2>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_source_renders_anchor() {
        let recipe = Recipe::new("Dal", "https://example.com/dal?a=1&b=2", true);
        assert_eq!(
            render_recipe_entry(&recipe),
            "<li><strong>Dal</strong> - <a href=\"https://example.com/dal?a=1&amp;b=2\">View recipe</a></li>"
        );
    }

    #[test]
    fn test_plain_source_renders_text() {
        let recipe = Recipe::new("Bolognese", "Nonna's <notebook>", false);
        assert_eq!(
            render_recipe_entry(&recipe),
            "<li><strong>Bolognese</strong> - Nonna's &lt;notebook&gt;</li>"
        );
        // plain http is not a link
        let recipe = Recipe::new("Soup", "http://example.com/soup", false);
        assert!(!render_recipe_entry(&recipe).contains("<a "));
    }

    #[test]
    fn test_empty_source_renders_name_only() {
        let recipe = Recipe::new("Tacos & Salsa", "  ", false);
        assert_eq!(
            render_recipe_entry(&recipe),
            "<li><strong>Tacos &amp; Salsa</strong></li>"
        );
    }

    #[test]
    fn test_document_keeps_batch_order() {
        let recipes = [
            Recipe::new("Tacos", "", false),
            Recipe::new("Dal", "https://example.com/dal", true),
        ];
        let html = render_email_document(&recipes);
        let tacos = html.find("Tacos").unwrap_or(usize::MAX);
        let dal = html.find("Dal").unwrap_or(0);
        assert!(tacos < dal);
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_empty_batch_document() {
        let html = render_email_document(&[]);
        assert!(html.contains("No recipes"));
        assert!(!html.contains("<ul>"));
    }
}
