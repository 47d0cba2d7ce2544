// src/output/render.rs
//! Renders run results as plain text or JSON.

use crate::config::OutputFormat;
use crate::error::AppError;
use crate::types::{Category, CategoryInfo, PageRef};
use serde_json::json;

/// What a run found out about a category.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Listing(Vec<PageRef>),
    Info(CategoryInfo),
    Empty(bool),
    Hidden(bool),
}

pub fn render(
    category: &Category,
    outcome: &Outcome,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Plain => Ok(render_plain(outcome)),
        OutputFormat::Json => render_json(category, outcome),
    }
}

fn render_plain(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Listing(pages) => pages
            .iter()
            .map(|page| format!("{}\n", page.title()))
            .collect(),
        Outcome::Info(info) => format!(
            "pages: {}\nfiles: {}\nsubcats: {}\nsize: {}\n",
            info.pages, info.files, info.subcats, info.size
        ),
        Outcome::Empty(flag) | Outcome::Hidden(flag) => format!("{}\n", flag),
    }
}

fn render_json(category: &Category, outcome: &Outcome) -> Result<String, AppError> {
    let value = match outcome {
        Outcome::Listing(pages) => json!({
            "category": category.title(),
            "count": pages.len(),
            "members": pages,
        }),
        Outcome::Info(info) => json!({ "category": category.title(), "info": info }),
        Outcome::Empty(empty) => json!({ "category": category.title(), "empty": empty }),
        Outcome::Hidden(hidden) => json!({ "category": category.title(), "hidden": hidden }),
    };
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Namespace;

    fn category() -> Category {
        Category::new("Wikipedia legal policies").unwrap()
    }

    fn listing() -> Outcome {
        Outcome::Listing(vec![
            PageRef::new(Namespace::PROJECT, "Wikipedia:Disclaimers"),
            PageRef::new(Namespace::CATEGORY, "Category:Wikipedia copyright"),
        ])
    }

    #[test]
    fn test_plain_listing() {
        let out = render(&category(), &listing(), OutputFormat::Plain).unwrap();
        insta::assert_snapshot!(out, @r"
        Wikipedia:Disclaimers
        Category:Wikipedia copyright
        ");
    }

    #[test]
    fn test_plain_flag() {
        let out = render(&category(), &Outcome::Hidden(false), OutputFormat::Plain).unwrap();
        assert_eq!(out, "false\n");
    }

    #[test]
    fn test_json_listing() {
        let out = render(&category(), &listing(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["category"], "Category:Wikipedia legal policies");
        assert_eq!(value["count"], 2);
        assert_eq!(value["members"][0]["ns"], 4);
        assert_eq!(value["members"][0]["title"], "Wikipedia:Disclaimers");
    }

    #[test]
    fn test_json_info() {
        let info = CategoryInfo {
            pages: 3,
            files: 0,
            subcats: 1,
            size: 4,
        };
        let out = render(&category(), &Outcome::Info(info), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "category": "Category:Wikipedia legal policies",
                "info": { "pages": 3, "files": 0, "subcats": 1, "size": 4 }
            })
        );
    }
}
