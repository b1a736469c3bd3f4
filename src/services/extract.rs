//! Guarded HTML accessors.
//!
//! Every lookup returns `Option` or an empty `Vec` when a node is missing, so
//! a page with a section removed degrades field by field instead of failing.

use scraper::{ElementRef, Selector};

/// First descendant matching a CSS selector.
pub fn find<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// All descendants matching a CSS selector, in document order.
pub fn find_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    scope.select(&selector).collect()
}

/// First descendant carrying a class.
pub fn find_class<'a>(scope: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    find(scope, &format!(".{class}"))
}

/// All descendants carrying a class.
pub fn find_all_class<'a>(scope: ElementRef<'a>, class: &str) -> Vec<ElementRef<'a>> {
    find_all(scope, &format!(".{class}"))
}

/// Concatenated text of an element, trimmed.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text with every whitespace run collapsed to one space.
pub fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Attribute value of an element.
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

/// Normalized text of the first `tag` inside the first element classed `class`.
pub fn tag_text_by_class(scope: ElementRef<'_>, class: &str, tag: &str) -> Option<String> {
    let container = find_class(scope, class)?;
    let inner = find(container, tag)?;
    Some(normalized_text(inner))
}

/// Normalized text of the first paragraph inside the first element classed `class`.
pub fn p_text_by_class(scope: ElementRef<'_>, class: &str) -> Option<String> {
    tag_text_by_class(scope, class, "p")
}

/// Which table section to read rows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSection {
    Head,
    Body,
}

impl TableSection {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            Self::Head => ("thead", "th"),
            Self::Body => ("tbody", "td"),
        }
    }
}

/// Cells of row `row` in the first table under the element classed `class`.
///
/// Returns an empty list when the container, table, section or row is missing.
pub fn row_cells<'a>(
    scope: ElementRef<'a>,
    class: &str,
    row: usize,
    section: TableSection,
) -> Vec<ElementRef<'a>> {
    let (section_tag, cell_tag) = section.tags();

    let Some(rows) = find_class(scope, class)
        .and_then(|container| find(container, "table"))
        .and_then(|table| find(table, section_tag))
        .map(|body| find_all(body, "tr"))
    else {
        return Vec::new();
    };

    rows.get(row)
        .map(|tr| find_all(*tr, cell_tag))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="issue-time">Issued at <time>  05:00 on
             Monday </time></div>
          <div class="confidence"><h3>Confidence</h3><p>High</p></div>
          <div class="grid">
            <table>
              <thead><tr><th>Time</th><th>06:00</th><th>09:00</th></tr></thead>
              <tbody>
                <tr><td>a</td><td>b</td></tr>
                <tr><td>c</td><td>d</td></tr>
              </tbody>
            </table>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_tag_text_by_class() {
        let doc = Html::parse_document(PAGE);
        let root = doc.root_element();

        assert_eq!(
            tag_text_by_class(root, "issue-time", "time").as_deref(),
            Some("05:00 on Monday")
        );
        assert_eq!(p_text_by_class(root, "confidence").as_deref(), Some("High"));
        assert_eq!(p_text_by_class(root, "issue-time"), None);
        assert_eq!(p_text_by_class(root, "missing"), None);
    }

    #[test]
    fn test_row_cells() {
        let doc = Html::parse_document(PAGE);
        let root = doc.root_element();

        let head = row_cells(root, "grid", 0, TableSection::Head);
        assert_eq!(head.iter().map(|c| text(*c)).collect::<Vec<_>>(), ["Time", "06:00", "09:00"]);

        let second = row_cells(root, "grid", 1, TableSection::Body);
        assert_eq!(second.iter().map(|c| text(*c)).collect::<Vec<_>>(), ["c", "d"]);
    }

    #[test]
    fn test_row_cells_missing_nodes_are_empty() {
        let doc = Html::parse_document(PAGE);
        let root = doc.root_element();

        assert!(row_cells(root, "grid", 5, TableSection::Body).is_empty());
        assert!(row_cells(root, "nope", 0, TableSection::Body).is_empty());
        assert!(row_cells(root, "confidence", 0, TableSection::Head).is_empty());
    }

    #[test]
    fn test_invalid_selector_is_absent() {
        let doc = Html::parse_document(PAGE);
        assert!(find(doc.root_element(), "[[bad").is_none());
        assert!(find_all(doc.root_element(), "[[bad").is_empty());
    }
}
