// HTML table distiller
//
// The dashboard's report pages are presentation markup, not data. This
// module reduces one targeted `<table>` to the intermediate "distilled"
// form the decoders consume: rows of cells, each cell an ordered group of
// text fragments. Everything else on the page is ignored.

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::error::Error;

/// One distilled table row: ordered cells, each cell the ordered list of
/// text fragments found inside it.
///
/// Fragments are preserved separately rather than joined because the
/// dashboard stacks distinct values inside one cell (`Name` on one line,
/// `(comment)` on the next) and the decoders index into them.
pub type DistilledRow = Vec<Vec<String>>;

/// How to locate the target table within the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocator {
    /// Match by `id` attribute.
    Id(&'static str),
    /// Match by class list (space-separated, all required).
    Class(&'static str),
}

impl TableLocator {
    fn selector(&self) -> String {
        match self {
            Self::Id(id) => format!("table#{id}"),
            Self::Class(classes) => {
                let mut sel = String::from("table");
                for class in classes.split_whitespace() {
                    sel.push('.');
                    sel.push_str(class);
                }
                sel
            }
        }
    }
}

impl std::fmt::Display for TableLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Class(classes) => write!(f, "class={classes}"),
        }
    }
}

/// Distill a report page down to the rows of one table.
///
/// The first table matching `locator` is used; the dashboard only ever
/// renders one per page, but first-match keeps the ambiguous case
/// deterministic. Rows without any `<td>` cell (header rows, spacer rows)
/// are dropped. A document without a matching table fails with
/// [`Error::MalformedDocument`].
pub fn distill_table(html: &str, locator: &TableLocator) -> Result<Vec<DistilledRow>, Error> {
    let selector = Selector::parse(&locator.selector()).map_err(|_| Error::MalformedDocument {
        locator: locator.to_string(),
    })?;
    let row_selector = Selector::parse("tr").expect("static selector");
    let cell_selector = Selector::parse("td").expect("static selector");

    let document = Html::parse_document(html);

    let table = document
        .select(&selector)
        .next()
        .ok_or_else(|| Error::MalformedDocument {
            locator: locator.to_string(),
        })?;

    let mut rows = Vec::new();

    for row in table.select(&row_selector) {
        let cells: Vec<Vec<String>> = row
            .select(&cell_selector)
            .map(cell_fragments)
            .collect();

        // Watch out for blank rows.
        if cells.is_empty() {
            continue;
        }

        trace!(cells = cells.len(), "distilled row");
        rows.push(cells);
    }

    Ok(rows)
}

/// The text fragments inside one cell, in document order.
///
/// Whitespace-only fragments are markup artifacts (indentation between
/// tags) and are dropped; meaningful fragments are trimmed.
fn cell_fragments(cell: ElementRef<'_>) -> Vec<String> {
    cell.text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <p>Decoration</p>
        <table id="mytable">
          <tr><th>Status</th><th>Name</th></tr>
          <tr><td>3</td><td>node-a<br/>(front gate)</td></tr>
          <tr></tr>
          <tr><td>4</td><td>node-b</td></tr>
          <tr><td>8</td><td>node-c</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn distills_data_rows_and_skips_empty_ones() {
        let rows = distill_table(PAGE, &TableLocator::Id("mytable")).unwrap();

        // Header row has no <td>, empty <tr></tr> has none either.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], vec!["3"]);
        assert_eq!(rows[0][1], vec!["node-a", "(front gate)"]);
        assert_eq!(rows[1], vec![vec!["4"], vec!["node-b"]]);
    }

    #[test]
    fn preserves_fragment_order_within_cells() {
        let html = r#"<table class="inline sortable">
            <tr><td>alice<br/>aa:bb:cc:00:11:22</td><td>1,234</td></tr>
        </table>"#;

        let rows = distill_table(html, &TableLocator::Class("inline sortable")).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], vec!["alice", "aa:bb:cc:00:11:22"]);
        assert_eq!(rows[0][1], vec!["1,234"]);
    }

    #[test]
    fn first_matching_table_wins() {
        let html = r#"
            <table class="inline"><tr><td>first</td></tr></table>
            <table class="inline"><tr><td>second</td></tr></table>
        "#;

        let rows = distill_table(html, &TableLocator::Class("inline")).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], vec!["first"]);
    }

    #[test]
    fn missing_table_is_a_malformed_document() {
        let err = distill_table("<html><body></body></html>", &TableLocator::Id("mytable"))
            .unwrap_err();

        assert!(matches!(err, Error::MalformedDocument { .. }));
    }
}
