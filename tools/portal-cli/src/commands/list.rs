//! Listing command: search, sort and page through a JSON file.

use anyhow::{bail, Context as _, Result};
use portal_commerce::listing::{Filter, ListView, PageView, SortColumns, SortSpec};
use serde_json::Value;

use super::{ListArgs, PageArgs};
use crate::config::ListingConfig;
use crate::context::Context;
use crate::output::range_label;

/// Run the list command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(records = records.len(), file = %path.display(), "listing loaded");

    let mut view = build_view(records, &ctx.config.listing, &args.page);
    if let Some(query) = args.query {
        let fields = if args.search_in.is_empty() {
            ctx.config.listing.search_fields.clone()
        } else {
            args.search_in
        };
        view.set_filters(vec![Filter::any_contains(fields, query)]);
    }
    view.go_to(args.page.page);

    let page = view.page();
    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    print_records(ctx, &page, &args.columns);
    Ok(())
}

/// Build a view over `source` with the configured columns and the
/// requested page size and sort. The page index is left at 1.
pub(crate) fn build_view<T>(source: Vec<T>, listing: &ListingConfig, page: &PageArgs) -> ListView<T>
where
    T: portal_commerce::listing::FieldAccess + Clone,
{
    let columns = SortColumns::new().numeric(listing.numeric_columns.iter().cloned());
    let mut view = ListView::new(source)
        .with_columns(columns)
        .with_page_size(page.page_size.unwrap_or(listing.page_size));
    if let Some(key) = &page.sort {
        let spec = if page.desc {
            SortSpec::desc(key.clone())
        } else {
            SortSpec::asc(key.clone())
        };
        view.set_sort(spec);
    }
    view
}

/// Accept a bare array or the API envelope `{"data": [...]}`.
fn parse_records(content: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => Ok(rows),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => bail!("\"data\" is not an array"),
        },
        _ => bail!("expected an array of records"),
    }
}

fn print_records(ctx: &Context, page: &PageView<Value>, columns: &[String]) {
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|row| columns.iter().map(|c| cell(row, c)).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<&str> = columns.iter().map(String::as_str).collect();
    ctx.output.table_header(&header, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }

    ctx.output.info(&format!(
        "{} (page {} of {})",
        range_label(page.start_ordinal(), page.end_ordinal(), page.total_items()),
        page.page_index(),
        page.total_pages()
    ));
}

fn cell(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
