//! Cart commands.

use anyhow::{bail, Result};
use portal_commerce::cart::{AddOutcome, CartSummary, IdentityKey, LineItem, ScopeKey};
use portal_commerce::listing::PageView;
use portal_commerce::CartError;

use super::{CartArgs, CartCommand, LineArgs, PageArgs};
use crate::commands::list::build_view;
use crate::context::Context;
use crate::output::{format_won, range_label};

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::List { page } => list_cart(&page, ctx),
        CartCommand::Add {
            item,
            price,
            quantity,
            option,
            value,
            value_name,
            name,
            company,
            unit,
            spec,
        } => {
            let mut line = LineItem::new(item, price, quantity).with_option(option, value);
            if let Some(v) = value_name {
                line = line.with_option_name(v);
            }
            if let Some(v) = name {
                line = line.with_name(v);
            }
            if let Some(v) = company {
                line = line.with_company(v);
            }
            if let Some(v) = unit {
                line = line.with_unit(v);
            }
            if let Some(v) = spec {
                line = line.with_spec(v);
            }
            add_line(line, ctx)
        }
        CartCommand::Remove { line } => {
            let items = ctx.cart_store()?.remove(&ctx.scope, &identity(&line)).map_err(explain)?;
            ctx.output.success(&format!("Removed {}", identity(&line)));
            print_summary(ctx, &items);
            Ok(())
        }
        CartCommand::SetQty { line, quantity } => {
            let items = ctx
                .cart_store()?
                .update_quantity(&ctx.scope, &identity(&line), quantity)
                .map_err(explain)?;
            report_quantity(ctx, &line, &items)
        }
        CartCommand::Bump { line, delta } => {
            let items = ctx
                .cart_store()?
                .update_quantity_delta(&ctx.scope, &identity(&line), delta)
                .map_err(explain)?;
            report_quantity(ctx, &line, &items)
        }
        CartCommand::Clear => {
            ctx.cart_store()?.clear(&ctx.scope).map_err(explain)?;
            ctx.output.success(&format!("Cleared cart {}", ctx.scope));
            Ok(())
        }
        CartCommand::Adopt => adopt_guest(ctx),
    }
}

fn identity(line: &LineArgs) -> IdentityKey {
    IdentityKey::from_parts(&line.item, &line.option, &line.value)
}

/// Attach how many lines were lost to a persist failure.
fn explain(err: CartError) -> anyhow::Error {
    let unsaved = err.unsaved_items().map_or(0, <[LineItem]>::len);
    if unsaved > 0 {
        anyhow::Error::new(err).context(format!("{} cart line(s) were not saved", unsaved))
    } else {
        err.into()
    }
}

fn list_cart(page: &PageArgs, ctx: &Context) -> Result<()> {
    let items = ctx.cart_store()?.load(&ctx.scope);
    let summary = CartSummary::of(&items);

    let mut view = build_view(items, &ctx.config.listing, page);
    view.go_to(page.page);
    let page = view.page();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "scope": ctx.scope,
            "page": page,
            "summary": summary,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart {}", ctx.scope));
    if summary.is_empty() {
        ctx.output.info("The cart is empty");
        return Ok(());
    }

    print_lines(ctx, &page);
    ctx.output.info(&format!(
        "{} (page {} of {})",
        range_label(page.start_ordinal(), page.end_ordinal(), page.total_items()),
        page.page_index(),
        page.total_pages()
    ));
    print_totals(ctx, &summary);
    Ok(())
}

fn add_line(line: LineItem, ctx: &Context) -> Result<()> {
    let label = line.identity_key().to_string();
    let mutation = ctx.cart_store()?.add(&ctx.scope, line).map_err(explain)?;

    if ctx.output.is_json() {
        ctx.output.json(&mutation.items);
        return Ok(());
    }

    match mutation.outcome {
        AddOutcome::Added => ctx.output.success(&format!("Added {} to the cart", label)),
        AddOutcome::Merged => ctx
            .output
            .success(&format!("{} was already in the cart; quantity increased", label)),
    }
    print_summary(ctx, &mutation.items);
    Ok(())
}

fn report_quantity(ctx: &Context, line: &LineArgs, items: &[LineItem]) -> Result<()> {
    let key = identity(line);
    let Some(item) = items.iter().find(|i| i.identity_key() == key) else {
        bail!("{} is not in the cart", key);
    };

    if ctx.output.is_json() {
        ctx.output.json(item);
        return Ok(());
    }

    ctx.output.success(&format!(
        "{} quantity is now {} ({})",
        key,
        item.quantity(),
        format_won(item.total_amount())
    ));
    print_summary(ctx, items);
    Ok(())
}

fn adopt_guest(ctx: &Context) -> Result<()> {
    if ctx.scope.is_guest() {
        bail!("Sign in first: pass --customer or set session.customer");
    }

    let guest = ScopeKey::guest();
    let items = ctx.cart_store()?.adopt(&guest, &ctx.scope).map_err(explain)?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output
        .success(&format!("Moved the guest cart into {}", ctx.scope));
    print_summary(ctx, &items);
    Ok(())
}

fn print_lines(ctx: &Context, page: &PageView<LineItem>) {
    let widths = [14, 24, 8, 12, 6, 14];
    ctx.output.table_header(
        &["ITEM", "NAME", "OPTION", "PRICE", "QTY", "TOTAL"],
        &widths,
    );
    for item in &page.items {
        let price = format_won(item.price());
        let quantity = item.quantity().to_string();
        let total = format_won(item.total_amount());
        ctx.output.table_row(
            &[
                item.item_code.as_str(),
                item.display_name.as_str(),
                item.option_value_name.as_str(),
                price.as_str(),
                quantity.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }
}

fn print_summary(ctx: &Context, items: &[LineItem]) {
    print_totals(ctx, &CartSummary::of(items));
}

fn print_totals(ctx: &Context, summary: &CartSummary) {
    ctx.output.kv("lines", &summary.line_count.to_string());
    ctx.output.kv("quantity", &summary.total_quantity.to_string());
    ctx.output.kv("total", &format_won(summary.total_amount));
}
