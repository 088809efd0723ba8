//! Quote request command.

use std::collections::HashSet;

use anyhow::Result;
use portal_commerce::cart::IdentityKey;
use portal_commerce::CartError;

use super::QuoteArgs;
use crate::context::Context;
use crate::output::format_won;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let items = store.load(&ctx.scope);

    let selected: HashSet<IdentityKey> = items
        .iter()
        .filter(|i| args.all || args.items.iter().any(|code| *code == i.item_code))
        .map(|i| i.identity_key())
        .collect();

    for code in &args.items {
        if !items.iter().any(|i| i.item_code == *code) {
            ctx.output.warn(&format!("{} is not in the cart; skipped", code));
        }
    }

    let draft = match store.take_for_quote(&ctx.scope, &selected, args.memo) {
        Ok(draft) => draft,
        Err(CartError::EmptySelection) => {
            anyhow::bail!("None of the requested items are in the cart")
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&draft);
        return Ok(());
    }

    ctx.output.header("Quote draft");
    ctx.output.kv("requester", draft.requester.as_str());
    ctx.output.kv("created", &draft.created_at.to_rfc3339());
    if let Some(memo) = &draft.memo {
        ctx.output.kv("memo", memo);
    }
    for line in &draft.lines {
        ctx.output.kv(
            &line.identity_key().to_string(),
            &format!("{} x {}", line.quantity(), format_won(line.price())),
        );
    }
    ctx.output.kv("total", &format_won(draft.summary.total_amount));
    ctx.output.success(&format!(
        "{} line(s) moved from the cart to the quote",
        draft.lines.len()
    ));
    Ok(())
}
