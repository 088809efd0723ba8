//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("dir", &ctx.config.store.dir);

    ctx.output.info("[listing]");
    ctx.output
        .kv("page_size", &ctx.config.listing.page_size.to_string());
    ctx.output
        .kv("numeric_columns", &ctx.config.listing.numeric_columns.join(", "));
    ctx.output
        .kv("search_fields", &ctx.config.listing.search_fields.join(", "));

    ctx.output.info("[session]");
    ctx.output.kv(
        "customer",
        ctx.config.session.customer.as_deref().unwrap_or("(guest)"),
    );
    ctx.output.kv("active scope", ctx.scope.as_str());

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.as_ref() else {
        bail!("No config file found. Run `portal config init` to create one.");
    };

    let mut config = ctx.config.clone();
    set_config_value(&mut config, key, value)?;
    config.save(config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let list = || -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    };
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "dir"] => config.store.dir = value.to_string(),
        ["listing", "page_size"] => {
            let size: usize = value.parse()?;
            if size == 0 {
                bail!("listing.page_size must be at least 1");
            }
            config.listing.page_size = size;
        }
        ["listing", "numeric_columns"] => config.listing.numeric_columns = list(),
        ["listing", "search_fields"] => config.listing.search_fields = list(),
        ["session", "customer"] => {
            let code = value.trim();
            config.session.customer = (!code.is_empty()).then(|| code.to_string());
        }
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_config_values() {
        let mut config = CliConfig::default();

        set_config_value(&mut config, "listing.page_size", "25").unwrap();
        set_config_value(&mut config, "listing.numeric_columns", "price, closingQty").unwrap();
        set_config_value(&mut config, "session.customer", "C001").unwrap();

        assert_eq!(config.listing.page_size, 25);
        assert_eq!(config.listing.numeric_columns, vec!["price", "closingQty"]);
        assert_eq!(config.session.customer.as_deref(), Some("C001"));

        set_config_value(&mut config, "session.customer", "").unwrap();
        assert_eq!(config.session.customer, None);
    }

    #[test]
    fn test_set_config_rejects_bad_input() {
        let mut config = CliConfig::default();
        assert!(set_config_value(&mut config, "listing.page_size", "0").is_err());
        assert!(set_config_value(&mut config, "listing.page_size", "ten").is_err());
        assert!(set_config_value(&mut config, "store.unknown", "x").is_err());
        assert_eq!(config, CliConfig::default());
    }
}
