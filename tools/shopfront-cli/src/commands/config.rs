//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use shopfront_cart::price::format_price;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("cart_key", &ctx.config.storage.cart_key);

    ctx.output.info("");
    ctx.output.info("[shipping]");
    ctx.output
        .kv("free_over", &format_price(ctx.config.shipping.free_over));
    ctx.output
        .kv("flat_fee", &format_price(ctx.config.shipping.flat_fee));

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len());
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();

    let value = match parts.as_slice() {
        ["storage", "dir"] => serde_json::json!(config.storage.dir.display().to_string()),
        ["storage", "cart_key"] => serde_json::json!(config.storage.cart_key),
        ["shipping", "free_over"] => serde_json::json!(config.shipping.free_over),
        ["shipping", "flat_fee"] => serde_json::json!(config.shipping.flat_fee),
        _ => bail!("Unknown config key: {}", key),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = CliConfig::default();
        assert_eq!(
            get_config_value(&config, "storage.cart_key").unwrap(),
            serde_json::json!("cart")
        );
        assert_eq!(
            get_config_value(&config, "shipping.flat_fee").unwrap(),
            serde_json::json!(300.0)
        );
        assert!(get_config_value(&config, "shipping.tax").is_err());
    }
}
