//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
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

    ctx.output.line("");
    ctx.output.line("[storage]");
    ctx.output.kv("data_dir", &ctx.config.storage.data_dir);
    ctx.output.kv("key", &ctx.config.storage.key);
    if ctx.ephemeral {
        ctx.output.kv("backend", "memory (--ephemeral)");
    } else {
        ctx.output.kv("backend", &ctx.data_dir().display().to_string());
    }

    ctx.output.line("");
    ctx.output.line("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(built-in)"),
    );
    ctx.output
        .kv("products", &ctx.catalog.products().len().to_string());
    ctx.output.kv(
        "delivery_options",
        &ctx.catalog.delivery_options().len().to_string(),
    );

    ctx.output.line("");
    ctx.output.line("[display]");
    ctx.output.kv("currency", ctx.currency.code());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("checkout.toml");

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
