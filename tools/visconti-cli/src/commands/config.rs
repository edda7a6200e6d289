//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
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
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.line("");
    ctx.output.line("[backend]");
    ctx.output.kv("uri", &ctx.config.backend.uri);
    ctx.output.kv("timeout_secs", &ctx.config.backend.timeout_secs.to_string());

    ctx.output.line("");
    ctx.output.line("[storage]");
    ctx.output.kv("dir", &ctx.resolve_path(&ctx.config.storage.dir).display().to_string());

    ctx.output.line("");
    ctx.output.line("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &ctx.config.logging.format);

    let carousel = &ctx.config.carousel;
    ctx.output.line("");
    ctx.output.line("[carousel]");
    ctx.output.kv("auto_advance_ms", &carousel.auto_advance.as_millis().to_string());
    ctx.output.kv("settle_delay_ms", &carousel.settle_delay.as_millis().to_string());
    ctx.output.kv("min_swipe_distance", &carousel.min_swipe_distance.to_string());
    ctx.output.kv(
        "max_swipe_duration_ms",
        &carousel.max_swipe_duration.as_millis().to_string(),
    );
    ctx.output.kv("auto_play", &carousel.auto_play.to_string());

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

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
