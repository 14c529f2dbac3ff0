use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use devcloak_core::config::Config;

pub fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = super::effective_config_path(path)?;
    if path.exists() && !force {
        bail!("config already exists at {} (use --force)", path.display());
    }
    Config::default_config().save(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}

pub fn print_effective(config_path: Option<PathBuf>) -> Result<()> {
    let path = super::effective_config_path(config_path)?;
    let config = if path.exists() {
        Config::load(&path).with_context(|| format!("load config {}", path.display()))?
    } else {
        Config::default_config()
    };
    let output = config.to_toml_string()?;
    println!("{}", output);
    Ok(())
}

pub fn set_key(config_path: Option<PathBuf>, key: &str, value: bool) -> Result<()> {
    let path = super::effective_config_path(config_path)?;
    let mut config = if path.exists() {
        Config::load(&path).with_context(|| format!("load config {}", path.display()))?
    } else {
        Config::default_config()
    };
    config.set_key(key, value)?;
    config.save(&path)?;
    println!("{key} = {value}");
    Ok(())
}
