//! Init command handler

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    let path = Config::default_config_path();

    if Config::create_default_if_missing()? {
        println!("Created default config at {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }

    Ok(())
}
