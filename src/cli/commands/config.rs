//! Config command handler

use super::confirm;
use crate::args::ConfigSubcommand;
use gym_evolution::config::Config;

/// Dispatch config subcommands
///
/// `set` and `unset` edit the file as stored, so per-run overrides such as
/// `--token` never leak into it.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(&key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) if k == "token" && !value.is_empty() => println!("********"),
            Some(value) => println!("{value}"),
            None => {
                eprintln!("Unknown config key: '{k}'");
                std::process::exit(1);
            }
        }
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(key: &str, value: &str) {
    let mut stored = Config::load();
    if let Err(e) = stored.set(key, value) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = stored.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }

    logger::info!("Config key '{key}' updated");
    println!("✓ Set {key} = {value}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(defaults: &Config, key: &str) {
    let mut stored = Config::load();
    if let Err(e) = stored.unset(key, defaults) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = stored.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }

    println!("✓ Reset {key} to default");
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if confirm("Are you sure you want to reset config to defaults? This also logs you out.") {
        if let Err(e) = Config::reset() {
            eprintln!("Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
