use colored::Colorize;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let path = Config::path()?;
            set_value(&path, &key, &value)?;
            tracing::info!(%key, %value, "config updated");
            println!("{} {key} = {value}", "Set".green().bold());
            println!("  {}", path.display().to_string().dimmed());
            Ok(())
        }
    }
}

/// Update one key in the file at `path`, keeping every other setting.
fn set_value(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_new_from(path)?;
    config.set(key, value)?;
    config.save_to(path)
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_new_from(&path)?;
    let defaults = config.defaults.clone().unwrap_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("  {}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let rows = [
        ("defaults.theme", defaults.theme, "light"),
        ("defaults.transition", defaults.transition, "slide"),
        ("defaults.start_panel", defaults.start_panel, "intro"),
        (
            "defaults.windowed",
            defaults.windowed.map(|w| w.to_string()),
            "false",
        ),
    ];
    for (key, value, fallback) in rows {
        match value {
            Some(value) => println!("  {} {}", format!("{key:<22}").cyan(), value),
            None => println!(
                "  {} {} {}",
                format!("{key:<22}").cyan(),
                fallback,
                "(default)".dimmed()
            ),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        set_value(&path, "defaults.theme", "dark").unwrap();
        set_value(&path, "defaults.start_panel", "3").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme(), Some("dark"));
        assert_eq!(config.start_panel(), Some(crate::config::StartPanel::Panel(2)));
    }

    #[test]
    fn test_set_value_refuses_to_overwrite_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let original = "defaults:\n  theme: dark\n  start_panel: \"3\"\n  windowed: yes\n";
        std::fs::write(&path, original).unwrap();

        let err = set_value(&path, "defaults.transition", "fade").unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config file"), "{err:#}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
