use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());
    println!();

    let config = match Config::load() {
        Ok(config) => config,
        Err(_) => {
            println!("{}", "No configuration saved; showing defaults.".dimmed());
            Config::default()
        }
    };

    let theme = config
        .defaults
        .as_ref()
        .and_then(|d| d.theme.as_deref())
        .unwrap_or("dark");
    let start_mode = config
        .defaults
        .as_ref()
        .and_then(|d| d.start_mode.as_deref())
        .unwrap_or("first");
    println!("  {} {theme}", "defaults.theme:".cyan());
    println!("  {} {start_mode}", "defaults.start_mode:".cyan());

    let analysis = config.analysis.clone().unwrap_or_default();
    let key_display = match &analysis.api_key {
        Some(key) if !key.is_empty() => mask(key),
        _ => format!("(unset; falls back to ${})", crate::config::AnalysisConfig::ENV_VAR),
    };
    println!("  {} {key_display}", "analysis.api_key:".cyan());
    println!("  {} {}", "analysis.model:".cyan(), analysis.model());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    let shown = if key == "analysis.api_key" {
        mask(value)
    } else {
        value.to_string()
    };
    println!("{} {key} = {shown}", "Saved:".green().bold());
    println!("{} {}", "Config file:".dimmed(), path.display());
    Ok(())
}

fn mask(key: &str) -> String {
    // Counted in chars, not bytes: the value is user supplied and may
    // not be ASCII.
    let count = key.chars().count();
    if count <= 8 {
        "********".to_string()
    } else {
        let head: String = key.chars().take(4).collect();
        let tail: String = key.chars().skip(count - 4).collect();
        format!("{head}****{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_middle() {
        let masked = mask("AIzaSyExampleExampleKey9");
        assert!(masked.starts_with("AIza"));
        assert!(masked.ends_with("Key9"));
        assert!(!masked.contains("Example"));
    }

    #[test]
    fn test_mask_short_keys_fully() {
        assert_eq!(mask("short"), "********");
    }

    #[test]
    fn test_mask_handles_multibyte_keys() {
        let masked = mask("ключ-апи-секрет");
        assert!(masked.starts_with("ключ"));
        assert!(masked.ends_with("крет"));
        assert!(masked.contains("****"));
        assert_eq!(mask("ттттттт"), "********");
    }
}
