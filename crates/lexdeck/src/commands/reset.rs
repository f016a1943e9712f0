use anyhow::Result;
use colored::Colorize;

use crate::store::Store;

pub fn run(yes: bool) -> Result<()> {
    let store = Store::at_default_location();
    let Some(path) = store.path().map(|p| p.to_path_buf()) else {
        println!("{}", "No data directory available; nothing to reset.".dimmed());
        return Ok(());
    };

    if !path.exists() {
        println!("{}", "No saved progress found.".dimmed());
        return Ok(());
    }

    if !yes {
        let confirmed = inquire::Confirm::new("Erase saved progress (position, score, answers)?")
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
    }

    store.clear()?;
    println!("{} {}", "Erased".green().bold(), path.display());
    Ok(())
}
