//! `fitcoach countries`: list the reference countries.

use anyhow::Result;
use console::style;

use crate::state::AppState;

pub fn list_countries(state: &AppState, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&*state.countries)?);
        return Ok(());
    }

    if !quiet {
        println!();
        println!(
            "  {} {} countries",
            style("*").cyan().bold(),
            state.countries.len()
        );
        println!();
    }
    for name in state.countries.iter() {
        println!("  {name}");
    }
    Ok(())
}
