//! `fitcoach config`: show the effective configuration.
//!
//! Only whether an API key is present is shown, never the key itself.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use fitcoach_infra::llm::resolve_api_key;
use fitcoach_types::config::CoachConfig;

use crate::state::AppState;

pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let api_key_set = resolve_api_key(&state.config).is_ok();

    if json {
        let output = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "api_key_set": api_key_set,
            "config": state.config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let data_dir = state.data_dir.display().to_string();
    let mut table = config_table(&state.config, &data_dir, api_key_set);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    println!();
    println!("{table}");
    println!();
    Ok(())
}

fn config_table(config: &CoachConfig, data_dir: &str, api_key_set: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let key_cell = if api_key_set {
        Cell::new(format!("● set ({})", config.api_key_env)).fg(Color::Green)
    } else {
        Cell::new(format!("○ missing ({})", config.api_key_env)).fg(Color::Yellow)
    };

    let countries = config
        .countries_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());

    let safety = config
        .safety_settings
        .iter()
        .map(|s| format!("{} = {}", s.category, s.threshold))
        .collect::<Vec<_>>()
        .join("\n");

    table.add_row(vec![Cell::new("Data directory"), Cell::new(data_dir)]);
    table.add_row(vec![Cell::new("Model"), Cell::new(&config.model).fg(Color::Cyan)]);
    table.add_row(vec![Cell::new("API key"), key_cell]);
    table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.base_url)]);
    table.add_row(vec![
        Cell::new("Request timeout"),
        Cell::new(format!("{}s", config.request_timeout_secs)),
    ]);
    table.add_row(vec![Cell::new("Countries"), Cell::new(countries)]);
    table.add_row(vec![
        Cell::new("Generation"),
        Cell::new(format!(
            "temperature {} · top_p {} · top_k {} · max {} tokens",
            config.generation.temperature,
            config.generation.top_p,
            config.generation.top_k,
            config.generation.max_output_tokens
        )),
    ]);
    table.add_row(vec![Cell::new("Safety"), Cell::new(safety)]);

    table
}
