//! `fitcoach prompt`: print the prompt for a set of answers.

use std::path::Path;

use anyhow::Result;
use console::style;

use fitcoach_core::prompt::build_prompt;
use fitcoach_types::form::FormState;

use crate::cli::form;
use crate::state::AppState;

pub async fn show_prompt(
    state: &AppState,
    answers: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let form = match answers {
        Some(path) => form::form_from_answers_file(path, &state.countries).await?,
        None => FormState::new(&state.countries),
    };
    let prompt = build_prompt(&form);

    if json {
        let output = serde_json::json!({
            "prompt": prompt,
            "submittable": form.is_submittable(),
            "answers": form,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{prompt}");
    if !form.is_submittable() && !quiet {
        eprintln!();
        eprintln!(
            "  {} No body sensitivity selected; `fitcoach plan` would refuse to submit this.",
            style("!").yellow().bold()
        );
    }
    Ok(())
}
