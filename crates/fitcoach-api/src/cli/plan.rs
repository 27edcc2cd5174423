//! `fitcoach plan`: questionnaire, review, submit, render.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use fitcoach_core::coach::{CoachReply, SubmitError};
use fitcoach_core::prompt::build_prompt;
use fitcoach_types::form::FormState;

use crate::cli::{form, review};
use crate::render::PlanRenderer;
use crate::state::{AppState, ConcreteCoachService};

/// Run the plan flow.
///
/// With an answers file the run is non-interactive: a refused submit or a
/// provider failure ends the command with an error. Interactively, an empty
/// body-sensitivity answer is asked again and a provider failure offers
/// another attempt with the same answers.
pub async fn run_plan(
    state: &AppState,
    answers: Option<&Path>,
    dry_run: bool,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let interactive = answers.is_none();
    let mut form = match answers {
        Some(path) => form::form_from_answers_file(path, &state.countries).await?,
        None => form::run_questionnaire(&state.countries)?,
    };

    if !json && !quiet {
        review::print_review(&form);
    }

    if dry_run {
        return print_dry_run(&form, json);
    }

    let coach = state.coach_service()?;

    loop {
        match submit_with_spinner(&coach, &form, quiet || json).await {
            Ok(reply) => return print_reply(&reply, json, quiet),
            Err(SubmitError::Validation(err)) => {
                if !interactive {
                    return Err(err).context("Cannot submit these answers");
                }
                println!("  {} {}", style("✗").red().bold(), err);
                form::ask_body_sensitivity(&mut form)?;
            }
            Err(SubmitError::Provider(err)) => {
                if !interactive {
                    return Err(err).context("Plan generation failed");
                }
                let retry = Confirm::new()
                    .with_prompt(format!(
                        "{} Plan generation failed: {err}. Submit again?",
                        style("✗").red().bold()
                    ))
                    .default(true)
                    .interact()?;
                if !retry {
                    return Err(err).context("Plan generation failed");
                }
            }
        }
    }
}

async fn submit_with_spinner(
    coach: &ConcreteCoachService,
    form: &FormState,
    hidden: bool,
) -> Result<CoachReply, SubmitError> {
    let spinner = if hidden {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner
    };
    spinner.set_message("Jake is preparing your plan...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = coach.submit(form).await;

    spinner.finish_and_clear();
    result
}

fn print_dry_run(form: &FormState, json: bool) -> Result<()> {
    let prompt = build_prompt(form);
    if json {
        let output = serde_json::json!({
            "prompt": prompt,
            "submittable": form.is_submittable(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{prompt}");
    }
    Ok(())
}

/// `--json` shape of a reply. The text is passed through untouched.
fn reply_json(reply: &CoachReply) -> serde_json::Value {
    serde_json::json!({
        "model": reply.model,
        "text": reply.text,
        "usage": reply.usage,
    })
}

fn print_reply(reply: &CoachReply, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&reply_json(reply))?);
        return Ok(());
    }

    println!("{}", PlanRenderer::new().render(&reply.text));

    if !quiet {
        println!(
            "  {}",
            style(format!(
                "{} · {} prompt tokens · {} reply tokens",
                reply.model, reply.usage.input_tokens, reply.usage.output_tokens
            ))
            .dim()
        );
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_types::llm::Usage;

    #[test]
    fn reply_json_carries_text_verbatim() {
        let text = "## Diet Plan\n\n| Meal | Food |\n|---|---|\n\n---\n\n## Exercise Plan\n";
        let reply = CoachReply {
            text: text.to_string(),
            model: "gemini-2.5-flash".to_string(),
            usage: Usage {
                input_tokens: 210,
                output_tokens: 900,
            },
        };

        let value = reply_json(&reply);
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["model", "text", "usage"]);
        assert_eq!(value["text"], text);
        assert_eq!(value["model"], "gemini-2.5-flash");
        assert_eq!(value["usage"]["output_tokens"], 900);
    }
}
