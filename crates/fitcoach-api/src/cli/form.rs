//! The questionnaire (`fitcoach plan`) and answers-file loading.
//!
//! Interactive input uses dialoguer: `Input` for numbers and free text,
//! `FuzzySelect` for the long country list, `Select` for every closed option
//! list and `MultiSelect` for body sensitivity.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{FuzzySelect, Input, MultiSelect, Select};

use fitcoach_types::country::CountryList;
use fitcoach_types::form::{FormAnswers, FormState, MIN_AGE, MIN_HEIGHT_CM, MIN_WEIGHT_KG};
use fitcoach_types::options::{
    BodySensitivity, Build, DailyActivity, Diet, FitnessGoal, Flexibility, FormOption,
    SleepDuration, WaterIntake, WorkSchedule, WorkoutDuration, WorkoutFrequency,
};

/// Parse a TOML answers file.
pub async fn load_answers(path: &Path) -> Result<FormAnswers> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse answers file {}", path.display()))
}

/// Load an answers file and apply it on top of the form defaults.
pub async fn form_from_answers_file(path: &Path, countries: &CountryList) -> Result<FormState> {
    let answers = load_answers(path).await?;
    FormState::from_answers(answers, countries)
        .with_context(|| format!("Invalid answer in {}", path.display()))
}

/// Walk the user through every question.
pub fn run_questionnaire(countries: &CountryList) -> Result<FormState> {
    let mut form = FormState::new(countries);

    println!();
    println!(
        "  {} Tell us about yourself and we'll build your plan.",
        style("*").cyan().bold()
    );
    println!();

    let age = ask_number("Age", form.age(), MIN_AGE, "")?;
    form.set_age(age)?;

    let selected = FuzzySelect::new()
        .with_prompt("Select your country (recommendations use what's available there)")
        .items(countries.as_slice())
        .default(countries.position(form.country()).unwrap_or(0))
        .interact()?;
    form.set_country(&countries.as_slice()[selected], countries)?;

    let height = ask_number("Height", form.height_cm(), MIN_HEIGHT_CM, " cm")?;
    form.set_height_cm(height)?;
    let weight = ask_number("Weight", form.weight_kg(), MIN_WEIGHT_KG, " kg")?;
    form.set_weight_kg(weight)?;
    println!(
        "  {} {}",
        style("Your BMI:").dim(),
        style(form.body_mass_index()).cyan().bold()
    );

    form.build = select_option::<Build>(form.build)?;
    form.flexibility = select_option::<Flexibility>(form.flexibility)?;
    form.diet = select_option::<Diet>(form.diet)?;
    form.water_intake = select_option::<WaterIntake>(form.water_intake)?;
    form.sleep_duration = select_option::<SleepDuration>(form.sleep_duration)?;
    form.workout_duration = select_option::<WorkoutDuration>(form.workout_duration)?;
    form.workout_frequency = select_option::<WorkoutFrequency>(form.workout_frequency)?;
    form.work_schedule = select_option::<WorkSchedule>(form.work_schedule)?;
    form.daily_activity = select_option::<DailyActivity>(form.daily_activity)?;

    ask_body_sensitivity(&mut form)?;

    let bad_habits: String = Input::new()
        .with_prompt("Any bad habits? (e.g. Watching TV while eating, Smoking)")
        .allow_empty(true)
        .interact_text()?;
    form.set_bad_habits(&bad_habits);

    form.fitness_goal = select_option::<FitnessGoal>(form.fitness_goal)?;

    Ok(form)
}

/// Ask for body sensitivity and echo the normalized selection.
///
/// Also used to re-ask after a submit was refused for an empty selection.
pub fn ask_body_sensitivity(form: &mut FormState) -> Result<()> {
    let labels = option_labels::<BodySensitivity>();
    let checked: Vec<bool> = BodySensitivity::ALL
        .iter()
        .map(|option| form.body_sensitivity().contains(option))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt(format!(
            "{} (space to toggle, enter to confirm)",
            BodySensitivity::QUESTION
        ))
        .items(&labels)
        .defaults(&checked)
        .interact()?;

    form.set_body_sensitivity(picked.into_iter().map(|i| BodySensitivity::ALL[i]));
    println!(
        "  {} {}",
        style("Selected:").dim(),
        describe_sensitivity(form.body_sensitivity())
    );
    Ok(())
}

/// Normalized selection as shown to the user.
pub fn describe_sensitivity(selected: &[BodySensitivity]) -> String {
    if selected.is_empty() {
        return "nothing yet".to_string();
    }
    selected
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ask_number(prompt: &str, default: u32, min: u32, unit: &str) -> Result<u32> {
    let value = Input::<u32>::new()
        .with_prompt(format!("{prompt} (min {min}{unit})"))
        .default(default)
        .validate_with(|v: &u32| -> Result<(), String> {
            if *v >= min {
                Ok(())
            } else {
                Err(format!("must be at least {min}{unit}"))
            }
        })
        .interact_text()?;
    Ok(value)
}

fn select_option<T: FormOption>(current: T) -> Result<T> {
    let index = Select::new()
        .with_prompt(T::QUESTION)
        .items(&option_labels::<T>())
        .default(current.index())
        .interact()?;
    Ok(T::ALL[index])
}

fn option_labels<T: FormOption>() -> Vec<&'static str> {
    T::ALL.iter().map(|option| option.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn countries() -> CountryList {
        CountryList::new(["Afghanistan", "India", "Kenya"]).unwrap()
    }

    #[tokio::test]
    async fn answers_file_fills_form() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("me.toml");
        tokio::fs::write(
            &path,
            r#"
age = 25
country = "India"
height_cm = 180
weight_kg = 75
flexibility = "Pretty flexible"
body_sensitivity = ["Sensitive back", "None"]
fitness_goal = "Build muscle & strength"
"#,
        )
        .await
        .unwrap();

        let form = form_from_answers_file(&path, &countries()).await.unwrap();
        assert_eq!(form.age(), 25);
        assert_eq!(form.country(), "India");
        assert_eq!(form.body_mass_index(), 23);
        assert_eq!(form.flexibility, Flexibility::PrettyFlexible);
        assert_eq!(form.body_sensitivity(), [BodySensitivity::NoSensitivity]);
        assert_eq!(form.fitness_goal, FitnessGoal::BuildMuscle);
        assert_eq!(form.bad_habits(), "Nothing");
    }

    #[tokio::test]
    async fn answers_file_with_unknown_country_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("me.toml");
        tokio::fs::write(&path, "country = \"Atlantis\"").await.unwrap();

        let err = form_from_answers_file(&path, &countries()).await.unwrap_err();
        assert!(format!("{err:#}").contains("Atlantis"));
    }

    #[tokio::test]
    async fn answers_file_below_minimum_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("me.toml");
        tokio::fs::write(&path, "age = 12").await.unwrap();

        let err = form_from_answers_file(&path, &countries()).await.unwrap_err();
        assert!(format!("{err:#}").contains("at least 16"));
    }

    #[tokio::test]
    async fn missing_answers_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_answers(&tmp.path().join("absent.toml")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read answers file"));
    }

    #[test]
    fn describe_sensitivity_lists_labels() {
        assert_eq!(describe_sensitivity(&[]), "nothing yet");
        assert_eq!(
            describe_sensitivity(&[BodySensitivity::SensitiveBack, BodySensitivity::SensitiveKnees]),
            "Sensitive back, Sensitive knees"
        );
    }

    #[test]
    fn option_labels_follow_form_order() {
        assert_eq!(
            option_labels::<DailyActivity>(),
            vec![
                "I spend most of the day sitting",
                "I take active breaks",
                "I'm on my feet all day long",
            ]
        );
    }
}
