//! Prompt builder for the fitness coach.
//!
//! Turns a [`FormState`] into the single text prompt sent to the provider.
//! The output is a pure function of the form: same answers, same bytes.
//!
//! Layout:
//! ```text
//! {persona preamble}User Information: Age: 25, Country of residence: India, ..., Dream physique: Lose weight. {closing instruction}
//! ```

use fitcoach_types::form::FormState;

/// Persona and output-format instruction placed before the user information.
pub const PERSONA_PREAMBLE: &str = "You are Jake, an expert body trainer and dietician who has \
helped multiple Hollywood & Bollywood stars get in the shape they want. A new user has joined \
your academy, your job is to guide the user with a proper exercise plan and diet plan in order \
to achieve their ideal shape. I will provide you with the user information, you have to \
strictly output in a markdown table form. ";

/// Instruction placed after the user information.
pub const CLOSING_INSTRUCTION: &str = "Carefully design a diet and exercise plan keeping all \
this information in mind. Recommend items which can be easily found locally in the user's \
country. Do not give the Diet and Exercise tables together and give some recommendations. \
Separate Diet Plan, Exercise Plan, Recommendations by --- at the end.";

const USER_INFORMATION_HEADER: &str = "User Information: ";

/// One `Label: value` entry of the user-information clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfoField {
    pub label: &'static str,
    pub value: String,
}

impl UserInfoField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Builds the generation prompt from a filled-in form.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the complete prompt.
    ///
    /// Does not validate; callers gate on
    /// [`FormState::is_submittable`] before sending.
    pub fn build(form: &FormState) -> String {
        let info = Self::user_information(form)
            .iter()
            .map(|field| format!("{}: {}", field.label, field.value))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{PERSONA_PREAMBLE}{USER_INFORMATION_HEADER}{info}. {CLOSING_INSTRUCTION}")
    }

    /// The user-information entries, in prompt order.
    ///
    /// Every field of the form appears exactly once, plus the derived BMI
    /// right after weight.
    pub fn user_information(form: &FormState) -> Vec<UserInfoField> {
        let body_struggles = form
            .body_sensitivity()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            UserInfoField::new("Age", form.age().to_string()),
            UserInfoField::new("Country of residence", form.country()),
            UserInfoField::new(
                "Height",
                format!("{} in meters", format_meters(form.height_m())),
            ),
            UserInfoField::new("Weight", format!("{} in kilograms", form.weight_kg())),
            UserInfoField::new("BMI", form.body_mass_index().to_string()),
            UserInfoField::new("Current physical build", form.build.to_string()),
            UserInfoField::new("Current body flexibility", form.flexibility.to_string()),
            UserInfoField::new("Preferred Diet", form.diet.to_string()),
            UserInfoField::new("Daily water intake", form.water_intake.to_string()),
            UserInfoField::new("Usual sleep duration", form.sleep_duration.to_string()),
            UserInfoField::new("How long workouts", form.workout_duration.to_string()),
            UserInfoField::new("Workout frequency", form.workout_frequency.to_string()),
            UserInfoField::new("User work schedule", form.work_schedule.to_string()),
            UserInfoField::new("Usual daily activity of user", form.daily_activity.to_string()),
            UserInfoField::new("Body Struggles", body_struggles),
            UserInfoField::new("Bad Habits", form.bad_habits()),
            UserInfoField::new("Dream physique", form.fitness_goal.to_string()),
        ]
    }
}

/// Build the generation prompt for `form`.
pub fn build_prompt(form: &FormState) -> String {
    PromptBuilder::build(form)
}

/// Shortest round-trip decimal, always with a fractional part (`2` -> `2.0`).
fn format_meters(meters: f64) -> String {
    let formatted = meters.to_string();
    if formatted.contains('.') {
        formatted
    } else {
        format!("{formatted}.0")
    }
}
