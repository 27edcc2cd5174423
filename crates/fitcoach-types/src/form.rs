//! The questionnaire record (`FormState`) and its file form (`FormAnswers`).
//!
//! `FormState` owns every invariant of the form: numeric minimums, country
//! membership, body-sensitivity normalization and the "Nothing" default for
//! bad habits. Setters enforce them so a `FormState` is always renderable.
//! Whether it may be *submitted* is a separate question answered by
//! [`FormState::is_submittable`].

use serde::{Deserialize, Serialize};

use crate::country::CountryList;
use crate::error::ValidationError;
use crate::options::{
    BodySensitivity, Build, DailyActivity, Diet, FitnessGoal, Flexibility, SleepDuration,
    WaterIntake, WorkSchedule, WorkoutDuration, WorkoutFrequency,
};

pub const MIN_AGE: u32 = 16;
pub const DEFAULT_AGE: u32 = 18;

pub const MIN_HEIGHT_CM: u32 = 100;
pub const DEFAULT_HEIGHT_CM: u32 = 168;

pub const MIN_WEIGHT_KG: u32 = 20;
pub const DEFAULT_WEIGHT_KG: u32 = 60;

/// Stored in place of an empty bad-habits answer.
pub const NO_BAD_HABITS: &str = "Nothing";

/// One user's answers to the questionnaire.
///
/// Created fresh per session with [`FormState::new`], filled in field by
/// field, and dropped once the prompt has been sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    age: u32,
    country: String,
    height_cm: u32,
    weight_kg: u32,
    pub build: Build,
    pub flexibility: Flexibility,
    pub diet: Diet,
    pub water_intake: WaterIntake,
    pub sleep_duration: SleepDuration,
    pub workout_duration: WorkoutDuration,
    pub workout_frequency: WorkoutFrequency,
    pub work_schedule: WorkSchedule,
    pub daily_activity: DailyActivity,
    body_sensitivity: Vec<BodySensitivity>,
    bad_habits: String,
    pub fitness_goal: FitnessGoal,
}

impl FormState {
    /// A new form with the questionnaire's defaults.
    ///
    /// Age 18, height 168 cm, weight 60 kg, the first country of the list and
    /// the first option of every select. Body sensitivity starts empty, so a
    /// fresh form is not yet submittable.
    pub fn new(countries: &CountryList) -> Self {
        Self {
            age: DEFAULT_AGE,
            country: countries.first().to_string(),
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
            build: Build::default(),
            flexibility: Flexibility::default(),
            diet: Diet::default(),
            water_intake: WaterIntake::default(),
            sleep_duration: SleepDuration::default(),
            workout_duration: WorkoutDuration::default(),
            workout_frequency: WorkoutFrequency::default(),
            work_schedule: WorkSchedule::default(),
            daily_activity: DailyActivity::default(),
            body_sensitivity: Vec::new(),
            bad_habits: NO_BAD_HABITS.to_string(),
            fitness_goal: FitnessGoal::default(),
        }
    }

    /// Build a form from an answers file, starting from the defaults.
    ///
    /// Every present answer goes through the matching setter; the first
    /// violated constraint is returned.
    pub fn from_answers(
        answers: FormAnswers,
        countries: &CountryList,
    ) -> Result<Self, ValidationError> {
        let mut form = Self::new(countries);

        if let Some(age) = answers.age {
            form.set_age(age)?;
        }
        if let Some(country) = answers.country {
            form.set_country(&country, countries)?;
        }
        if let Some(height_cm) = answers.height_cm {
            form.set_height_cm(height_cm)?;
        }
        if let Some(weight_kg) = answers.weight_kg {
            form.set_weight_kg(weight_kg)?;
        }
        if let Some(build) = answers.build {
            form.build = build;
        }
        if let Some(flexibility) = answers.flexibility {
            form.flexibility = flexibility;
        }
        if let Some(diet) = answers.diet {
            form.diet = diet;
        }
        if let Some(water_intake) = answers.water_intake {
            form.water_intake = water_intake;
        }
        if let Some(sleep_duration) = answers.sleep_duration {
            form.sleep_duration = sleep_duration;
        }
        if let Some(workout_duration) = answers.workout_duration {
            form.workout_duration = workout_duration;
        }
        if let Some(workout_frequency) = answers.workout_frequency {
            form.workout_frequency = workout_frequency;
        }
        if let Some(work_schedule) = answers.work_schedule {
            form.work_schedule = work_schedule;
        }
        if let Some(daily_activity) = answers.daily_activity {
            form.daily_activity = daily_activity;
        }
        if let Some(body_sensitivity) = answers.body_sensitivity {
            form.set_body_sensitivity(body_sensitivity);
        }
        if let Some(bad_habits) = answers.bad_habits {
            form.set_bad_habits(&bad_habits);
        }
        if let Some(fitness_goal) = answers.fitness_goal {
            form.fitness_goal = fitness_goal;
        }

        Ok(form)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) -> Result<(), ValidationError> {
        if age < MIN_AGE {
            return Err(ValidationError::AgeBelowMinimum {
                min: MIN_AGE,
                actual: age,
            });
        }
        self.age = age;
        Ok(())
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Select a country; it must be one of `countries`.
    pub fn set_country(
        &mut self,
        name: &str,
        countries: &CountryList,
    ) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCountry);
        }
        if !countries.contains(name) {
            return Err(ValidationError::UnknownCountry(name.to_string()));
        }
        self.country = name.to_string();
        Ok(())
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn set_height_cm(&mut self, height_cm: u32) -> Result<(), ValidationError> {
        if height_cm < MIN_HEIGHT_CM {
            return Err(ValidationError::HeightBelowMinimum {
                min: MIN_HEIGHT_CM,
                actual: height_cm,
            });
        }
        self.height_cm = height_cm;
        Ok(())
    }

    pub fn weight_kg(&self) -> u32 {
        self.weight_kg
    }

    pub fn set_weight_kg(&mut self, weight_kg: u32) -> Result<(), ValidationError> {
        if weight_kg < MIN_WEIGHT_KG {
            return Err(ValidationError::WeightBelowMinimum {
                min: MIN_WEIGHT_KG,
                actual: weight_kg,
            });
        }
        self.weight_kg = weight_kg;
        Ok(())
    }

    /// Height in meters (`height_cm / 100`).
    pub fn height_m(&self) -> f64 {
        f64::from(self.height_cm) / 100.0
    }

    /// Body mass index rounded to the nearest integer, ties to even.
    ///
    /// Derived on every call from height and weight; never stored.
    pub fn body_mass_index(&self) -> u32 {
        let height_m = self.height_m();
        let bmi = f64::from(self.weight_kg) / (height_m * height_m);
        bmi.round_ties_even() as u32
    }

    /// Normalized body-sensitivity selection, in canonical order.
    pub fn body_sensitivity(&self) -> &[BodySensitivity] {
        &self.body_sensitivity
    }

    /// Replace the body-sensitivity selection.
    ///
    /// "None" is exclusive: if it is among the selections the result is
    /// exactly `[None]`. Duplicates are dropped and the result is kept in
    /// canonical order (back, knees, none).
    pub fn set_body_sensitivity<I>(&mut self, selections: I)
    where
        I: IntoIterator<Item = BodySensitivity>,
    {
        let mut selected: Vec<BodySensitivity> = selections.into_iter().collect();
        selected.sort();
        selected.dedup();

        if selected.contains(&BodySensitivity::NoSensitivity) {
            selected = vec![BodySensitivity::NoSensitivity];
        }

        self.body_sensitivity = selected;
    }

    pub fn bad_habits(&self) -> &str {
        &self.bad_habits
    }

    /// Record bad habits, trimmed; blank input becomes "Nothing".
    pub fn set_bad_habits(&mut self, text: &str) {
        let text = text.trim();
        self.bad_habits = if text.is_empty() {
            NO_BAD_HABITS.to_string()
        } else {
            text.to_string()
        };
    }

    /// Whether a request may be sent for this form.
    ///
    /// True iff at least one body-sensitivity option is selected; every other
    /// field always holds a value.
    pub fn is_submittable(&self) -> bool {
        !self.body_sensitivity.is_empty()
    }

    /// [`is_submittable`](Self::is_submittable) as a `Result`.
    pub fn validate_for_submit(&self) -> Result<(), ValidationError> {
        if self.is_submittable() {
            Ok(())
        } else {
            Err(ValidationError::EmptyBodySensitivity)
        }
    }
}

/// Answers loaded from a file for non-interactive runs.
///
/// Every field is optional; missing answers keep the form's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flexibility: Option<Flexibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<Diet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<WaterIntake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_duration: Option<SleepDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_duration: Option<WorkoutDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_frequency: Option<WorkoutFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_schedule: Option<WorkSchedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_activity: Option<DailyActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_sensitivity: Option<Vec<BodySensitivity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_habits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<FitnessGoal>,
}
