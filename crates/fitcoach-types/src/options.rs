//! Closed option lists for the questionnaire.
//!
//! Every select-style question is a plain enum with a display label. Labels
//! are what the user sees, what the prompt contains, and what answer files
//! use on the wire, so the enums serialize to and from their label.

use std::fmt;

use crate::error::ValidationError;

/// A closed set of answers to one questionnaire item.
pub trait FormOption: Copy + Eq + fmt::Display + 'static {
    /// Every option, in the order the form offers them.
    const ALL: &'static [Self];

    /// Field name used in validation errors.
    const FIELD: &'static str;

    /// The question the form asks for this item.
    const QUESTION: &'static str;

    /// Human-readable label for this option.
    fn label(&self) -> &'static str;

    /// Look an option up by its exact label.
    fn from_label(label: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.label() == label)
            .ok_or_else(|| ValidationError::UnknownOption {
                field: Self::FIELD,
                value: label.to_string(),
            })
    }

    /// Position of this option in [`FormOption::ALL`].
    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|option| option == self)
            .unwrap_or_default()
    }
}

macro_rules! form_option {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $field:literal, $question:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl FormOption for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];
            const FIELD: &'static str = $field;
            const QUESTION: &'static str = $question;

            fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        /// Defaults to the first option, which is what the form preselects.
        impl Default for $name {
            fn default() -> Self {
                <Self as FormOption>::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as FormOption>::from_label(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                <Self as FormOption>::from_label(&label).map_err(serde::de::Error::custom)
            }
        }
    };
}

form_option! {
    /// Current physical build.
    pub enum Build: "build", "How would you describe your physical build?" {
        Thin => "Thin",
        Average => "Average",
        BroadOrMuscular => "Broad or Muscular",
        SignificantlyOverweight => "Significantly Overweight",
    }
}

form_option! {
    /// Current body flexibility.
    pub enum Flexibility: "flexibility", "How flexible are you?" {
        VeryFlexible => "Very flexible",
        PrettyFlexible => "Pretty flexible",
        NotThatGood => "Not that good",
        NotSure => "I'm not sure",
    }
}

form_option! {
    /// Preferred diet.
    pub enum Diet: "diet", "What type of diet do you prefer?" {
        Vegan => "Vegan",
        Vegetarian => "Vegetarian",
        Jain => "Jain",
        Swaminarayan => "Swaminarayan",
        NonVegetarian => "Non-Vegetarian",
    }
}

form_option! {
    /// Daily water intake band.
    pub enum WaterIntake: "water_intake", "What's your daily water intake?" {
        LessThanTwoGlasses => "Less than 2 glasses",
        AboutTwoGlasses => "About 2 glasses",
        TwoToSixGlasses => "2 to 6 glasses",
        MoreThanFiveGlasses => "More than 5 glasses",
    }
}

form_option! {
    /// Usual sleep duration band.
    pub enum SleepDuration: "sleep_duration", "How much sleep do you usually get?" {
        LessThanFiveHours => "Less than 5 hours",
        FiveToSixHours => "5-6 hours",
        SevenToEightHours => "7-8 hours",
        MoreThanEightHours => "More than 8 hours",
    }
}

form_option! {
    /// Preferred length of a single workout.
    pub enum WorkoutDuration: "workout_duration", "How long do you want your workouts to be?" {
        TenToFifteenMinutes => "10-15 minutes",
        FifteenToTwentyFiveMinutes => "15-25 minutes",
        TwentyFivePlusMinutes => "25+ minutes",
        DontKnow => "Don't know",
    }
}

form_option! {
    /// How often the user currently works out.
    pub enum WorkoutFrequency: "workout_frequency", "How often do you work out?" {
        AlmostEveryDay => "Almost every day",
        SeveralTimesPerWeek => "Several times per week",
        SeveralTimesPerMonth => "Several times per month",
        Never => "Never",
    }
}

form_option! {
    pub enum WorkSchedule: "work_schedule", "What is your work schedule like?" {
        NineToFive => "9 to 5",
        NightShifts => "Night shifts",
        FlexibleHours => "My hours are flexible",
        NotWorking => "Not working/retired",
    }
}

form_option! {
    pub enum DailyActivity: "daily_activity", "How would you describe your typical day?" {
        MostlySitting => "I spend most of the day sitting",
        ActiveBreaks => "I take active breaks",
        OnFeetAllDay => "I'm on my feet all day long",
    }
}

form_option! {
    /// Body areas the user struggles with.
    ///
    /// `NoSensitivity` ("None") is exclusive; see
    /// [`FormState::set_body_sensitivity`](crate::form::FormState::set_body_sensitivity).
    pub enum BodySensitivity: "body_sensitivity",
        "Do you struggle with any of the following? (Multiple options can be selected)" {
        SensitiveBack => "Sensitive back",
        SensitiveKnees => "Sensitive knees",
        NoSensitivity => "None",
    }
}

form_option! {
    /// The user's main goal.
    pub enum FitnessGoal: "fitness_goal", "What is your main goal?" {
        BuildMuscle => "Build muscle & strength",
        LoseWeight => "Lose weight",
        ImproveMobility => "Improve mobility",
        DevelopFlexibility => "Develop flexibility",
        OverallFitness => "Improve overall fitness",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_counts_match_questionnaire() {
        assert_eq!(Build::ALL.len(), 4);
        assert_eq!(Flexibility::ALL.len(), 4);
        assert_eq!(Diet::ALL.len(), 5);
        assert_eq!(WaterIntake::ALL.len(), 4);
        assert_eq!(SleepDuration::ALL.len(), 4);
        assert_eq!(WorkoutDuration::ALL.len(), 4);
        assert_eq!(WorkoutFrequency::ALL.len(), 4);
        assert_eq!(WorkSchedule::ALL.len(), 4);
        assert_eq!(DailyActivity::ALL.len(), 3);
        assert_eq!(BodySensitivity::ALL.len(), 3);
        assert_eq!(FitnessGoal::ALL.len(), 5);
    }

    #[test]
    fn test_default_is_first_option() {
        assert_eq!(Build::default(), Build::Thin);
        assert_eq!(Diet::default(), Diet::Vegan);
        assert_eq!(DailyActivity::default(), DailyActivity::MostlySitting);
        assert_eq!(FitnessGoal::default(), FitnessGoal::BuildMuscle);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Flexibility::NotSure.to_string(), "I'm not sure");
        assert_eq!(BodySensitivity::NoSensitivity.to_string(), "None");
        assert_eq!(FitnessGoal::BuildMuscle.to_string(), "Build muscle & strength");
    }

    #[test]
    fn test_from_str_requires_exact_label() {
        let diet: Diet = "Non-Vegetarian".parse().unwrap();
        assert_eq!(diet, Diet::NonVegetarian);

        let err = "non-vegetarian".parse::<Diet>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownOption {
                field: "diet",
                value: "non-vegetarian".to_string(),
            }
        );
    }

    #[test]
    fn test_index_matches_position() {
        assert_eq!(WorkSchedule::NineToFive.index(), 0);
        assert_eq!(WorkSchedule::NotWorking.index(), 3);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&WaterIntake::TwoToSixGlasses).unwrap();
        assert_eq!(json, "\"2 to 6 glasses\"");

        let parsed: SleepDuration = serde_json::from_str("\"7-8 hours\"").unwrap();
        assert_eq!(parsed, SleepDuration::SevenToEightHours);

        assert!(serde_json::from_str::<SleepDuration>("\"all night\"").is_err());
    }

    #[test]
    fn test_questions_are_set() {
        assert_eq!(Flexibility::QUESTION, "How flexible are you?");
        assert!(BodySensitivity::QUESTION.contains("Multiple options"));
    }
}
