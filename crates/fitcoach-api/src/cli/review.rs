//! Answer review table shown before submitting.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use fitcoach_core::prompt::PromptBuilder;
use fitcoach_types::form::FormState;

/// One row per prompt field, in prompt order.
pub fn answers_table(form: &FormState) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Question").fg(Color::White),
        Cell::new("Your answer").fg(Color::White),
    ]);

    for field in PromptBuilder::user_information(form) {
        let value = if field.value.is_empty() {
            Cell::new("(none selected)").fg(Color::Yellow)
        } else {
            Cell::new(&field.value).fg(Color::Cyan)
        };
        table.add_row(vec![Cell::new(field.label), value]);
    }

    table
}

pub fn print_review(form: &FormState) {
    println!();
    println!("{}", answers_table(form));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_types::country::CountryList;

    #[test]
    fn table_lists_every_field() {
        let countries = CountryList::new(["India"]).unwrap();
        let form = FormState::new(&countries);
        let rendered = answers_table(&form).to_string();

        assert!(rendered.contains("Country of residence"));
        assert!(rendered.contains("India"));
        assert!(rendered.contains("BMI"));
        assert!(rendered.contains("(none selected)"));
        assert_eq!(answers_table(&form).row_iter().count(), 17);
    }
}
