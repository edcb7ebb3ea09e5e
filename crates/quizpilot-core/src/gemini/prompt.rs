//! Question → prompt text.

use quizpilot_types::{OptionSet, QuestionRecord, QuestionType};

const MATCHING_INSTRUCTIONS: &str = "\n\nPlease match each prompt with the correct choice. Format your answer as an array where each element is 'Prompt -> Choice'.";

const FILL_IN_THE_BLANK_INSTRUCTIONS: &str = "\n\nThis is a fill in the blank question. If there are multiple blanks, provide answers as an array in order of appearance. For a single blank, you can provide a string.";

const MULTIPLE_SELECT_INSTRUCTIONS: &str = "\n\nIMPORTANT: This is a multiple-select question. Your answer must be an ARRAY containing ALL correct options. Each answer must EXACTLY match one of the above options. Do not include numbers. If there are periods, include them. Format: [\"option1\", \"option2\", ...]";

const SINGLE_SELECT_INSTRUCTIONS: &str = "\n\nIMPORTANT: Your answer must EXACTLY match one of the above options. Do not include numbers in your answer. If there are periods, include them.";

const RESPONSE_FORMAT_INSTRUCTIONS: &str = "\n\nPlease provide your answer in raw JSON format with keys \"answer\" and \"explanation\". Do not use Markdown formatting (no backticks). Explanations should be no more than one sentence. DO NOT acknowledge the correction in your response, only answer the new question.";

/// Build the model prompt for a scraped question.
///
/// Pure and deterministic: the same record always yields the same bytes.
pub fn format_question_prompt(record: &QuestionRecord) -> String {
    let mut text = format!("Type: {}\nQuestion: {}", record.question_type, record.question_text);

    if let Some(correction) = record.previous_correction.as_ref().filter(|c| c.is_applicable()) {
        let serialized = serde_json::to_string(&correction.correct_answer)
            .unwrap_or_else(|_| correction.correct_answer.values().join(", "));
        text = format!(
            "CORRECTION FROM PREVIOUS ANSWER: For the question \"{}\", your answer was incorrect. The correct answer was: {}\n\nNow answer this new question:\n\n{}",
            correction.question, serialized, text
        );
    }

    match record.question_type {
        QuestionType::Matching => {
            if let Some(OptionSet::Matching { prompts, choices }) = &record.options {
                text.push_str("\nPrompts:\n");
                text.push_str(&numbered(prompts));
                text.push_str("\nChoices:\n");
                text.push_str(&numbered(choices));
            }
            text.push_str(MATCHING_INSTRUCTIONS);
        },
        QuestionType::FillInTheBlank => text.push_str(FILL_IN_THE_BLANK_INSTRUCTIONS),
        QuestionType::MultipleSelect => {
            text.push_str("\nOptions:\n");
            text.push_str(&numbered(list_options(record)));
            text.push_str(MULTIPLE_SELECT_INSTRUCTIONS);
        },
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            let options = list_options(record);
            if !options.is_empty() {
                text.push_str("\nOptions:\n");
                text.push_str(&numbered(options));
                text.push_str(SINGLE_SELECT_INSTRUCTIONS);
            }
        },
    }

    text.push_str(RESPONSE_FORMAT_INSTRUCTIONS);
    text
}

fn list_options(record: &QuestionRecord) -> &[String] {
    match &record.options {
        Some(OptionSet::List(options)) => options,
        _ => &[],
    }
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizpilot_types::Answer;

    #[test]
    fn test_multiple_select_lists_options_and_demands_array() {
        let record = QuestionRecord::new(QuestionType::MultipleSelect, "Which are mammals?")
            .with_options(["Whale.", "Shark.", "Bat."]);
        let prompt = format_question_prompt(&record);

        assert!(prompt.starts_with("Type: multiple_select\nQuestion: Which are mammals?"));
        assert!(prompt.contains("\nOptions:\n1. Whale.\n2. Shark.\n3. Bat."));
        assert!(prompt.contains("Your answer must be an ARRAY containing ALL correct options"));
        assert!(prompt.ends_with(RESPONSE_FORMAT_INSTRUCTIONS));
    }

    #[test]
    fn test_single_select_instructions() {
        let record = QuestionRecord::new(QuestionType::TrueFalse, "The sky is blue.")
            .with_options(["True", "False"]);
        let prompt = format_question_prompt(&record);

        assert!(prompt.contains("1. True\n2. False"));
        assert!(prompt.contains("must EXACTLY match one of the above options"));
        assert!(!prompt.contains("ARRAY"));
    }

    #[test]
    fn test_single_select_without_options_skips_option_block() {
        let record = QuestionRecord::new(QuestionType::MultipleChoice, "Pick one");
        let prompt = format_question_prompt(&record);
        assert!(!prompt.contains("Options:"));
        assert_eq!(prompt, format!("Type: multiple_choice\nQuestion: Pick one{}", RESPONSE_FORMAT_INSTRUCTIONS));
    }

    #[test]
    fn test_matching_numbers_prompts_and_choices() {
        let record = QuestionRecord::new(QuestionType::Matching, "Match capitals")
            .with_matching(["France", "Japan"], ["Tokyo", "Paris"]);
        let prompt = format_question_prompt(&record);

        assert!(prompt.contains("\nPrompts:\n1. France\n2. Japan\nChoices:\n1. Tokyo\n2. Paris"));
        assert!(prompt.contains("'Prompt -> Choice'"));
    }

    #[test]
    fn test_fill_in_the_blank() {
        let record = QuestionRecord::new(QuestionType::FillInTheBlank, "H2O is ____.");
        let prompt = format_question_prompt(&record);
        assert!(prompt.contains("This is a fill in the blank question."));
    }

    #[test]
    fn test_correction_precedes_new_question() {
        let record = QuestionRecord::new(QuestionType::MultipleChoice, "What is 2+2?")
            .with_options(["3", "4"])
            .with_correction("What is 1+1?", Answer::Multiple(vec!["2".into(), "two".into()]));
        let prompt = format_question_prompt(&record);

        assert!(prompt.starts_with(
            "CORRECTION FROM PREVIOUS ANSWER: For the question \"What is 1+1?\", your answer was incorrect. The correct answer was: [\"2\",\"two\"]"
        ));
        let correction_at = prompt.find("CORRECTION FROM PREVIOUS ANSWER").unwrap();
        let new_question_at = prompt.find("Now answer this new question").unwrap();
        assert!(correction_at < new_question_at);
        assert!(prompt.contains("Question: What is 2+2?"));
    }

    #[test]
    fn test_blank_correction_is_ignored() {
        let record = QuestionRecord::new(QuestionType::MultipleChoice, "Q")
            .with_correction("", Answer::from("A"));
        assert!(!format_question_prompt(&record).contains("CORRECTION"));
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let record = QuestionRecord::new(QuestionType::MultipleSelect, "Q?")
            .with_options(["a", "b"])
            .with_correction("Prev", Answer::from("x"));
        assert_eq!(format_question_prompt(&record), format_question_prompt(&record));
    }
}
