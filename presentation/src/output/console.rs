//! Console output formatter for questions

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use examforge_application::ConfirmQuestionsOutput;
use examforge_domain::{AnswerLabel, Question, QuestionId, QuestionOptions};
use serde_json::json;

/// Formats questions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}\n", line.dimmed(), title.cyan().bold(), line.dimmed())
    }

    /// Option lines, falling back to the raw stored text when it does not decode
    fn options_block(question: &Question) -> String {
        match question.decoded_options() {
            Ok(options) => Self::labelled_options(&options, &question.answer),
            Err(_) => format!("  {}\n", question.options),
        }
    }

    fn labelled_options(options: &QuestionOptions, answer: &str) -> String {
        let mut output = String::new();
        for (index, text) in options.as_slice().iter().enumerate() {
            let label = AnswerLabel::from_index(index)
                .map(|l| l.as_str().to_string())
                .unwrap_or_else(|| (index + 1).to_string());
            let line = format!("  {}. {}", label, text);
            if answer.contains(label.as_str()) {
                output.push_str(&format!("{}\n", line.green()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }
        output
    }

    fn summary_line(question: &Question) -> String {
        format!(
            "{} [{}] {} {}",
            format!("#{}", question.id).yellow().bold(),
            question.kind,
            question.title,
            format!("({}, {})", question.language, question.ai_model).dimmed()
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn generated(&self, questions: &[Question]) -> String {
        let mut output = Self::header(&format!("Generated {} question(s)", questions.len()));
        for question in questions {
            output.push('\n');
            output.push_str(&self.question(question));
        }
        output.push_str(&format!(
            "\n{} Keep questions with `examforge confirm --user <ID> --select <ID>...`; \
             unselected ones are erased.\n",
            "Note:".cyan().bold()
        ));
        output
    }

    fn question_list(&self, questions: &[Question]) -> String {
        if questions.is_empty() {
            return format!("{}\n", "No questions found.".dimmed());
        }
        let mut output = String::new();
        for question in questions {
            output.push_str(&Self::summary_line(question));
            output.push('\n');
        }
        output
    }

    fn question(&self, question: &Question) -> String {
        let mut output = format!("{}\n", Self::summary_line(question));
        output.push_str(&Self::options_block(question));
        output.push_str(&format!("  {} {}\n", "Answer:".bold(), question.answer));
        if !question.explanation.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                "Explanation:".bold(),
                question.explanation
            ));
        }
        if !question.keywords.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                "Keywords:".dimmed(),
                question.keywords
            ));
        }
        output
    }

    fn confirmation(&self, output: &ConfirmQuestionsOutput) -> String {
        format!(
            "{} confirmed {}, discarded {}\n",
            "Done:".green().bold(),
            output.confirmed,
            output.discarded
        )
    }

    fn deleted(&self, id: QuestionId) -> String {
        format!("{} question {}\n", "Deleted".green().bold(), id)
    }
}

/// Formats results as JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn question_value(question: &Question) -> serde_json::Value {
        let mut value = serde_json::to_value(question).unwrap_or_else(|_| json!({}));
        // Expose decoded options instead of the storage string
        if let Ok(options) = question.decoded_options()
            && let Some(object) = value.as_object_mut()
        {
            object.insert("options".to_string(), json!(options.as_slice()));
        }
        value
    }

    fn render(value: serde_json::Value) -> String {
        let mut text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
        text.push('\n');
        text
    }
}

impl OutputFormatter for JsonFormatter {
    fn generated(&self, questions: &[Question]) -> String {
        self.question_list(questions)
    }

    fn question_list(&self, questions: &[Question]) -> String {
        Self::render(serde_json::Value::Array(
            questions.iter().map(Self::question_value).collect(),
        ))
    }

    fn question(&self, question: &Question) -> String {
        Self::render(Self::question_value(question))
    }

    fn confirmation(&self, output: &ConfirmQuestionsOutput) -> String {
        Self::render(json!({
            "confirmed": output.confirmed,
            "discarded": output.discarded,
        }))
    }

    fn deleted(&self, id: QuestionId) -> String {
        Self::render(json!({ "deleted": id }))
    }
}
