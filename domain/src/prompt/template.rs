//! Prompt template for question generation

use crate::question::kind::QuestionKind;

/// JSON shape the provider is instructed to return.
///
/// [`crate::generation::parsing`] decodes exactly these field names.
const SCHEMA_EXAMPLE: &str = r#"{
    "questions": [
        {
            "title": "题目内容",
            "options": ["选项A", "选项B", "选项C", "选项D"],
            "answer": "正确选项索引",
            "explanation": "答案解析"
        }
    ]
}"#;

/// Templates for generating prompts
pub struct QuestionPromptTemplate;

impl QuestionPromptTemplate {
    /// The response schema embedded in every generation prompt
    pub fn schema_example() -> &'static str {
        SCHEMA_EXAMPLE
    }

    /// User prompt asking for `count` questions about `keywords` in `language`
    pub fn generation_prompt(
        kind: QuestionKind,
        language: &str,
        keywords: &str,
        count: u32,
    ) -> String {
        format!(
            r#"请严格按照以下JSON格式生成{}道关于"{}"的{}编程{}，每题必须有4个选项，答案使用选项索引（如"A", "B", "C", "D"）：
{}
"#,
            count,
            keywords,
            language,
            kind.prompt_description(),
            SCHEMA_EXAMPLE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_parameters() {
        let prompt = QuestionPromptTemplate::generation_prompt(QuestionKind::Single, "Go", "slices", 5);
        assert!(prompt.contains("5道"));
        assert!(prompt.contains("\"slices\""));
        assert!(prompt.contains("Go编程"));
        assert!(prompt.contains("单选题"));
        assert!(!prompt.contains("多选题"));
    }

    #[test]
    fn test_prompt_multiple_kind_description() {
        let prompt =
            QuestionPromptTemplate::generation_prompt(QuestionKind::Multiple, "Rust", "traits", 3);
        assert!(prompt.contains("多选题"));
        assert!(prompt.contains("3道"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = QuestionPromptTemplate::generation_prompt(QuestionKind::Single, "Go", "maps", 2);
        let b = QuestionPromptTemplate::generation_prompt(QuestionKind::Single, "Go", "maps", 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_demands_four_lettered_options() {
        let prompt = QuestionPromptTemplate::generation_prompt(QuestionKind::Single, "Go", "", 1);
        assert!(prompt.contains("4个选项"));
        assert!(prompt.contains(r#""A", "B", "C", "D""#));
        assert!(prompt.contains(QuestionPromptTemplate::schema_example()));
    }
}
