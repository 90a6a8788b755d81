/// Strict output-format directive appended to every generation prompt. The
/// field names and the "mcq"/"true_false" tags are what the parser expects.
pub const QUESTION_FORMAT_DIRECTIVE: &str = r#"[
  {
    "type": "mcq",
    "question": "Write the question here",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correct_answer": "The exact text of the correct option",
    "explanation": "Why this answer is correct"
  },
  {
    "type": "true_false",
    "question": "Write the statement here",
    "correct_answer": "True",
    "explanation": "Why the statement is true or false"
  }
]"#;

/// Assembles the single-shot generation prompt. When `context` is absent the
/// reference-material block is omitted entirely; no placeholder text leaks
/// into the prompt.
pub fn build_generation_prompt(
    topic: &str,
    count: usize,
    difficulty: &str,
    context: Option<&str>,
) -> String {
    let context_section = match context {
        Some(material) => format!(
            "\nUSE THE FOLLOWING COURSE MATERIAL AS THE REFERENCE FOR THE QUESTIONS:\n---\n{}\n---\n",
            material
        ),
        None => String::new(),
    };

    format!(
        "You are a professional teacher. Write {count} quiz questions about the topic \"{topic}\".\n\
        {context_section}\n\
        Requirements:\n\
        - Question types: multiple choice (mcq) and true/false (true_false).\n\
        - Difficulty: {difficulty}.\n\
        - For true/false questions, \"correct_answer\" must be exactly \"True\" or \"False\".\n\
        - Output format: respond with ONLY a JSON array, no opening or closing prose:\n\n\
        {directive}",
        count = count,
        topic = topic,
        context_section = context_section,
        difficulty = difficulty,
        directive = QUESTION_FORMAT_DIRECTIVE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_topic_count_and_difficulty() {
        let prompt = build_generation_prompt("Photosynthesis", 7, "hard", None);

        assert!(prompt.contains("7 quiz questions"));
        assert!(prompt.contains("\"Photosynthesis\""));
        assert!(prompt.contains("Difficulty: hard."));
        assert!(prompt.contains("\"type\": \"mcq\""));
    }

    #[test]
    fn prompt_embeds_context_verbatim_when_present() {
        let prompt =
            build_generation_prompt("Photosynthesis", 3, "easy", Some("**Slide 1**\nChlorophyll"));

        assert!(prompt.contains("**Slide 1**\nChlorophyll"));
        assert!(prompt.contains("COURSE MATERIAL"));
    }

    #[test]
    fn prompt_omits_context_block_when_absent() {
        let prompt = build_generation_prompt("Photosynthesis", 3, "easy", None);

        assert!(!prompt.contains("COURSE MATERIAL"));
        assert!(!prompt.contains("---"));
    }
}
