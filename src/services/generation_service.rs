use std::sync::Arc;

use uuid::Uuid;

use crate::{
    constants::prompts::build_generation_prompt,
    errors::{AppError, AppResult},
    models::domain::QuestionRecord,
    services::llm::LlmClient,
};

/// Strips a leading/trailing markdown code fence from model output.
///
/// Handles all four observed variants: no fence, bare triple-backtick,
/// json-tagged fence, and a mismatched fence on only one side.
pub fn strip_fencing(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

fn parse_question_array(raw: &str) -> AppResult<Vec<QuestionRecord>> {
    let body = strip_fencing(raw);

    serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("expected a question array: {}", e)))
}

/// Builds prompts, calls the language model, and parses its output into
/// question records — one call per chunk of context.
pub struct GenerationService {
    llm: Arc<dyn LlmClient>,
}

impl GenerationService {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Single-shot generation: one prompt, one model call, one parsed array.
    ///
    /// The model is not guaranteed to return exactly `count` records; this
    /// layer does not retry and does not validate field-level invariants.
    pub async fn generate(
        &self,
        topic: &str,
        count: usize,
        difficulty: &str,
        context: Option<&str>,
    ) -> AppResult<Vec<QuestionRecord>> {
        let prompt = build_generation_prompt(topic, count, difficulty, context);
        let raw = self.llm.generate(&prompt).await?;

        parse_question_array(&raw)
    }

    /// Distributes `total_count` questions across context chunks, one model
    /// call per chunk, and tolerates per-chunk failures.
    ///
    /// The first `len - 1` chunks each request `max(1, total / len)` questions
    /// (capped by the remaining budget); the last chunk requests whatever is
    /// left, so truncated division never loses the tail of the budget. A
    /// chunk whose call fails contributes zero records and is skipped. The
    /// result is truncated to `total_count`; producing fewer is not an error.
    pub async fn generate_batch(
        &self,
        request_id: Uuid,
        topic: &str,
        total_count: usize,
        difficulty: &str,
        chunks: &[String],
    ) -> AppResult<Vec<QuestionRecord>> {
        if chunks.is_empty() {
            let mut questions = self.generate(topic, total_count, difficulty, None).await?;
            questions.truncate(total_count);
            return Ok(questions);
        }

        let questions_per_chunk = std::cmp::max(1, total_count / chunks.len());
        let last_index = chunks.len() - 1;
        let mut remaining = total_count as i64;
        let mut collected: Vec<QuestionRecord> = Vec::with_capacity(total_count);

        for (index, chunk) in chunks.iter().enumerate() {
            if remaining <= 0 {
                break;
            }

            let requested = if index == last_index {
                remaining as usize
            } else {
                std::cmp::min(questions_per_chunk, remaining as usize)
            };

            match self
                .generate(topic, requested, difficulty, Some(chunk))
                .await
            {
                Ok(batch) => {
                    // Overshoot here shrinks the budget left for later chunks.
                    remaining -= batch.len() as i64;
                    collected.extend(batch);
                }
                Err(err) => {
                    log::warn!(
                        "[{}] chunk {}/{} failed, skipping: {}",
                        request_id,
                        index + 1,
                        chunks.len(),
                        err
                    );
                }
            }
        }

        collected.truncate(total_count);
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionType;
    use crate::services::llm::MockLlmClient;
    use mockall::Sequence;

    fn question_array(count: usize) -> String {
        let items: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"type":"true_false","question":"Statement {}","correct_answer":"True","explanation":"Because."}}"#,
                    i
                )
            })
            .collect();

        format!("[{}]", items.join(","))
    }

    fn service_with(mock: MockLlmClient) -> GenerationService {
        GenerationService::new(Arc::new(mock))
    }

    mod fencing {
        use crate::services::generation_service::{parse_question_array, strip_fencing};

        const ARRAY: &str = r#"[{"type":"true_false","question":"Q","correct_answer":"True","explanation":"E"}]"#;

        #[test]
        fn no_fence_passes_through() {
            assert_eq!(strip_fencing(ARRAY), ARRAY);
        }

        #[test]
        fn bare_fence_is_stripped() {
            let wrapped = format!("```\n{}\n```", ARRAY);
            assert_eq!(strip_fencing(&wrapped), ARRAY);
        }

        #[test]
        fn json_tagged_fence_is_stripped() {
            let wrapped = format!("```json\n{}\n```", ARRAY);
            assert_eq!(strip_fencing(&wrapped), ARRAY);
        }

        #[test]
        fn mismatched_fences_are_stripped_independently() {
            let leading_only = format!("```json\n{}", ARRAY);
            assert_eq!(strip_fencing(&leading_only), ARRAY);

            let trailing_only = format!("{}\n```", ARRAY);
            assert_eq!(strip_fencing(&trailing_only), ARRAY);
        }

        #[test]
        fn fenced_and_bare_parse_identically() {
            let bare = parse_question_array(ARRAY).unwrap();
            let fenced = parse_question_array(&format!("```json\n{}\n```", ARRAY)).unwrap();
            assert_eq!(bare, fenced);
        }
    }

    #[actix_rt::test]
    async fn single_shot_parses_model_output() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("Write 2 quiz questions"))
            .returning(|_| Ok(question_array(2)));

        let service = service_with(mock);
        let questions = service.generate("Biology", 2, "easy", None).await.unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question_type, QuestionType::TrueFalse);
    }

    #[actix_rt::test]
    async fn single_shot_surfaces_malformed_output() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .returning(|_| Ok("Sorry, I cannot help with that.".to_string()));

        let service = service_with(mock);
        let result = service.generate("Biology", 2, "easy", None).await;

        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }

    #[actix_rt::test]
    async fn empty_chunks_delegate_to_one_no_context_call() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .times(1)
            .withf(|prompt| {
                prompt.contains("Write 5 quiz questions") && !prompt.contains("COURSE MATERIAL")
            })
            .returning(|_| Ok(question_array(5)));

        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 5, "medium", &[])
            .await
            .unwrap();

        assert_eq!(questions.len(), 5);
    }

    #[actix_rt::test]
    async fn empty_chunks_truncate_model_overshoot() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate().returning(|_| Ok(question_array(9)));

        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 5, "medium", &[])
            .await
            .unwrap();

        assert_eq!(questions.len(), 5);
    }

    #[actix_rt::test]
    async fn distributes_counts_with_remainder_on_last_chunk() {
        // Three chunks, ten questions: 3, 3, then 4 for the last chunk.
        let mut mock = MockLlmClient::new();
        let mut seq = Sequence::new();

        for expected in [3usize, 3, 4] {
            mock.expect_generate()
                .times(1)
                .in_sequence(&mut seq)
                .withf(move |prompt| {
                    prompt.contains(&format!("Write {} quiz questions", expected))
                })
                .returning(move |_| Ok(question_array(expected)));
        }

        let chunks = vec!["c1".to_string(), "c2".to_string(), "c3".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 10, "medium", &chunks)
            .await
            .unwrap();

        assert_eq!(questions.len(), 10);
    }

    #[actix_rt::test]
    async fn chunk_context_reaches_the_prompt() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("**Slide 1**\nMitochondria"))
            .returning(|_| Ok(question_array(1)));

        let chunks = vec!["**Slide 1**\nMitochondria".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 1, "easy", &chunks)
            .await
            .unwrap();

        assert_eq!(questions.len(), 1);
    }

    #[actix_rt::test]
    async fn failed_chunks_are_skipped_not_fatal() {
        let mut mock = MockLlmClient::new();
        let mut seq = Sequence::new();

        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(question_array(2)));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::MalformedResponse("not an array".to_string())));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(question_array(2)));

        let chunks = vec!["c1".to_string(), "c2".to_string(), "c3".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 6, "medium", &chunks)
            .await
            .unwrap();

        // Middle chunk contributed nothing.
        assert_eq!(questions.len(), 4);
    }

    #[actix_rt::test]
    async fn all_chunks_failing_yields_empty_not_error() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .times(3)
            .returning(|_| Err(AppError::ModelError("timeout".to_string())));

        let chunks = vec!["c1".to_string(), "c2".to_string(), "c3".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 6, "medium", &chunks)
            .await
            .unwrap();

        assert!(questions.is_empty());
    }

    #[actix_rt::test]
    async fn overshoot_reduces_downstream_budget() {
        // First chunk asked for 3 but returns 5; the last chunk only gets a
        // remainder request of 1 instead of 3.
        let mut mock = MockLlmClient::new();
        let mut seq = Sequence::new();

        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|prompt| prompt.contains("Write 3 quiz questions"))
            .returning(|_| Ok(question_array(5)));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|prompt| prompt.contains("Write 1 quiz questions"))
            .returning(|_| Ok(question_array(1)));

        let chunks = vec!["c1".to_string(), "c2".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 6, "medium", &chunks)
            .await
            .unwrap();

        assert_eq!(questions.len(), 6);
    }

    #[actix_rt::test]
    async fn stops_calling_once_budget_is_exhausted() {
        // First chunk overshoots past the whole budget; no further calls.
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(question_array(8)));

        let chunks = vec!["c1".to_string(), "c2".to_string(), "c3".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 6, "medium", &chunks)
            .await
            .unwrap();

        // Truncated to the requested total.
        assert_eq!(questions.len(), 6);
    }

    #[actix_rt::test]
    async fn never_returns_more_than_requested_total() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate().returning(|_| Ok(question_array(4)));

        let chunks = vec!["c1".to_string(), "c2".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 5, "medium", &chunks)
            .await
            .unwrap();

        assert!(questions.len() <= 5);
    }

    #[actix_rt::test]
    async fn more_chunks_than_questions_requests_one_each() {
        // total / len truncates to zero; per-chunk floor of one applies and
        // iteration stops once the budget runs out.
        let mut mock = MockLlmClient::new();
        mock.expect_generate()
            .times(2)
            .withf(|prompt| prompt.contains("Write 1 quiz questions"))
            .returning(|_| Ok(question_array(1)));

        let chunks = vec!["c1".to_string(), "c2".to_string(), "c3".to_string()];
        let service = service_with(mock);
        let questions = service
            .generate_batch(Uuid::new_v4(), "Biology", 2, "medium", &chunks)
            .await
            .unwrap();

        assert_eq!(questions.len(), 2);
    }
}
