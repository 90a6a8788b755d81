use crate::errors::{AppError, AppResult};

/// Delimiter preceding each slide's label in keyword-path context. Chunk
/// boundaries always fall on this marker, never mid-slide.
pub const SLIDE_MARKER: &str = "**Slide ";

/// Splits a concatenated context string into chunks of at most
/// `max_slides_per_chunk` slides each, preserving order.
///
/// The marker is re-prepended to every fragment except the leading pre-marker
/// segment, so concatenating the produced chunks in order reconstructs a
/// whitespace-trimmed equivalent of the original context.
pub fn chunk_context(context: &str, max_slides_per_chunk: usize) -> AppResult<Vec<String>> {
    if max_slides_per_chunk == 0 {
        return Err(AppError::ValidationError(
            "max_slides_per_chunk must be at least 1".to_string(),
        ));
    }

    if context.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut fragments: Vec<String> = Vec::new();
    for (i, segment) in context.split(SLIDE_MARKER).enumerate() {
        if i == 0 {
            // Text before the first marker; dropped when blank so it does not
            // occupy a slide slot.
            if !segment.trim().is_empty() {
                fragments.push(segment.to_string());
            }
        } else {
            fragments.push(format!("{}{}", SLIDE_MARKER, segment));
        }
    }

    let chunks = fragments
        .chunks(max_slides_per_chunk)
        .map(|run| run.concat().trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect();

    Ok(chunks)
}
