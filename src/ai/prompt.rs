//! Prompt templates for note assistance
//!
//! Each builder turns one user intent into a [`GenerationRequest`]; each
//! `parse_*` function turns the gateway's (already trimmed) text into the
//! shape the editor needs. Builders do no validation: callers reject blank
//! input before getting here.

use super::request::{GenerationOptions, GenerationRequest};

const CONTINUATION_MAX_TOKENS: u32 = 50;
const TITLE_MAX_TOKENS: u32 = 30;
const TAGS_MAX_TOKENS: u32 = 100;
const FORMAT_MAX_TOKENS: u32 = 100;

/// System message that pins the formatter to output-only replies
pub const FORMATTER_SYSTEM_MESSAGE: &str = "You are a text formatter. Always respond with only the formatted text, without any explanations or additional context.";

/// Ask the model to continue `text`, returning only the continuation
pub fn build_continuation(text: &str) -> GenerationRequest {
    let prompt = format!(
        "Continue this text naturally (provide just the continuation, no quotes): \"{}\"",
        text
    );
    GenerationRequest::new(prompt, GenerationOptions::with_max_tokens(CONTINUATION_MAX_TOKENS))
}

pub fn build_title(content: &str) -> GenerationRequest {
    let prompt = format!(
        "Generate a short, engaging title for this note: \"{}\". Return only the title without quotes.",
        content
    );
    GenerationRequest::new(prompt, GenerationOptions::with_max_tokens(TITLE_MAX_TOKENS))
}

/// The model is asked for 3-5 tags; the count is not enforced on the way back
pub fn build_tags(content: &str) -> GenerationRequest {
    let prompt = format!(
        "Generate 3-5 relevant tags for this text, return only the tags separated by commas without '#' symbol: \"{}\"",
        content
    );
    GenerationRequest::new(prompt, GenerationOptions::with_max_tokens(TAGS_MAX_TOKENS))
}

pub fn build_format(selected_text: &str, instruction: &str) -> GenerationRequest {
    let prompt = format!(
        "{}. Remember to only output the modified text without any explanations or additional context: \"{}\"",
        instruction, selected_text
    );
    GenerationRequest::new(
        prompt,
        GenerationOptions {
            system_message: Some(FORMATTER_SYSTEM_MESSAGE.to_string()),
            ..GenerationOptions::with_max_tokens(FORMAT_MAX_TOKENS)
        },
    )
}

pub fn parse_continuation(raw: &str) -> String {
    raw.trim().to_string()
}

/// Strip every double quote the model wrapped the title in
pub fn parse_title(raw: &str) -> String {
    strip_double_quotes(raw)
}

/// Split on commas and trim each entry
///
/// Order is preserved. Duplicates and empty entries are kept as-is.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

pub fn parse_formatted(raw: &str) -> String {
    strip_double_quotes(raw)
}

fn strip_double_quotes(raw: &str) -> String {
    raw.replace('"', "")
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
