//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers, which is ideal when
//! interpolating untrusted user text into an instruction prompt.

use std::fmt;

use handlebars::Handlebars;
use serde_json::json;

#[derive(Debug)]
pub enum Prompt {
    HistoryQuestion,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// The triple-stash keeps the question text raw. The API receives the
// combined prompt, never the bare question.
const HISTORY_QUESTION_PROMPT: &str = "You are a knowledgeable history expert and assistant. Your role is to provide accurate, engaging, and educational information about historical topics. Please answer this question about history: {{{question}}}";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(&Prompt::HistoryQuestion.to_string(), HISTORY_QUESTION_PROMPT)
        .expect("Failed to register template");
    registry
}

/// Wraps a user question with the fixed role-priming prefix.
pub fn render_history_question(question: &str) -> String {
    templates()
        .render(
            &Prompt::HistoryQuestion.to_string(),
            &json!({"question": question}),
        )
        .expect("Failed to render prompt")
}
