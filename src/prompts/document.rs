//! Document question-answering prompts.

use std::sync::LazyLock;

/// Guidance block that the system prompt repeats.
pub const ANALYST_GUIDELINES: &str = r#"You are an expert document analyst.
Read the supplied document closely and answer only from its contents.
Point to the section that supports each claim you make.
Keep answers short without leaving out anything material.

Structure every answer as:
- The answer itself
- Evidence from the document
- Quotes where they help
- How confident you are

Further guidelines:
- Prefer precise wording over general statements
- Do not speculate beyond the text
- Give page or section numbers when the document has them
- Call out statements that contradict each other
- Separate facts from the author's opinions
- End with practical takeaways when the question allows it
- Stay neutral in tone
- Weigh competing readings of ambiguous passages
- Check figures against the rest of the document
- Use headings and lists for longer answers
"#;

/// Times [`ANALYST_GUIDELINES`] is repeated so the system prompt clears the
/// 1024-token minimum that providers require before caching a prefix.
pub const GUIDELINE_REPETITIONS: usize = 15;

static SYSTEM_PROMPT: LazyLock<String> =
    LazyLock::new(|| ANALYST_GUIDELINES.repeat(GUIDELINE_REPETITIONS));

/// Static system prompt shared by every request in a session.
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT.as_str()
}

/// User turn for a document question. The document comes first so that it
/// stays part of the cacheable prefix; the question is the only dynamic part.
pub fn document_prompt(document: &str, question: &str) -> String {
    format!("Document to analyze:\n\n{document}\n\nQuestion: {question}")
}
