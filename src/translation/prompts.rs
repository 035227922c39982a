/*!
 * Prompt templates for the translation protocol.
 */

/// Build the instruction prompt for one batch of chapter sections.
///
/// The sections are embedded as a JSON list and the model is instructed to
/// answer with nothing but a JSON list of the same length and order. The
/// register constraints keep the output in plain modern language rather
/// than literary prose.
pub fn batch_translation_prompt(target_language: &str, json_batch: &str) -> String {
    format!(
        "You are a translator. Translate the following chapter (given as a JSON list of sections) into {target_language}. Follow these rules:
    - Keep the translation close to the original meaning.
    - Use standard modern {target_language} grammar and vocabulary (A2-B1 level).
    - Avoid poetic, archaic, or overly complex phrasing.
    - Do not add explanations, notes, or extra text.
    - Output only the JSON list, with the same number of elements and in the same order as the input.

        List:
        {json_batch}"
    )
}
