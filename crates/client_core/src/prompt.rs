//! Natural-language prompt sent to the generation endpoint.

use shared::domain::CaseRecord;

const INSTRUCTIONS: &str = r#"Act as an expert in the Cognosystemic Theory of Relational Construction (TCCR) for Social Work.
Your task is to take the following structured case data and write a "Change Hypothesis" (explanatory-operational) and a "Null Hypothesis" that are technically precise, coherent, and written in fluent professional prose.

Use the answers to the 6 form questions as the main basis for the structure of the change hypothesis, following the TCCR format: "If [action] is implemented by [who], then [expected change] because [mechanism], measured by [measurement]".
Use the rest of the data (PMs, CDCs, indicators) to give context and enrich the wording.
The Null Hypothesis must deny the effect of the action on the indicators mentioned.

The result MUST be a valid JSON object with the following structure:
{
  "changeHypothesis": "...",
  "nullHypothesis": "..."
}

CASE DATA:
"#;

/// Builds the prompt: fixed instructions followed by the pretty-printed case record.
pub fn build_prompt(snapshot: &CaseRecord) -> Result<String, serde_json::Error> {
    let case_json = serde_json::to_string_pretty(snapshot)?;
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + case_json.len() + 1);
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(&case_json);
    prompt.push('\n');
    Ok(prompt)
}

/// Recovers the embedded case record from a prompt built by [`build_prompt`].
#[cfg(test)]
pub(crate) fn embedded_case(prompt: &str) -> Option<CaseRecord> {
    let (_, case_json) = prompt.split_once("CASE DATA:\n")?;
    serde_json::from_str(case_json.trim()).ok()
}
