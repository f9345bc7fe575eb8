// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly.

/// Joins document context, the customer query, and the closing instructions.
///
/// ```
/// let prompt = helpline_agent::build_prompt("ctx", "hi", "Be kind.");
/// assert_eq!(prompt, "ctx\n\nCustomer query: hi\n\nBe kind.");
/// ```
pub fn build_prompt(context: &str, query_text: &str, instructions: &str) -> String {
    format!("{context}\n\nCustomer query: {query_text}\n\n{instructions}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_config::model::default_instructions;

    #[test]
    fn default_instructions_produce_stock_prompt() {
        let prompt = build_prompt(
            "No relevant documents found.",
            "my upload fails constantly",
            &default_instructions(),
        );
        assert_eq!(
            prompt,
            "No relevant documents found.\n\nCustomer query: my upload fails constantly\n\n\
             Please provide a helpful and empathetic response. Format the response using markdown for readability."
        );
    }

    #[test]
    fn query_text_is_not_altered() {
        let prompt = build_prompt("c", "  Mixed CASE?  ", "i");
        assert!(prompt.contains("Customer query:   Mixed CASE?  \n"));
    }
}
