use regex::Regex;

use super::CompressorError;

/// Parses a YES/NO style model answer into a bool.
///
/// Matching is case-insensitive and on whole words. An answer containing
/// both values is rejected as ambiguous.
#[derive(Debug, Clone)]
pub struct BooleanOutputParser {
    true_val: String,
    false_val: String,
}

impl BooleanOutputParser {
    pub fn new(true_val: &str, false_val: &str) -> Self {
        Self {
            true_val: true_val.to_uppercase(),
            false_val: false_val.to_uppercase(),
        }
    }

    pub fn parse(&self, text: &str) -> Result<bool, CompressorError> {
        let pattern = Regex::new(&format!(
            r"(?im)\b({}|{})\b",
            regex::escape(&self.true_val),
            regex::escape(&self.false_val)
        ))
        .map_err(|e| CompressorError::ConfigurationError(e.to_string()))?;

        let mut saw_true = false;
        let mut saw_false = false;
        for m in pattern.find_iter(text) {
            let value = m.as_str().to_uppercase();
            if value == self.true_val {
                saw_true = true;
            } else if value == self.false_val {
                saw_false = true;
            }
        }

        match (saw_true, saw_false) {
            (true, true) => Err(CompressorError::OutputParsingError(format!(
                "Ambiguous response. Both {} and {} in received: {}.",
                self.true_val, self.false_val, text
            ))),
            (true, false) => Ok(true),
            (false, true) => Ok(false),
            (false, false) => Err(CompressorError::OutputParsingError(format!(
                "BooleanOutputParser expected output value to include either {} or {}. Received {}.",
                self.true_val, self.false_val, text
            ))),
        }
    }
}

impl Default for BooleanOutputParser {
    fn default() -> Self {
        Self::new("YES", "NO")
    }
}

/// Marker a model returns when nothing in the context is relevant.
pub const NO_OUTPUT_STR: &str = "NO_OUTPUT";

/// Trims model output and maps the "nothing relevant" marker to an empty string.
#[derive(Debug, Clone)]
pub struct NoOutputParser {
    no_output_str: String,
}

impl NoOutputParser {
    pub fn new<S: Into<String>>(no_output_str: S) -> Self {
        Self {
            no_output_str: no_output_str.into(),
        }
    }

    pub fn no_output_str(&self) -> &str {
        &self.no_output_str
    }

    pub fn parse(&self, text: &str) -> String {
        let cleaned = text.trim();
        if cleaned == self.no_output_str {
            String::new()
        } else {
            cleaned.to_string()
        }
    }
}

impl Default for NoOutputParser {
    fn default() -> Self {
        Self::new(NO_OUTPUT_STR)
    }
}
