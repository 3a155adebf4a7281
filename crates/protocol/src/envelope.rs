use serde::{Deserialize, Serialize};

/// Action understood by the derivative pipeline as "reprocess these entities".
pub const ACTION_TOUCH: &str = "touch";

/// Notification body published once per batch of subjects.
///
/// Serializes as `{"Action":"touch","Entities":[...]}`. The field casing is what the
/// downstream consumer decodes, so it must stay PascalCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    pub action: String,
    pub entities: Vec<String>,
}

impl Envelope {
    /// Wrap `subjects` in a `touch` envelope. Subjects are copied verbatim, in order,
    /// including duplicates and empty strings.
    pub fn touch<S: AsRef<str>>(subjects: &[S]) -> Self {
        Self {
            action: ACTION_TOUCH.to_owned(),
            entities: subjects.iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
