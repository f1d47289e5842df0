use serde::Serialize;

use crate::field::FieldName;

/// A successfully parsed submission.
///
/// All four fields are always present; values are trimmed and may be empty.
/// Serializes with the canonical labels as keys, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Deadline")]
    pub deadline: String,
    #[serde(rename = "Note")]
    pub note: String,
}

/// Whitespace as the message format understands it: Unicode whitespace plus
/// the ASCII information separators `\x1C`..=`\x1F`.
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

pub(crate) fn trim_space(s: &str) -> &str {
    s.trim_matches(is_space)
}

impl SubmissionRequest {
    /// Build a request, trimming every value.
    #[must_use]
    pub fn new(reason: &str, amount: &str, deadline: &str, note: &str) -> Self {
        Self {
            reason: trim_space(reason).to_string(),
            amount: trim_space(amount).to_string(),
            deadline: trim_space(deadline).to_string(),
            note: trim_space(note).to_string(),
        }
    }

    #[must_use]
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Reason => &self.reason,
            FieldName::Amount => &self.amount,
            FieldName::Deadline => &self.deadline,
            FieldName::Note => &self.note,
        }
    }

    /// Field/value pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_values() {
        let req = SubmissionRequest::new("  a  ", "\t1\n", "", " multi\nline ");
        assert_eq!(req.reason, "a");
        assert_eq!(req.amount, "1");
        assert_eq!(req.deadline, "");
        assert_eq!(req.note, "multi\nline");
    }

    #[test]
    fn new_trims_information_separators() {
        let req = SubmissionRequest::new("\x1fa\x1c", "\x1d 1 \x1e", "\x1c", "n");
        assert_eq!(req.reason, "a");
        assert_eq!(req.amount, "1");
        assert_eq!(req.deadline, "");
    }

    #[test]
    fn iter_is_canonical_order() {
        let req = SubmissionRequest::new("r", "a", "d", "n");
        let pairs: Vec<_> = req.iter().collect();
        assert_eq!(pairs, vec![
            (FieldName::Reason, "r"),
            (FieldName::Amount, "a"),
            (FieldName::Deadline, "d"),
            (FieldName::Note, "n"),
        ]);
    }

    #[test]
    fn serializes_with_labels() {
        let req = SubmissionRequest::new("r", "a", "d", "n");
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"Reason":"r","Amount":"a","Deadline":"d","Note":"n"}"#
        );
    }
}
