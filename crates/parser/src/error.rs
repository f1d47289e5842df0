use crate::field::FieldName;

/// Why a message could not be parsed into a submission.
///
/// `Display` renders the diagnostic shown to the message author.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Fewer than four lines of text.
    #[error("Message must contain at least 4 lines for Reason, Amount, Deadline, and Note.")]
    TooShort,

    /// One or more field names do not appear anywhere in the text.
    #[error("Missing required fields: {}", join_keys(.0))]
    MissingFields(Vec<FieldName>),

    /// Every field name appears, but not as ordered, line-anchored labels.
    #[error("Invalid format. Fields must be in the correct order.")]
    MalformedOrder,
}

fn join_keys(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_lowercase_keys() {
        let err = ParseError::MissingFields(vec![FieldName::Amount, FieldName::Note]);
        assert_eq!(err.to_string(), "Missing required fields: amount, note");
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(
            ParseError::TooShort.to_string(),
            "Message must contain at least 4 lines for Reason, Amount, Deadline, and Note."
        );
        assert_eq!(
            ParseError::MalformedOrder.to_string(),
            "Invalid format. Fields must be in the correct order."
        );
    }
}
