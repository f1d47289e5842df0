use {formrelay_config::FormFieldsConfig, formrelay_parser::{FieldName, SubmissionRequest}};

/// Maps canonical submission fields to external form-field identifiers.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    reason: String,
    amount: String,
    deadline: String,
    note: String,
}

impl FieldMapping {
    #[must_use]
    pub fn new(
        reason: impl Into<String>,
        amount: impl Into<String>,
        deadline: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            amount: amount.into(),
            deadline: deadline.into(),
            note: note.into(),
        }
    }

    /// External identifier for `field` (e.g. `entry.987654321`).
    #[must_use]
    pub fn form_field(&self, field: FieldName) -> &str {
        match field {
            FieldName::Reason => &self.reason,
            FieldName::Amount => &self.amount,
            FieldName::Deadline => &self.deadline,
            FieldName::Note => &self.note,
        }
    }

    /// Form-encoded payload pairs, in canonical field order.
    #[must_use]
    pub fn payload<'a>(&'a self, request: &'a SubmissionRequest) -> Vec<(&'a str, &'a str)> {
        request
            .iter()
            .map(|(field, value)| (self.form_field(field), value))
            .collect()
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::from(&FormFieldsConfig::default())
    }
}

impl From<&FormFieldsConfig> for FieldMapping {
    fn from(fields: &FormFieldsConfig) -> Self {
        Self::new(
            fields.reason.trim(),
            fields.amount.trim(),
            fields.deadline.trim(),
            fields.note.trim(),
        )
    }
}
