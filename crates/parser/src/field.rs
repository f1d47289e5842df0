/// One of the four canonical submission fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Reason,
    Amount,
    Deadline,
    Note,
}

impl FieldName {
    /// All fields in the order they must appear in a message.
    pub const ALL: [Self; 4] = [Self::Reason, Self::Amount, Self::Deadline, Self::Note];

    /// Lowercase key used for presence checks and diagnostics (`"reason"`).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Reason => "reason",
            Self::Amount => "amount",
            Self::Deadline => "deadline",
            Self::Note => "note",
        }
    }
}
