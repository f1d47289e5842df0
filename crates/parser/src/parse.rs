use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::{
    error::ParseError,
    field::FieldName,
    request::{SubmissionRequest, trim_space},
};

/// Example shown to authors whose message could not be parsed.
pub const USAGE_TEMPLATE: &str = "Reason: ...\nAmount: ...\nDeadline: ...\nNote: ...";

/// Minimum number of lines a message needs before field checks apply.
const MIN_LINES: usize = 4;

// Each label must start a line. Values run (minimally) up to the next label
// line; only the last capture takes the rest of the text. `[\s\x1C-\x1F]`
// matches what `is_space` accepts.
const SUBMISSION_PATTERN: &str = r"^Reason:[\s\x1C-\x1F]*(.*?)[\s\x1C-\x1F]*^Amount:[\s\x1C-\x1F]*(.*?)[\s\x1C-\x1F]*^Deadline:[\s\x1C-\x1F]*(.*?)[\s\x1C-\x1F]*^Note:[\s\x1C-\x1F]*(.*)";

static SUBMISSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(SUBMISSION_PATTERN)
        .case_insensitive(true)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()
        .unwrap_or_else(|e| unreachable!("submission pattern is a valid constant: {e}"))
});

/// Parse a message body into a submission.
///
/// On failure the first applicable diagnostic wins:
/// 1. fewer than four lines → [`ParseError::TooShort`]
/// 2. a field name absent from the text → [`ParseError::MissingFields`]
/// 3. anything else → [`ParseError::MalformedOrder`]
///
/// Presence in step 2 is a plain substring check, so "please note" counts as
/// the `note` field being present.
pub fn parse(content: &str) -> Result<SubmissionRequest, ParseError> {
    if let Some(caps) = SUBMISSION_RE.captures(content) {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        return Ok(SubmissionRequest::new(group(1), group(2), group(3), group(4)));
    }
    Err(diagnose(content))
}

fn diagnose(content: &str) -> ParseError {
    if trim_space(content).split('\n').count() < MIN_LINES {
        return ParseError::TooShort;
    }

    let lowered = content.to_lowercase();
    let missing: Vec<FieldName> = FieldName::ALL
        .into_iter()
        .filter(|field| !lowered.contains(field.key()))
        .collect();
    if !missing.is_empty() {
        return ParseError::MissingFields(missing);
    }

    ParseError::MalformedOrder
}
