/// Error returned when parsing an unknown algorithm identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{id}`, expected one of: {}", .expected.join(", "))]
pub struct UnknownId {
    /// What was being parsed, e.g. `"strategy"`.
    pub kind: &'static str,

    /// The identifier that failed to parse.
    pub id: String,

    /// The identifiers that would have been accepted.
    pub expected: &'static [&'static str],
}

impl UnknownId {
    pub(crate) fn new(kind: &'static str, id: &str, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            id: id.to_owned(),
            expected,
        }
    }
}
