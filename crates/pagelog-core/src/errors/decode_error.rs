/// Validation failures for an inbound event payload.
///
/// `field` is a dotted path from the payload root, e.g. `data.attributes.isActive`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed JSON: {reason}")]
    Malformed { reason: String },

    #[error("missing field `{field}`: expected {expected}")]
    MissingField { field: String, expected: String },

    #[error("invalid value for `{field}`: expected {expected}, found {found}")]
    WrongType {
        field: String,
        expected: String,
        found: String,
    },

    #[error("unknown field `{field}`")]
    UnknownField { field: String },

    #[error("unknown variant {value} for `{field}`: expected one of {expected}")]
    UnknownVariant {
        field: String,
        value: String,
        expected: String,
    },
}

impl DecodeError {
    /// The offending field path, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Malformed { .. } => None,
            Self::MissingField { field, .. }
            | Self::WrongType { field, .. }
            | Self::UnknownField { field }
            | Self::UnknownVariant { field, .. } => Some(field),
        }
    }
}
