//! Contains the Error and Result type used when parsing NBT documents.

/// A structural problem with an NBT document. Once one of these is returned
/// no player can be decoded from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new variants.
    Other,

    /// The input ran out part way through a tag.
    UnexpectedEof,

    /// A tag id outside of the known range. Contains the offending id.
    InvalidTag(u8),

    /// Expected unicode data but was not valid. Contained bytes are the
    /// invalid data.
    Nonunicode(Vec<u8>),

    /// The document did not start with a named tag.
    NoRootCompound,

    /// Compounds and lists were nested deeper than we are willing to follow.
    TooDeep,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn invalid_tag(t: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", t),
            kind: ErrorKind::InvalidTag(t),
        }
    }

    pub(crate) fn nonunicode(d: &[u8]) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(d),
            ),
            kind: ErrorKind::Nonunicode(d.to_vec()),
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn no_root_compound() -> Self {
        Self {
            msg: "invalid nbt: no root compound".into(),
            kind: ErrorKind::NoRootCompound,
        }
    }

    pub(crate) fn too_deep(limit: usize) -> Self {
        Self {
            msg: format!("invalid nbt: nesting deeper than {}", limit),
            kind: ErrorKind::TooDeep,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::unexpected_eof(),
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Other,
            },
        }
    }
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;
