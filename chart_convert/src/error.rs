use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertErrorKind {
    Io,
    Parse,
    Field,
    Archive,
    Selection,
}

impl ConvertErrorKind {
    pub(crate) fn from_code(code: &'static str) -> Self {
        match code {
            // Io
            "E1001" | "E1002" => Self::Io,

            // Parse
            "E1101" => Self::Parse,

            // Field
            "E1201" | "E1202" => Self::Field,

            // Archive
            "E2001" | "E2002" | "E2003" => Self::Archive,

            // Selection
            "E3001" | "E3002" | "E3003" => Self::Selection,

            _ => Self::Parse,
        }
    }
}

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct ConvertError {
    pub code: &'static str,
    pub kind: ConvertErrorKind,
    pub message: String,

    pub file: Option<String>,
    /// Chart files found in an archive, for selection errors.
    pub candidates: Vec<String>,
}

impl ConvertError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: ConvertErrorKind::from_code(code),
            message: message.into(),

            file: None,
            candidates: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }
}

/// Why a single tempo event (or the offset anchor) was ignored.
///
/// These never abort a conversion; the event is dropped and a warning logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("`{0}` is not an array")]
    NotArray(&'static str),
    #[error("`{0}` is empty")]
    Empty(&'static str),
    #[error("missing or non-numeric `{0}`")]
    Missing(&'static str),
    #[error("`beat` must be an array of three numbers")]
    BeatShape,
    #[error("tempo is zero")]
    ZeroTempo,
}
