use thiserror::Error;

/// Error raised while converting or writing a property name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// A required argument was empty or blank.
    #[error("invalid argument `{0}`: value must not be empty or whitespace")]
    InvalidArgument(&'static str),
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// The byte-path converter could not rewrite a name in place.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid UTF-8 sequence after {valid_up_to} valid bytes")]
    InvalidUtf8 { valid_up_to: usize },
    #[error(
        "lowercasing {original:?} as {lowered:?} changes its UTF-8 length from {} to {} bytes",
        original.len_utf8(),
        lowered.len_utf8()
    )]
    LengthChanged { original: char, lowered: char },
}

/// A value did not fit within the caller-declared maximum length.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("formatted value exceeds the maximum length of {max_length} bytes")]
pub struct FormatError {
    pub max_length: usize,
}

impl From<core::str::Utf8Error> for EncodingError {
    fn from(err: core::str::Utf8Error) -> Self {
        EncodingError::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

impl From<core::str::Utf8Error> for NamingError {
    fn from(err: core::str::Utf8Error) -> Self {
        NamingError::Encoding(err.into())
    }
}
