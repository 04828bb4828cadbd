use encoding_rs::{Encoding, UTF_8};

use super::parser;

/// Options for reading chart bytes
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Encoding used until the file declares another one
    pub encoding: &'static Encoding,
    pub max_encoding_restarts: u32,
}

impl ParseOptions {
    pub fn with_encoding(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            max_encoding_restarts: parser::MAX_ENCODING_RESTARTS,
        }
    }
}
