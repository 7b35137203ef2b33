use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    /// The story cannot be laid out (e.g. a table row with the wrong arity).
    #[error("layout error: {0}")]
    Layout(String),

    /// lopdf failed to encode a content stream or serialize the file.
    #[error("encode error: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
