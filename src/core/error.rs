use thiserror::Error;

/// Errors that can occur while reading an NF-e document or exporting results.
///
/// A missing or unparseable *field* is never an error: field-level anomalies
/// degrade to empty strings or zero amounts so a partial document still
/// produces a best-effort report. Only a document that is not well-formed
/// XML aborts the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConferenciaError {
    /// The input is not well-formed XML (or not valid UTF-8).
    #[error("malformed XML: {0}")]
    MalformedXml(String),

    /// Export adapter failure (CSV serialization or archive I/O).
    #[error("export error: {0}")]
    Export(String),
}
