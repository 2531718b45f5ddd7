use crate::error::{PaymentError, Result};
use crate::interfaces::dto::TransactionRequest;
use std::io::Read;

/// Reads transaction requests (`account_id, amount`) from a CSV source.
///
/// Whitespace is trimmed and rows may omit trailing fields; an empty amount
/// becomes `None` and is left for the validator to reject.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<TransactionRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
