use crate::domain::transaction::Transaction;
use crate::error::Result;
use std::io::Write;

/// Writes finalized transactions as CSV with header
/// `id,account_id,amount,status,timestamp`.
pub struct SnapshotWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, tx: &Transaction) -> Result<()> {
        self.writer.serialize(tx)?;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, transactions: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        for tx in transactions {
            self.write(tx)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
