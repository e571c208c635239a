//! Record filtering applied before a record is written.

use csv::ByteRecord;

/// True if every field of the record is the empty string.
pub(crate) fn is_empty_record(record: &ByteRecord) -> bool {
    record.iter().all(<[u8]>::is_empty)
}
