//! Domain records exchanged with the store

pub mod measurement;
pub mod payment;
pub mod record_id;
pub mod snapshot;
pub mod student;
pub mod timestamp;

pub use measurement::{
    format_number, parse_decimal, FieldGroup, MeasurementField, Measurements, Unit,
};
pub use payment::{format_brl, NewPayment, Payment, RevenueSummary, UNKNOWN_STUDENT_NAME};
pub use record_id::RecordId;
pub use snapshot::{NewSnapshot, Snapshot};
pub use student::{sort_by_name, Student, StudentPayload};
pub use timestamp::{parse_utc_offset, Timestamp, TimestampError};
