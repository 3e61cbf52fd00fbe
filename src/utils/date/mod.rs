// Date utility functions
// Normalisation of caller supplied instants onto a single UTC reference

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

pub fn to_utc<Tz: TimeZone>(instant: DateTime<Tz>) -> DateTime<Utc> {
    instant.with_timezone(&Utc)
}

/// Interprets a zone-less wall clock timestamp at UTC offset.
pub fn naive_as_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    naive.and_utc()
}
