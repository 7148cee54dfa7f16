//! Meeting status commands.
//!
//! Pure commands: each returns the record(s) the caller should persist, so
//! the store write stays a single atomic operation at the boundary.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::{MeetingRecord, MeetingStatus};

/// Result of rescheduling a booked meeting.
#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleOutcome {
    /// The original record, now marked `Reschedule`.
    pub updated: MeetingRecord,
    /// The follow-up booking spawned in its place.
    pub spawned: MeetingRecord,
}

/// Change a meeting's status. Does not spawn anything; rescheduling goes
/// through [`reschedule`].
pub fn set_status(record: &MeetingRecord, status: MeetingStatus) -> MeetingRecord {
    let mut updated = record.clone();
    updated.status = status;
    updated
}

/// Mark a meeting rescheduled and spawn the follow-up booking.
///
/// The spawned record is a fresh `Pending` meeting booked `today`, carrying
/// the original's client, contact, company and performer. Nothing else comes
/// across: no meeting date, no notes.
pub fn reschedule(original: &MeetingRecord, today: NaiveDate) -> RescheduleOutcome {
    let spawned = MeetingRecord {
        id: Uuid::new_v4().to_string(),
        booking_date: today,
        meeting_date: None,
        client: original.client.clone(),
        contact: original.contact.clone(),
        company: original.company.clone(),
        performer: original.performer.clone(),
        status: MeetingStatus::Pending,
        notes: None,
    };

    tracing::info!(
        original = %original.id,
        spawned = %spawned.id,
        "Rescheduled meeting, spawned follow-up booking"
    );

    RescheduleOutcome {
        updated: set_status(original, MeetingStatus::Reschedule),
        spawned,
    }
}
