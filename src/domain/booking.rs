//! Booking rules: lifecycle status, the state filter used by list queries,
//! the approval transition and the interval checks run before creation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// Lifecycle of a booking. Persisted as the upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// Status an owner's decision moves a booking to.
    ///
    /// Approving an already APPROVED booking is a conflict; every other
    /// combination is allowed, including REJECTED -> APPROVED.
    pub fn decide(self, booking_id: i64, approved: bool) -> Result<BookingStatus, DomainError> {
        match (self, approved) {
            (BookingStatus::Approved, true) => Err(DomainError::BookingStatusConflict(booking_id)),
            (_, true) => Ok(BookingStatus::Approved),
            (_, false) => Ok(BookingStatus::Rejected),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            other => Err(DomainError::Internal(format!(
                "unknown booking status '{}' in storage",
                other
            ))),
        }
    }
}

/// Filter requested by list queries (`?state=`), distinct from [`BookingStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Future,
    Past,
    Waiting,
    Rejected,
}

impl BookingState {
    pub const ALL_STATES: [BookingState; 6] = [
        BookingState::All,
        BookingState::Current,
        BookingState::Future,
        BookingState::Past,
        BookingState::Waiting,
        BookingState::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Future => "FUTURE",
            BookingState::Past => "PAST",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }

    /// Whether a booking belongs to this state at instant `now`.
    /// Boundaries are exclusive: a booking starting exactly at `now` is neither
    /// CURRENT nor FUTURE.
    pub fn matches(&self, booking: &Booking, now: NaiveDateTime) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => now > booking.start && now < booking.end,
            BookingState::Future => now < booking.start,
            BookingState::Past => now > booking.end,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse of the `state` query parameter
impl FromStr for BookingState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_STATES
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownBookingState(s.to_string()))
    }
}

/// Minimal item data carried by a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedItem {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub item: BookedItem,
    pub booker_id: i64,
}

/// Input for persisting a new booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Parses an ISO local date-time; seconds and fractions are optional
pub fn parse_local_datetime(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}

fn deserialize_local_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_local_datetime(&raw).map_err(|e| {
                serde::de::Error::custom(format!("invalid date-time '{}': {}", raw, e))
            })
        })
        .transpose()
}

/// Body of `POST /bookings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default, deserialize_with = "deserialize_local_datetime")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_local_datetime")]
    pub end: Option<NaiveDateTime>,
    pub item_id: Option<i64>,
}

/// A booking request that passed shape validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidBookingRequest {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub item_id: i64,
}

impl BookingRequest {
    /// Shape checks that need no storage access:
    /// both ends present, start not in the past, end in the future, start strictly before end.
    pub fn validate(&self, now: NaiveDateTime) -> Result<ValidBookingRequest, DomainError> {
        let start = self
            .start
            .ok_or_else(|| DomainError::InvalidInterval("start must be present".to_string()))?;
        let end = self
            .end
            .ok_or_else(|| DomainError::InvalidInterval("end must be present".to_string()))?;
        let item_id = self
            .item_id
            .ok_or_else(|| DomainError::Validation("itemId must be present".to_string()))?;

        if start < now {
            return Err(DomainError::InvalidInterval(format!(
                "start {} is in the past",
                start
            )));
        }
        if end <= now {
            return Err(DomainError::InvalidInterval(format!(
                "end {} is not in the future",
                end
            )));
        }
        if end <= start {
            return Err(DomainError::InvalidInterval(format!(
                "end {} must be after start {}",
                end, start
            )));
        }

        Ok(ValidBookingRequest {
            start,
            end,
            item_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookerView {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedItemView {
    pub id: i64,
    pub name: String,
}

/// Booking as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: String,
    pub booker: BookerView,
    pub item: BookedItemView,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status.to_string(),
            booker: BookerView {
                id: booking.booker_id,
            },
            item: BookedItemView {
                id: booking.item.id,
                name: booking.item.name,
            },
        }
    }
}
