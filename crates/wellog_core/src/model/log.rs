//! Log domain model.
//!
//! # Responsibility
//! - Define the canonical record for one wellness activity.
//! - Validate creation requests and wire payloads against the type rules.
//!
//! # Invariants
//! - `id` is stable and never nil.
//! - `unit` is derived from `kind` and cannot be set independently.
//! - `value` is numeric for water/exercise/sleep and categorical for mood.
//! - Numeric amounts are finite and strictly positive.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one log entry.
pub type LogId = Uuid;

/// Closed set of activity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    /// Glasses of water.
    Water,
    /// Minutes of exercise.
    Exercise,
    /// Hours of sleep.
    Sleep,
    /// Categorical mood rating.
    Mood,
}

impl LogType {
    /// Every kind, in display order.
    pub const ALL: [LogType; 4] = [
        LogType::Water,
        LogType::Exercise,
        LogType::Sleep,
        LogType::Mood,
    ];

    /// Canonical unit label, `None` for mood.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::Water => Some("glasses"),
            Self::Exercise => Some("minutes"),
            Self::Sleep => Some("hours"),
            Self::Mood => None,
        }
    }

    /// Stable lowercase label used on the wire and in type tabs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::Mood => "mood",
        }
    }

    /// Whether values of this kind are categorical rather than numeric.
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Mood)
    }

    fn expected_representation(self) -> &'static str {
        if self.is_categorical() {
            "mood rating"
        } else {
            "numeric amount"
        }
    }
}

impl Display for LogType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = InvalidLogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => Err(InvalidLogError::MissingType),
            "water" => Ok(Self::Water),
            "exercise" => Ok(Self::Exercise),
            "sleep" => Ok(Self::Sleep),
            "mood" => Ok(Self::Mood),
            _ => Err(InvalidLogError::UnknownType(value.trim().to_string())),
        }
    }
}

/// Mood rating, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Excellent,
    Good,
    Neutral,
    Fair,
    Poor,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Excellent,
        Mood::Good,
        Mood::Neutral,
        Mood::Fair,
        Mood::Poor,
    ];

    /// Display label (`Excellent`, `Good`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Neutral => "Neutral",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    /// Normalized score in `[0, 1]`, `Excellent` = 1.0.
    pub fn score(self) -> f64 {
        match self {
            Self::Excellent => 1.0,
            Self::Good => 0.75,
            Self::Neutral => 0.5,
            Self::Fair => 0.25,
            Self::Poor => 0.0,
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = InvalidLogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| InvalidLogError::UnknownMood(value.trim().to_string()))
    }
}

/// Magnitude of one log entry.
///
/// Serialized untagged: numbers for amounts, strings for moods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    Amount(f64),
    Mood(Mood),
}

impl LogValue {
    /// Parses raw user input for the given kind.
    ///
    /// Numeric kinds accept decimal text, mood accepts a rating label.
    pub fn parse_for(kind: LogType, raw: &str) -> Result<Self, InvalidLogError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidLogError::MissingValue(kind));
        }
        if kind.is_categorical() {
            return trimmed.parse::<Mood>().map(Self::Mood);
        }
        let amount = trimmed
            .parse::<f64>()
            .map_err(|_| InvalidLogError::ValueMismatch {
                kind,
                expected: kind.expected_representation(),
            })?;
        Ok(Self::Amount(amount))
    }

    /// Text rendering used by search and display (`8`, `7.5`, `Good`).
    pub fn render(&self) -> String {
        match self {
            Self::Amount(amount) => amount.to_string(),
            Self::Mood(mood) => mood.label().to_string(),
        }
    }

    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Mood(_) => None,
        }
    }

    pub fn as_mood(&self) -> Option<Mood> {
        match self {
            Self::Amount(_) => None,
            Self::Mood(mood) => Some(*mood),
        }
    }

    fn check_for(&self, kind: LogType) -> Result<(), InvalidLogError> {
        match (kind.is_categorical(), self) {
            (false, Self::Amount(amount)) => {
                if amount.is_finite() && *amount > 0.0 {
                    Ok(())
                } else {
                    Err(InvalidLogError::InvalidAmount {
                        kind,
                        amount: *amount,
                    })
                }
            }
            (true, Self::Mood(_)) => Ok(()),
            _ => Err(InvalidLogError::ValueMismatch {
                kind,
                expected: kind.expected_representation(),
            }),
        }
    }
}

impl Display for LogValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Validation error for log creation and wire decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidLogError {
    MissingType,
    UnknownType(String),
    MissingValue(LogType),
    ValueMismatch {
        kind: LogType,
        expected: &'static str,
    },
    InvalidAmount {
        kind: LogType,
        amount: f64,
    },
    UnknownMood(String),
    UnitMismatch {
        kind: LogType,
        unit: String,
    },
    NilId,
}

impl Display for InvalidLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingType => write!(f, "log type is required"),
            Self::UnknownType(value) => write!(
                f,
                "unknown log type `{value}`; expected water|exercise|sleep|mood"
            ),
            Self::MissingValue(kind) => write!(f, "value is required for {kind} logs"),
            Self::ValueMismatch { kind, expected } => {
                write!(f, "{kind} logs require a {expected}")
            }
            Self::InvalidAmount { kind, amount } => write!(
                f,
                "{kind} amount must be a positive finite number, got {amount}"
            ),
            Self::UnknownMood(value) => write!(
                f,
                "unknown mood `{value}`; expected excellent|good|neutral|fair|poor"
            ),
            Self::UnitMismatch { kind, unit } => {
                write!(f, "unit `{unit}` is not the canonical unit for {kind} logs")
            }
            Self::NilId => write!(f, "log id must not be nil"),
        }
    }
}

impl Error for InvalidLogError {}

/// Creation request for a new log.
///
/// Missing fields are reported by validation rather than by the type system,
/// so partially filled presentation-layer forms can be passed through as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogDraft {
    pub kind: Option<LogType>,
    pub value: Option<LogValue>,
    pub notes: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

impl LogDraft {
    pub fn new(kind: LogType, value: LogValue) -> Self {
        Self {
            kind: Some(kind),
            value: Some(value),
            notes: None,
            timestamp: None,
        }
    }

    pub fn amount(kind: LogType, amount: f64) -> Self {
        Self::new(kind, LogValue::Amount(amount))
    }

    pub fn mood(mood: Mood) -> Self {
        Self::new(LogType::Mood, LogValue::Mood(mood))
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Canonical wellness log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LogRecord", into = "LogRecord")]
pub struct Log {
    id: LogId,
    kind: LogType,
    value: LogValue,
    timestamp: NaiveDateTime,
    notes: Option<String>,
}

impl Log {
    /// Creates a validated log with a generated stable ID.
    pub fn new(
        kind: LogType,
        value: LogValue,
        timestamp: NaiveDateTime,
    ) -> Result<Self, InvalidLogError> {
        Self::with_id(Uuid::new_v4(), kind, value, timestamp)
    }

    /// Creates a validated log with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists.
    pub fn with_id(
        id: LogId,
        kind: LogType,
        value: LogValue,
        timestamp: NaiveDateTime,
    ) -> Result<Self, InvalidLogError> {
        if id.is_nil() {
            return Err(InvalidLogError::NilId);
        }
        value.check_for(kind)?;
        Ok(Self {
            id,
            kind,
            value,
            timestamp,
            notes: None,
        })
    }

    /// Attaches notes; blank text clears them.
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = normalize_notes(notes);
        self
    }

    pub fn id(&self) -> LogId {
        self.id
    }

    pub fn kind(&self) -> LogType {
        self.kind
    }

    pub fn value(&self) -> &LogValue {
        &self.value
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.kind.unit()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Calendar date of the timestamp; used as the grouping key.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Value with unit, e.g. `8 glasses` or `Good`.
    pub fn display_value(&self) -> String {
        match self.unit() {
            Some(unit) => format!("{} {unit}", self.value.render()),
            None => self.value.render(),
        }
    }
}

pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|text| !text.trim().is_empty())
}

/// Wire shape of [`Log`]; decoding re-validates every invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogRecord {
    id: LogId,
    #[serde(rename = "type")]
    kind: LogType,
    value: LogValue,
    #[serde(default)]
    unit: Option<String>,
    timestamp: NaiveDateTime,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<LogRecord> for Log {
    type Error = InvalidLogError;

    fn try_from(record: LogRecord) -> Result<Self, Self::Error> {
        if let Some(unit) = record.unit {
            if record.kind.unit() != Some(unit.as_str()) {
                return Err(InvalidLogError::UnitMismatch {
                    kind: record.kind,
                    unit,
                });
            }
        }
        Ok(Log::with_id(record.id, record.kind, record.value, record.timestamp)?
            .with_notes(record.notes))
    }
}

impl From<Log> for LogRecord {
    fn from(log: Log) -> Self {
        Self {
            id: log.id,
            kind: log.kind,
            value: log.value,
            unit: log.kind.unit().map(str::to_string),
            timestamp: log.timestamp,
            notes: log.notes,
        }
    }
}
