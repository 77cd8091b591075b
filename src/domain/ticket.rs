use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Ticket workflow state as reported by the support API.
///
/// Upstream systems send either the symbolic name (`"IN_PROGRESS"`) or the
/// legacy numeric code (`1`); both land on the same variant. Anything else is
/// `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
    Cancelled,
    #[default]
    Unknown,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Closed,
        TicketStatus::Cancelled,
    ];

    pub fn from_code(code: &Value) -> Self {
        match code {
            Value::Number(_) => numeric_code(code)
                .map(Self::from_numeric)
                .unwrap_or(TicketStatus::Unknown),
            Value::String(name) => Self::from_name(name),
            _ => TicketStatus::Unknown,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "OPEN" => TicketStatus::Open,
            "IN_PROGRESS" => TicketStatus::InProgress,
            "CLOSED" => TicketStatus::Closed,
            "CANCELLED" => TicketStatus::Cancelled,
            "0" => TicketStatus::Open,
            "1" => TicketStatus::InProgress,
            "2" => TicketStatus::Closed,
            "3" => TicketStatus::Cancelled,
            _ => TicketStatus::Unknown,
        }
    }

    fn from_numeric(code: i64) -> Self {
        match code {
            0 => TicketStatus::Open,
            1 => TicketStatus::InProgress,
            2 => TicketStatus::Closed,
            3 => TicketStatus::Cancelled,
            _ => TicketStatus::Unknown,
        }
    }

    /// Parses a user-supplied filter value. `Unknown` is never a valid filter.
    pub fn parse_filter(value: &str) -> Option<Self> {
        let normalized = value.trim().to_uppercase().replace([' ', '-'], "_");
        match Self::from_name(&normalized) {
            TicketStatus::Unknown => None,
            status => Some(status),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Closed => "Closed",
            TicketStatus::Cancelled => "Cancelled",
            TicketStatus::Unknown => "Unknown",
        }
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Closed => "CLOSED",
            TicketStatus::Cancelled => "CANCELLED",
            TicketStatus::Unknown => "UNKNOWN",
        }
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_code(&raw))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
    #[default]
    Unknown,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 4] = [
        TicketPriority::Low,
        TicketPriority::Medium,
        TicketPriority::High,
        TicketPriority::Urgent,
    ];

    pub fn from_code(code: &Value) -> Self {
        match code {
            Value::Number(_) => numeric_code(code)
                .map(Self::from_numeric)
                .unwrap_or(TicketPriority::Unknown),
            Value::String(name) => Self::from_name(name),
            _ => TicketPriority::Unknown,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "LOW" => TicketPriority::Low,
            "MEDIUM" => TicketPriority::Medium,
            "HIGH" => TicketPriority::High,
            "URGENT" => TicketPriority::Urgent,
            "0" => TicketPriority::Low,
            "1" => TicketPriority::Medium,
            "2" => TicketPriority::High,
            "3" => TicketPriority::Urgent,
            _ => TicketPriority::Unknown,
        }
    }

    fn from_numeric(code: i64) -> Self {
        match code {
            0 => TicketPriority::Low,
            1 => TicketPriority::Medium,
            2 => TicketPriority::High,
            3 => TicketPriority::Urgent,
            _ => TicketPriority::Unknown,
        }
    }

    pub fn parse_filter(value: &str) -> Option<Self> {
        match Self::from_name(&value.trim().to_uppercase()) {
            TicketPriority::Unknown => None,
            priority => Some(priority),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
            TicketPriority::Urgent => "Urgent",
            TicketPriority::Unknown => "Unknown",
        }
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            TicketPriority::Low => "LOW",
            TicketPriority::Medium => "MEDIUM",
            TicketPriority::High => "HIGH",
            TicketPriority::Urgent => "URGENT",
            TicketPriority::Unknown => "UNKNOWN",
        }
    }
}

impl<'de> Deserialize<'de> for TicketPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_code(&raw))
    }
}

// Whole-valued floats (`2.0`) count as codes too.
fn numeric_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|code| code.fract() == 0.0)
            .map(|code| code as i64)
    })
}

/// A support ticket snapshot. Records are read-only here; every field is
/// optional on the wire and a mistyped field reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ticket {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<String>,
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

// Numbers are epoch milliseconds and are normalized to RFC 3339 text.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64))
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(|moment| moment.to_rfc3339()),
        _ => None,
    })
}

impl Ticket {
    pub fn created_at_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.created_at
            .as_deref()
            .and_then(|raw| parse_timestamp_in(raw, tz))
    }

    pub fn created_on_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.created_at_in(tz).map(|moment| moment.date_naive())
    }
}

/// Parses the timestamp shapes the support API has been seen to emit.
///
/// Offset-qualified values are converted into `tz`. Naive date-times are read
/// as wall-clock time in `tz`; bare dates are UTC midnight.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Some(moment.with_timezone(tz));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return resolve_wall_clock(naive, |local| tz.from_local_datetime(local));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

// A wall-clock time inside a DST gap moves forward past the gap.
fn resolve_wall_clock<T>(
    naive: NaiveDateTime,
    lookup: impl Fn(&NaiveDateTime) -> LocalResult<T>,
) -> Option<T> {
    lookup(&naive)
        .earliest()
        .or_else(|| lookup(&(naive + Duration::hours(1))).earliest())
}

/// Optional equality constraints for a ticket listing. `None` means no
/// constraint on that field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

impl TicketFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.api_name()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.api_name()));
        }
        pairs
    }
}
