use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Services that emit log records into the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Sender,
    Middleware,
    Receiver,
}

impl ServiceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sender => "sender",
            Self::Middleware => "middleware",
            Self::Receiver => "receiver",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sender" => Ok(Self::Sender),
            "middleware" => Ok(Self::Middleware),
            "receiver" => Ok(Self::Receiver),
            _ => Err(()),
        }
    }
}

/// Log severity levels accepted by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "debug" => Ok(Self::Debug),
            _ => Err(()),
        }
    }
}

/// A single structured log record as exchanged with the collector.
///
/// Immutable once created. `timestamp` carries the ISO-8601 wire format;
/// [`LogRecord::timestamp_millis`] is used for query-time ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub service: ServiceName,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl LogRecord {
    /// Timestamp as Unix milliseconds for sorting. Unparsable timestamps
    /// sort last in a descending query.
    pub fn timestamp_millis(&self) -> i64 {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.timestamp_millis())
            .unwrap_or(i64::MIN)
    }
}

/// Current UTC time in the ISO-8601 format used on the wire.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let record = LogRecord {
            service: ServiceName::Receiver,
            level: LogLevel::Info,
            message: "reversed text".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
            request_id: Some("abc-123".to_string()),
            metadata: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["service"], "receiver");
        assert_eq!(json["level"], "info");
        assert_eq!(json["requestId"], "abc-123");
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_timestamp_millis_ordering() {
        let early = LogRecord {
            service: ServiceName::Sender,
            level: LogLevel::Debug,
            message: "first".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
            request_id: None,
            metadata: None,
        };
        let late = LogRecord {
            timestamp: "2026-01-01T00:00:01.000Z".to_string(),
            ..early.clone()
        };

        assert!(late.timestamp_millis() > early.timestamp_millis());
    }

    #[test]
    fn test_unparsable_timestamp_sorts_last() {
        let bad = LogRecord {
            service: ServiceName::Sender,
            level: LogLevel::Info,
            message: "broken clock".to_string(),
            timestamp: "not-a-timestamp".to_string(),
            request_id: None,
            metadata: None,
        };
        assert_eq!(bad.timestamp_millis(), i64::MIN);
    }

    #[test]
    fn test_service_and_level_round_trip() {
        assert_eq!("middleware".parse::<ServiceName>(), Ok(ServiceName::Middleware));
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("collector".parse::<ServiceName>().is_err());
        assert!("trace".parse::<LogLevel>().is_err());
    }
}
