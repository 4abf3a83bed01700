use std::fmt;
use std::str::FromStr;

/// Category of a seismic event. Drives both signal generation and display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    #[default]
    Earthquake,
    Explosion,
    Tremor,
    Noise,
}

impl EventType {
    /// All event types in display order.
    pub const ALL: [EventType; 4] = [
        EventType::Earthquake,
        EventType::Explosion,
        EventType::Tremor,
        EventType::Noise,
    ];

    /// Lowercase tag, as accepted by `FromStr`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Earthquake => "earthquake",
            Self::Explosion => "explosion",
            Self::Tremor => "tremor",
            Self::Noise => "noise",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Earthquake => "Earthquake",
            Self::Explosion => "Explosion",
            Self::Tremor => "Tremor",
            Self::Noise => "Noise",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of the known event type tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEventTypeError(pub String);

impl fmt::Display for ParseEventTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown event type '{}' (expected earthquake, explosion, tremor or noise)",
            self.0
        )
    }
}

impl std::error::Error for ParseEventTypeError {}

impl FromStr for EventType {
    type Err = ParseEventTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        EventType::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| ParseEventTypeError(s.to_string()))
    }
}
