use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    LogNotFound,
    LogReadFailed,
    LogParseError,
    AgentNotFound,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::LogNotFound => "E2001",
            Self::LogReadFailed => "E2002",
            Self::LogParseError => "E2003",
            Self::AgentNotFound => "E3001",
        }
    }

    /// Short snake-case identifier used in JSON error payloads.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ConfigParseError => "config_parse_error",
            Self::LogNotFound => "log_not_found",
            Self::LogReadFailed => "log_read_failed",
            Self::LogParseError => "log_parse_error",
            Self::AgentNotFound => "agent_not_found",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .colrank/config.toml and retry."),
            Self::LogNotFound => Some("Pass the path of a relay message log, or `-` for stdin."),
            Self::LogReadFailed => Some("Check that the file is readable."),
            Self::LogParseError => Some(
                "Provide a JSON array, a graph_data envelope, or one JSON object per line.",
            ),
            Self::AgentNotFound => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
