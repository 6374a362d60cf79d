use std::fmt;

/// Layout a mapping is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `KEY=VALUE` lines, as read by `docker --env-file`
    Environments,
    /// Java style `KEY = VALUE` lines with the key padded to a fixed width
    Properties,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Environments => "environments",
            FormatKind::Properties => "properties",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
