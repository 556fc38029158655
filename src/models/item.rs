use serde::Serialize;

/// The tables the sample fetch is allowed to touch. Table names come only
/// from `table_name`, so nothing request-derived ever reaches the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    History,
    HistoryUint,
    HistoryStr,
    HistoryLog,
    HistoryText,
    Trends,
    TrendsUint,
}

impl TableKind {
    pub fn table_name(self) -> &'static str {
        match self {
            TableKind::History => "history",
            TableKind::HistoryUint => "history_uint",
            TableKind::HistoryStr => "history_str",
            TableKind::HistoryLog => "history_log",
            TableKind::HistoryText => "history_text",
            TableKind::Trends => "trends",
            TableKind::TrendsUint => "trends_uint",
        }
    }

    pub fn is_trends(self) -> bool {
        matches!(self, TableKind::Trends | TableKind::TrendsUint)
    }

    /// Tables whose value column is text rather than numeric.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            TableKind::HistoryStr | TableKind::HistoryLog | TableKind::HistoryText
        )
    }

    /// Tables whose value column is an unsigned integer.
    pub fn is_unsigned(self) -> bool {
        matches!(self, TableKind::HistoryUint | TableKind::TrendsUint)
    }
}

/// Item value types (items.value_type, 0..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Float,
    Character,
    Log,
    Unsigned,
    Text,
}

impl ValueKind {
    /// Maps the raw value_type column; anything else is a collaborator
    /// contract breach.
    pub fn from_raw(value_type: i32) -> Option<Self> {
        match value_type {
            0 => Some(ValueKind::Float),
            1 => Some(ValueKind::Character),
            2 => Some(ValueKind::Log),
            3 => Some(ValueKind::Unsigned),
            4 => Some(ValueKind::Text),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Character => "character",
            ValueKind::Log => "log",
            ValueKind::Unsigned => "unsigned",
            ValueKind::Text => "text",
        }
    }

    pub fn history_table(self) -> TableKind {
        match self {
            ValueKind::Float => TableKind::History,
            ValueKind::Character => TableKind::HistoryStr,
            ValueKind::Log => TableKind::HistoryLog,
            ValueKind::Unsigned => TableKind::HistoryUint,
            ValueKind::Text => TableKind::HistoryText,
        }
    }

    /// Rollup table; string/log/text items keep no trends.
    pub fn trends_table(self) -> Option<TableKind> {
        match self {
            ValueKind::Float => Some(TableKind::Trends),
            ValueKind::Unsigned => Some(TableKind::TrendsUint),
            ValueKind::Character | ValueKind::Log | ValueKind::Text => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Float | ValueKind::Unsigned)
    }
}

/// Read-only item metadata fetched per request; never cached or mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    pub item_id: u64,
    pub host_id: u64,
    pub hostname: String,
    pub name: String,
    pub enabled: bool,
    pub units: String,
    pub value_kind: ValueKind,
    /// Retention duration strings as stored upstream (e.g. "31d", "90d").
    pub history_retention: String,
    pub trends_retention: String,
}
