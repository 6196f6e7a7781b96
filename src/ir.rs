use chrono::NaiveDateTime;

/// Granularity of the time ruler, ordered finest to coarsest.
///
/// The derived `Ord` follows that order, so "coarser" compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeScale {
    Day,
    Week,
    TwoWeek,
    Month,
    Quarter,
    Year,
    FiveYear,
}

impl TimeScale {
    pub const ALL: [Self; 7] = [
        Self::Day,
        Self::Week,
        Self::TwoWeek,
        Self::Month,
        Self::Quarter,
        Self::Year,
        Self::FiveYear,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "2week" | "two-week" => Some(Self::TwoWeek),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            "5year" | "five-year" => Some(Self::FiveYear),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::TwoWeek => "2week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::FiveYear => "5year",
        }
    }
}

/// One endpoint of an element's interval.
///
/// `Open` endpoints clamp to the calendar bounds at layout time. `Invalid`
/// marks a date that was present in the input but failed to parse; such
/// elements are kept in the dataset and skipped by lane layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementDate {
    Open,
    Invalid,
    At(NaiveDateTime),
}

impl ElementDate {
    pub fn as_datetime(self) -> Option<NaiveDateTime> {
        match self {
            Self::At(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineElement {
    pub id: String,
    pub label: Option<String>,
    pub start: ElementDate,
    pub end: ElementDate,
}

impl TimelineElement {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            start: ElementDate::Open,
            end: ElementDate::Open,
        }
    }

    pub fn spanning(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            start: ElementDate::At(start),
            end: ElementDate::At(end),
        }
    }
}

/// A data row; its elements are packed into swim lanes independently of
/// every other row.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub id: String,
    pub label: Option<String>,
    pub elements: Vec<TimelineElement>,
}

impl TimelineRow {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<TimelineRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }
}
