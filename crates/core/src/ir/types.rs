use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxLength {
    Bounded(u32),
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreGenerated {
    #[default]
    None,
    Identity,
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractType {
    Boolean,
    Byte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal {
        precision: Option<u8>,
        scale: Option<u8>,
    },
    String {
        max_length: Option<MaxLength>,
        unicode: bool,
        fixed_length: bool,
    },
    Binary {
        max_length: Option<MaxLength>,
        fixed_length: bool,
    },
    DateTime,
    DateTimeOffset {
        precision: Option<u8>,
    },
    Time {
        precision: Option<u8>,
    },
    Guid,
    Geography,
    Geometry,
}

impl AbstractType {
    pub fn string() -> Self {
        Self::String {
            max_length: None,
            unicode: true,
            fixed_length: false,
        }
    }

    pub fn binary() -> Self {
        Self::Binary {
            max_length: None,
            fixed_length: false,
        }
    }

    pub fn decimal() -> Self {
        Self::Decimal {
            precision: None,
            scale: None,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Decimal { .. } => "Decimal",
            Self::String { .. } => "String",
            Self::Binary { .. } => "Binary",
            Self::DateTime => "DateTime",
            Self::DateTimeOffset { .. } => "DateTimeOffset",
            Self::Time { .. } => "Time",
            Self::Guid => "Guid",
            Self::Geography => "Geography",
            Self::Geometry => "Geometry",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Time(NaiveTime),
    Guid(Uuid),
    Geography { srid: i32, well_known_text: String },
    Geometry { srid: i32, well_known_text: String },
}
