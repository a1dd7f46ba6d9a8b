//! Mapping between abstract column types and engine store types.

use tsqlgen_core::{AbstractType, Error, MaxLength, Result, TypeError};

use crate::capabilities::DialectCapabilities;

/// Widest bounded `nvarchar`/`nchar` length.
pub const NVARCHAR_MAX_LENGTH: u32 = 4000;
/// Widest bounded `varchar`/`char` length.
pub const VARCHAR_MAX_LENGTH: u32 = 8000;
/// Widest bounded `binary`/`varbinary` length.
pub const BINARY_MAX_LENGTH: u32 = 8000;

pub const DEFAULT_NUMERIC_PRECISION: u8 = 18;
pub const DEFAULT_NUMERIC_SCALE: u8 = 0;
pub const DEFAULT_TIME_PRECISION: u8 = 7;
pub const DEFAULT_MAX_LENGTH: u32 = 128;

/// A resolved store type: a name plus the facets that render after it.
///
/// `unbounded` marks the `(max)` form; it is mutually exclusive with
/// `max_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteType {
    pub name: String,
    pub unbounded: bool,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub max_length: Option<u32>,
}

impl ConcreteType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unbounded: false,
            precision: None,
            scale: None,
            max_length: None,
        }
    }

    #[must_use]
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            unbounded: true,
            ..Self::named(name)
        }
    }

    #[must_use]
    pub fn sized(name: impl Into<String>, max_length: u32) -> Self {
        Self {
            max_length: Some(max_length),
            ..Self::named(name)
        }
    }
}

/// Resolves the store type for an abstract column type on the given engine
/// version.
pub fn to_concrete(ty: &AbstractType, capabilities: &DialectCapabilities) -> Result<ConcreteType> {
    let concrete = match *ty {
        AbstractType::Boolean => ConcreteType::named("bit"),
        AbstractType::Byte => ConcreteType::named("tinyint"),
        AbstractType::Int16 => ConcreteType::named("smallint"),
        AbstractType::Int32 => ConcreteType::named("int"),
        AbstractType::Int64 => ConcreteType::named("bigint"),
        AbstractType::Single => ConcreteType::named("real"),
        AbstractType::Double => ConcreteType::named("float"),
        AbstractType::Decimal { precision, scale } => ConcreteType {
            precision: Some(precision.unwrap_or(DEFAULT_NUMERIC_PRECISION)),
            scale: Some(scale.unwrap_or(DEFAULT_NUMERIC_SCALE)),
            ..ConcreteType::named("decimal")
        },
        AbstractType::String {
            max_length,
            unicode,
            fixed_length,
        } => concrete_string(max_length, unicode, fixed_length, capabilities),
        AbstractType::Binary {
            max_length,
            fixed_length,
        } => concrete_binary(max_length, fixed_length, capabilities),
        AbstractType::DateTime => ConcreteType::named("datetime"),
        AbstractType::DateTimeOffset { precision } => {
            if !capabilities.supports_extended_date_time {
                return Err(unsupported_type(ty.kind_name(), capabilities));
            }
            ConcreteType {
                precision,
                ..ConcreteType::named("datetimeoffset")
            }
        }
        AbstractType::Time { precision } => {
            if !capabilities.supports_extended_date_time {
                return Err(unsupported_type(ty.kind_name(), capabilities));
            }
            ConcreteType {
                precision,
                ..ConcreteType::named("time")
            }
        }
        AbstractType::Guid => ConcreteType::named("uniqueidentifier"),
        AbstractType::Geography => {
            if !capabilities.supports_spatial {
                return Err(unsupported_type(ty.kind_name(), capabilities));
            }
            ConcreteType::named("geography")
        }
        AbstractType::Geometry => {
            if !capabilities.supports_spatial {
                return Err(unsupported_type(ty.kind_name(), capabilities));
            }
            ConcreteType::named("geometry")
        }
    };

    Ok(concrete)
}

/// Builds the store type for a column whose model carries an explicit store
/// type name, copying the facets the abstract type declares. A trailing
/// `(max)` marks the unbounded form, matched case-sensitively.
#[must_use]
pub fn from_store_name(name: &str, ty: &AbstractType) -> ConcreteType {
    let mut concrete = match name.strip_suffix("(max)") {
        Some(base) => ConcreteType::unbounded(base),
        None => ConcreteType::named(name),
    };

    match *ty {
        AbstractType::Decimal { precision, scale } => {
            concrete.precision = precision;
            concrete.scale = scale;
        }
        AbstractType::String { max_length, .. } | AbstractType::Binary { max_length, .. } => {
            if let Some(MaxLength::Bounded(length)) = max_length {
                concrete.max_length = Some(length);
            }
        }
        AbstractType::DateTimeOffset { precision } | AbstractType::Time { precision } => {
            concrete.precision = precision;
        }
        _ => {}
    }

    concrete
}

/// Resolves a column or parameter to its store type: an explicit store type
/// name wins, otherwise the abstract type maps through [`to_concrete`].
pub fn resolve_store_type(
    ty: &AbstractType,
    store_type: Option<&str>,
    capabilities: &DialectCapabilities,
) -> Result<ConcreteType> {
    match store_type {
        Some(name) => Ok(from_store_name(name, ty)),
        None => to_concrete(ty, capabilities),
    }
}

/// Recovers the abstract type a store type maps back to, for reverse
/// engineering an existing schema. Store type names match case-insensitively;
/// a trailing `(max)` selects the unbounded form.
pub fn to_abstract(
    concrete: &ConcreteType,
    capabilities: &DialectCapabilities,
) -> Result<AbstractType> {
    let lowered = concrete.name.to_ascii_lowercase();
    let (base, unbounded) = match lowered.strip_suffix("(max)") {
        Some(base) => (base, true),
        None => (lowered.as_str(), concrete.unbounded),
    };

    if unbounded && !capabilities.supports_max_types {
        return Err(unsupported_type(&concrete.name, capabilities));
    }

    let ty = match base {
        "bit" => AbstractType::Boolean,
        "tinyint" => AbstractType::Byte,
        "smallint" => AbstractType::Int16,
        "int" => AbstractType::Int32,
        "bigint" => AbstractType::Int64,
        "real" => AbstractType::Single,
        "float" => AbstractType::Double,
        "decimal" | "numeric" => AbstractType::Decimal {
            precision: concrete.precision,
            scale: concrete.scale,
        },
        // Money loses its identity on the way in; it maps back out as decimal.
        "money" => AbstractType::Decimal {
            precision: Some(19),
            scale: Some(4),
        },
        "smallmoney" => AbstractType::Decimal {
            precision: Some(10),
            scale: Some(4),
        },
        "nvarchar" | "varchar" => AbstractType::String {
            max_length: variable_max_length(unbounded, concrete.max_length),
            unicode: base == "nvarchar",
            fixed_length: false,
        },
        "nchar" | "char" => AbstractType::String {
            max_length: concrete.max_length.map(MaxLength::Bounded),
            unicode: base == "nchar",
            fixed_length: true,
        },
        "ntext" | "text" => AbstractType::String {
            max_length: Some(MaxLength::Unbounded),
            unicode: base == "ntext",
            fixed_length: false,
        },
        "xml" if capabilities.supports_max_types => AbstractType::String {
            max_length: Some(MaxLength::Unbounded),
            unicode: true,
            fixed_length: false,
        },
        "binary" => AbstractType::Binary {
            max_length: concrete.max_length.map(MaxLength::Bounded),
            fixed_length: true,
        },
        "varbinary" => AbstractType::Binary {
            max_length: variable_max_length(unbounded, concrete.max_length),
            fixed_length: false,
        },
        "image" => AbstractType::Binary {
            max_length: Some(MaxLength::Unbounded),
            fixed_length: false,
        },
        "rowversion" | "timestamp" => AbstractType::Binary {
            max_length: Some(MaxLength::Bounded(8)),
            fixed_length: true,
        },
        "datetime" | "smalldatetime" => AbstractType::DateTime,
        "date" | "datetime2" if capabilities.supports_extended_date_time => AbstractType::DateTime,
        "datetimeoffset" if capabilities.supports_extended_date_time => {
            AbstractType::DateTimeOffset {
                precision: concrete.precision,
            }
        }
        "time" if capabilities.supports_extended_date_time => AbstractType::Time {
            precision: concrete.precision,
        },
        "uniqueidentifier" => AbstractType::Guid,
        "geography" if capabilities.supports_spatial => AbstractType::Geography,
        "geometry" if capabilities.supports_spatial => AbstractType::Geometry,
        _ => return Err(unsupported_type(&concrete.name, capabilities)),
    };

    Ok(ty)
}

fn concrete_string(
    max_length: Option<MaxLength>,
    unicode: bool,
    fixed_length: bool,
    capabilities: &DialectCapabilities,
) -> ConcreteType {
    let (fixed_name, variable_name, legacy_name, cap) = if unicode {
        ("nchar", "nvarchar", "ntext", NVARCHAR_MAX_LENGTH)
    } else {
        ("char", "varchar", "text", VARCHAR_MAX_LENGTH)
    };

    let bounded = bounded_within(max_length, cap);

    if fixed_length {
        return ConcreteType::sized(fixed_name, bounded.unwrap_or(cap));
    }
    if let Some(length) = bounded {
        return ConcreteType::sized(variable_name, length);
    }
    if capabilities.supports_max_types {
        return ConcreteType::unbounded(variable_name);
    }
    if explicitly_unbounded(max_length, cap) {
        return ConcreteType::named(legacy_name);
    }
    ConcreteType::sized(variable_name, cap)
}

fn concrete_binary(
    max_length: Option<MaxLength>,
    fixed_length: bool,
    capabilities: &DialectCapabilities,
) -> ConcreteType {
    let bounded = bounded_within(max_length, BINARY_MAX_LENGTH);

    if fixed_length {
        return ConcreteType::sized("binary", bounded.unwrap_or(BINARY_MAX_LENGTH));
    }
    if let Some(length) = bounded {
        return ConcreteType::sized("varbinary", length);
    }
    if capabilities.supports_max_types {
        return ConcreteType::unbounded("varbinary");
    }
    if explicitly_unbounded(max_length, BINARY_MAX_LENGTH) {
        return ConcreteType::named("image");
    }
    ConcreteType::sized("varbinary", BINARY_MAX_LENGTH)
}

/// A declared length the bounded form can hold, if any.
fn bounded_within(max_length: Option<MaxLength>, cap: u32) -> Option<u32> {
    match max_length {
        Some(MaxLength::Bounded(length)) if length <= cap => Some(length),
        _ => None,
    }
}

/// Whether the declared length demands more than the bounded form can hold.
fn explicitly_unbounded(max_length: Option<MaxLength>, cap: u32) -> bool {
    match max_length {
        Some(MaxLength::Unbounded) => true,
        Some(MaxLength::Bounded(length)) => length > cap,
        None => false,
    }
}

fn variable_max_length(unbounded: bool, max_length: Option<u32>) -> Option<MaxLength> {
    if unbounded {
        return Some(MaxLength::Unbounded);
    }
    max_length.map(MaxLength::Bounded)
}

fn unsupported_type(name: &str, capabilities: &DialectCapabilities) -> Error {
    TypeError::Unsupported {
        name: name.to_owned(),
        dialect: capabilities.dialect_name().to_owned(),
    }
    .into()
}
