use tsqlgen_core::Result;

use crate::version::{AZURE_TOKEN, SqlVersion};

/// Escape character used when rewriting LIKE patterns.
pub const LIKE_ESCAPE_CHAR: char = '~';

/// Feature profile of one engine version, resolved from a dialect token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectCapabilities {
    pub version: SqlVersion,
    pub azure: bool,
    pub supports_schemas: bool,
    pub supports_max_types: bool,
    pub supports_extended_date_time: bool,
    pub supports_spatial: bool,
    pub supports_engine_edition_ddl: bool,
    pub supports_sequential_guid_default: bool,
    pub like_escape_char: char,
}

impl DialectCapabilities {
    pub fn resolve(token: &str) -> Result<Self> {
        let version = SqlVersion::from_token(token)?;
        let azure = token == AZURE_TOKEN;

        Ok(Self {
            version,
            azure,
            supports_schemas: version >= SqlVersion::Sql9,
            supports_max_types: version >= SqlVersion::Sql9,
            supports_extended_date_time: version >= SqlVersion::Sql10,
            supports_spatial: version >= SqlVersion::Sql10,
            supports_engine_edition_ddl: !azure,
            supports_sequential_guid_default: !azure && version != SqlVersion::Sql8,
            like_escape_char: LIKE_ESCAPE_CHAR,
        })
    }

    #[must_use]
    pub fn dialect_name(&self) -> &'static str {
        if self.azure {
            return "SQL Azure";
        }
        self.version.display_name()
    }

    /// Primitive store type names this engine version exposes, in name order.
    #[must_use]
    pub fn store_type_names(&self) -> Vec<&'static str> {
        STORE_TYPE_NAMES
            .iter()
            .filter(|(_, gate)| self.allows(*gate))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Built-in function signatures available on this engine version.
    #[must_use]
    pub fn store_functions(&self) -> Vec<StoreFunction> {
        STORE_FUNCTIONS
            .iter()
            .copied()
            .filter(|function| match self.version {
                SqlVersion::Sql8 => !requires_sql10(function) && !requires_sql9(function),
                SqlVersion::Sql9 => !requires_sql10(function),
                SqlVersion::Sql10 | SqlVersion::Sql11 => true,
            })
            .collect()
    }

    fn allows(&self, gate: TypeGate) -> bool {
        match gate {
            TypeGate::Always => true,
            TypeGate::MaxTypes => self.supports_max_types,
            TypeGate::ExtendedDateTime => self.supports_extended_date_time,
            TypeGate::Spatial => self.supports_spatial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeGate {
    Always,
    MaxTypes,
    ExtendedDateTime,
    Spatial,
}

const STORE_TYPE_NAMES: &[(&str, TypeGate)] = &[
    ("bigint", TypeGate::Always),
    ("binary", TypeGate::Always),
    ("bit", TypeGate::Always),
    ("char", TypeGate::Always),
    ("date", TypeGate::ExtendedDateTime),
    ("datetime", TypeGate::Always),
    ("datetime2", TypeGate::ExtendedDateTime),
    ("datetimeoffset", TypeGate::ExtendedDateTime),
    ("decimal", TypeGate::Always),
    ("float", TypeGate::Always),
    ("geography", TypeGate::Spatial),
    ("geometry", TypeGate::Spatial),
    ("image", TypeGate::Always),
    ("int", TypeGate::Always),
    ("money", TypeGate::Always),
    ("nchar", TypeGate::Always),
    ("ntext", TypeGate::Always),
    ("numeric", TypeGate::Always),
    ("nvarchar", TypeGate::Always),
    ("nvarchar(max)", TypeGate::MaxTypes),
    ("real", TypeGate::Always),
    ("rowversion", TypeGate::Always),
    ("smalldatetime", TypeGate::Always),
    ("smallint", TypeGate::Always),
    ("smallmoney", TypeGate::Always),
    ("text", TypeGate::Always),
    ("time", TypeGate::ExtendedDateTime),
    ("timestamp", TypeGate::Always),
    ("tinyint", TypeGate::Always),
    ("uniqueidentifier", TypeGate::Always),
    ("varbinary", TypeGate::Always),
    ("varbinary(max)", TypeGate::MaxTypes),
    ("varchar", TypeGate::Always),
    ("varchar(max)", TypeGate::MaxTypes),
    ("xml", TypeGate::MaxTypes),
];

/// One built-in function signature. Aggregate signatures list the collection
/// element type as their single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFunction {
    pub name: &'static str,
    pub parameter_types: &'static [&'static str],
    pub return_type: &'static str,
    pub aggregate: bool,
}

impl StoreFunction {
    const fn scalar(
        name: &'static str,
        parameter_types: &'static [&'static str],
        return_type: &'static str,
    ) -> Self {
        Self {
            name,
            parameter_types,
            return_type,
            aggregate: false,
        }
    }

    const fn aggregate(
        name: &'static str,
        element_type: &'static [&'static str],
        return_type: &'static str,
    ) -> Self {
        Self {
            name,
            parameter_types: element_type,
            return_type,
            aggregate: true,
        }
    }
}

const STORE_FUNCTIONS: &[StoreFunction] = &[
    StoreFunction::aggregate("AVG", &["Decimal"], "Decimal"),
    StoreFunction::aggregate("AVG", &["Double"], "Double"),
    StoreFunction::aggregate("AVG", &["Int32"], "Int32"),
    StoreFunction::aggregate("AVG", &["Int64"], "Int64"),
    StoreFunction::aggregate("COUNT", &["Int32"], "Int32"),
    StoreFunction::aggregate("COUNT", &["String"], "Int32"),
    StoreFunction::aggregate("COUNT", &["DateTime"], "Int32"),
    StoreFunction::aggregate("COUNT", &["Guid"], "Int32"),
    StoreFunction::aggregate("COUNT", &["DateTimeOffset"], "Int32"),
    StoreFunction::aggregate("COUNT", &["Time"], "Int32"),
    StoreFunction::aggregate("COUNT_BIG", &["Int32"], "Int64"),
    StoreFunction::aggregate("COUNT_BIG", &["Guid"], "Int64"),
    StoreFunction::aggregate("COUNT_BIG", &["DateTimeOffset"], "Int64"),
    StoreFunction::aggregate("COUNT_BIG", &["Time"], "Int64"),
    StoreFunction::aggregate("MAX", &["Byte"], "Byte"),
    StoreFunction::aggregate("MAX", &["Decimal"], "Decimal"),
    StoreFunction::aggregate("MAX", &["Double"], "Double"),
    StoreFunction::aggregate("MAX", &["Int16"], "Int16"),
    StoreFunction::aggregate("MAX", &["Int32"], "Int32"),
    StoreFunction::aggregate("MAX", &["Int64"], "Int64"),
    StoreFunction::aggregate("MAX", &["Single"], "Single"),
    StoreFunction::aggregate("MAX", &["String"], "String"),
    StoreFunction::aggregate("MAX", &["Binary"], "Binary"),
    StoreFunction::aggregate("MAX", &["DateTime"], "DateTime"),
    StoreFunction::aggregate("MAX", &["DateTimeOffset"], "DateTimeOffset"),
    StoreFunction::aggregate("MAX", &["Time"], "Time"),
    StoreFunction::aggregate("MIN", &["Byte"], "Byte"),
    StoreFunction::aggregate("MIN", &["Decimal"], "Decimal"),
    StoreFunction::aggregate("MIN", &["Double"], "Double"),
    StoreFunction::aggregate("MIN", &["Int16"], "Int16"),
    StoreFunction::aggregate("MIN", &["Int32"], "Int32"),
    StoreFunction::aggregate("MIN", &["Int64"], "Int64"),
    StoreFunction::aggregate("MIN", &["Single"], "Single"),
    StoreFunction::aggregate("MIN", &["String"], "String"),
    StoreFunction::aggregate("MIN", &["Binary"], "Binary"),
    StoreFunction::aggregate("MIN", &["DateTime"], "DateTime"),
    StoreFunction::aggregate("MIN", &["DateTimeOffset"], "DateTimeOffset"),
    StoreFunction::aggregate("MIN", &["Time"], "Time"),
    StoreFunction::aggregate("SUM", &["Decimal"], "Decimal"),
    StoreFunction::aggregate("SUM", &["Double"], "Double"),
    StoreFunction::aggregate("SUM", &["Int32"], "Int32"),
    StoreFunction::aggregate("SUM", &["Int64"], "Int64"),
    StoreFunction::scalar("ABS", &["Decimal"], "Decimal"),
    StoreFunction::scalar("ABS", &["Double"], "Double"),
    StoreFunction::scalar("ABS", &["Int16"], "Int16"),
    StoreFunction::scalar("ABS", &["Int32"], "Int32"),
    StoreFunction::scalar("ABS", &["Int64"], "Int64"),
    StoreFunction::scalar("CEILING", &["Decimal"], "Decimal"),
    StoreFunction::scalar("CEILING", &["Double"], "Double"),
    StoreFunction::scalar("FLOOR", &["Decimal"], "Decimal"),
    StoreFunction::scalar("FLOOR", &["Double"], "Double"),
    StoreFunction::scalar("ROUND", &["Decimal", "Int32"], "Decimal"),
    StoreFunction::scalar("ROUND", &["Double", "Int32"], "Double"),
    StoreFunction::scalar("POWER", &["Double", "Double"], "Double"),
    StoreFunction::scalar("SQRT", &["Double"], "Double"),
    StoreFunction::scalar("SIGN", &["Decimal"], "Decimal"),
    StoreFunction::scalar("SIGN", &["Double"], "Double"),
    StoreFunction::scalar("SIGN", &["Int32"], "Int32"),
    StoreFunction::scalar("RAND", &[], "Double"),
    StoreFunction::scalar("RAND", &["Int32"], "Double"),
    StoreFunction::scalar("CHARINDEX", &["String", "String"], "Int32"),
    StoreFunction::scalar("CHARINDEX", &["String", "String", "Int32"], "Int32"),
    StoreFunction::scalar("CHARINDEX", &["String", "String", "Int64"], "Int64"),
    StoreFunction::scalar("DATALENGTH", &["String"], "Int32"),
    StoreFunction::scalar("DATALENGTH", &["Binary"], "Int32"),
    StoreFunction::scalar("DATALENGTH", &["DateTimeOffset"], "Int32"),
    StoreFunction::scalar("DATALENGTH", &["Time"], "Int32"),
    StoreFunction::scalar("CHECKSUM", &["String"], "Int32"),
    StoreFunction::scalar("CHECKSUM", &["DateTimeOffset"], "Int32"),
    StoreFunction::scalar("CHECKSUM", &["Time"], "Int32"),
    StoreFunction::scalar("DAY", &["DateTime"], "Int32"),
    StoreFunction::scalar("DAY", &["DateTimeOffset"], "Int32"),
    StoreFunction::scalar("MONTH", &["DateTime"], "Int32"),
    StoreFunction::scalar("MONTH", &["DateTimeOffset"], "Int32"),
    StoreFunction::scalar("YEAR", &["DateTime"], "Int32"),
    StoreFunction::scalar("YEAR", &["DateTimeOffset"], "Int32"),
    StoreFunction::scalar("DATEADD", &["String", "Double", "DateTime"], "DateTime"),
    StoreFunction::scalar(
        "DATEADD",
        &["String", "Double", "DateTimeOffset"],
        "DateTimeOffset",
    ),
    StoreFunction::scalar("DATEADD", &["String", "Double", "Time"], "Time"),
    StoreFunction::scalar("DATEDIFF", &["String", "DateTime", "DateTime"], "Int32"),
    StoreFunction::scalar(
        "DATEDIFF",
        &["String", "DateTimeOffset", "DateTimeOffset"],
        "Int32",
    ),
    StoreFunction::scalar("DATEDIFF", &["String", "Time", "Time"], "Int32"),
    StoreFunction::scalar("DATENAME", &["String", "DateTime"], "String"),
    StoreFunction::scalar("DATENAME", &["String", "DateTimeOffset"], "String"),
    StoreFunction::scalar("DATENAME", &["String", "Time"], "String"),
    StoreFunction::scalar("DATEPART", &["String", "DateTime"], "Int32"),
    StoreFunction::scalar("DATEPART", &["String", "DateTimeOffset"], "Int32"),
    StoreFunction::scalar("DATEPART", &["String", "Time"], "Int32"),
    StoreFunction::scalar("GETDATE", &[], "DateTime"),
    StoreFunction::scalar("GETUTCDATE", &[], "DateTime"),
    StoreFunction::scalar("SYSDATETIME", &[], "DateTime"),
    StoreFunction::scalar("SYSUTCDATETIME", &[], "DateTime"),
    StoreFunction::scalar("SYSDATETIMEOFFSET", &[], "DateTimeOffset"),
    StoreFunction::scalar("NEWID", &[], "Guid"),
    StoreFunction::scalar("LEN", &["String"], "Int32"),
    StoreFunction::scalar("LOWER", &["String"], "String"),
    StoreFunction::scalar("UPPER", &["String"], "String"),
    StoreFunction::scalar("LTRIM", &["String"], "String"),
    StoreFunction::scalar("RTRIM", &["String"], "String"),
    StoreFunction::scalar("REVERSE", &["String"], "String"),
    StoreFunction::scalar("REPLACE", &["String", "String", "String"], "String"),
    StoreFunction::scalar("REPLICATE", &["String", "Int32"], "String"),
    StoreFunction::scalar("SUBSTRING", &["String", "Int32", "Int32"], "String"),
    StoreFunction::scalar("STUFF", &["String", "Int32", "Int32", "String"], "String"),
    StoreFunction::scalar("UNICODE", &["String"], "Int32"),
    StoreFunction::scalar("SOUNDEX", &["String"], "String"),
    StoreFunction::scalar("STR", &["Double"], "String"),
    StoreFunction::scalar("STR", &["Double", "Int32"], "String"),
    StoreFunction::scalar("POINTGEOGRAPHY", &["Double", "Double", "Int32"], "Geography"),
    StoreFunction::scalar("POINTGEOMETRY", &["Double", "Double", "Int32"], "Geometry"),
];

fn requires_sql10(function: &StoreFunction) -> bool {
    if is_spatial(function.return_type) || function.parameter_types.iter().copied().any(is_spatial)
    {
        return true;
    }

    if name_is(function, &["COUNT", "COUNT_BIG", "MAX", "MIN"]) {
        return function.aggregate && is_extended_date_time(parameter(function, 0));
    }
    if name_is(function, &["DAY", "MONTH", "YEAR", "DATALENGTH", "CHECKSUM"]) {
        return is_extended_date_time(parameter(function, 0));
    }
    if name_is(function, &["DATEADD", "DATEDIFF"]) {
        return is_extended_date_time(parameter(function, 1))
            || is_extended_date_time(parameter(function, 2));
    }
    if name_is(function, &["DATENAME", "DATEPART"]) {
        return is_extended_date_time(parameter(function, 1));
    }

    name_is(function, &["SYSUTCDATETIME", "SYSDATETIME", "SYSDATETIMEOFFSET"])
}

fn requires_sql9(function: &StoreFunction) -> bool {
    if function.parameter_types.is_empty() {
        return false;
    }

    if name_is(function, &["COUNT", "COUNT_BIG"]) {
        return function.aggregate && parameter(function, 0).eq_ignore_ascii_case("Guid");
    }
    if name_is(function, &["CHARINDEX"]) {
        return function
            .parameter_types
            .iter()
            .any(|type_name| type_name.eq_ignore_ascii_case("Int64"));
    }

    false
}

fn name_is(function: &StoreFunction, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|candidate| function.name.eq_ignore_ascii_case(candidate))
}

fn parameter(function: &StoreFunction, index: usize) -> &'static str {
    function.parameter_types.get(index).copied().unwrap_or("")
}

fn is_spatial(type_name: &str) -> bool {
    type_name.eq_ignore_ascii_case("Geography") || type_name.eq_ignore_ascii_case("Geometry")
}

fn is_extended_date_time(type_name: &str) -> bool {
    type_name.eq_ignore_ascii_case("DateTimeOffset") || type_name.eq_ignore_ascii_case("Time")
}
