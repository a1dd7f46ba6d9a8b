use super::{AbstractType, LiteralValue, MaxLength, QualifiedName, StoreGenerated};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: QualifiedName,
    pub columns: Vec<Column>,
    pub primary_key: Option<PrimaryKey>,
    pub has_defining_query: bool,
    pub is_system: bool,
}

impl Table {
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: QualifiedName::parse(name.as_ref()),
            columns: Vec::new(),
            primary_key: None,
            has_defining_query: false,
            is_system: false,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(PrimaryKey {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            clustered: true,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub clustered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: AbstractType,
    pub store_type: Option<String>,
    pub nullable: Option<bool>,
    pub store_generated: StoreGenerated,
    pub default: Option<LiteralValue>,
    pub default_sql: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: AbstractType) -> Self {
        Self {
            name: name.into(),
            ty,
            store_type: None,
            nullable: None,
            store_generated: StoreGenerated::None,
            default: None,
            default_sql: None,
        }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::Boolean)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::Int32)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::string())
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::binary())
    }

    pub fn decimal(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::decimal())
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::DateTime)
    }

    pub fn guid(name: impl Into<String>) -> Self {
        Self::new(name, AbstractType::Guid)
    }

    /// An engine-maintained row version: fixed 8-byte binary, computed.
    pub fn rowversion(name: impl Into<String>) -> Self {
        let mut column = Self::new(
            name,
            AbstractType::Binary {
                max_length: Some(MaxLength::Bounded(8)),
                fixed_length: true,
            },
        );
        column.store_generated = StoreGenerated::Computed;
        column
    }

    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    #[must_use]
    pub fn identity(mut self) -> Self {
        self.store_generated = StoreGenerated::Identity;
        self
    }

    #[must_use]
    pub fn with_store_type(mut self, store_type: impl Into<String>) -> Self {
        self.store_type = Some(store_type.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: LiteralValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn with_default_sql(mut self, sql: impl Into<String>) -> Self {
        self.default_sql = Some(sql.into());
        self
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.store_generated == StoreGenerated::Identity
    }

    /// True for the fixed 8-byte computed binary shape that maps to the
    /// engine's version type instead of plain binary.
    #[must_use]
    pub fn is_rowversion(&self) -> bool {
        self.store_generated == StoreGenerated::Computed
            && matches!(
                self.ty,
                AbstractType::Binary {
                    max_length: Some(MaxLength::Bounded(8)),
                    fixed_length: true,
                }
            )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub name: Option<String>,
    pub dependent_table: QualifiedName,
    pub dependent_columns: Vec<String>,
    pub principal_table: QualifiedName,
    pub principal_columns: Vec<String>,
    pub cascade_delete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: QualifiedName,
    pub parameters: Vec<ProcedureParameter>,
    pub body: String,
}

impl Procedure {
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: QualifiedName::parse(name.as_ref()),
            parameters: Vec::new(),
            body: String::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ProcedureParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureParameter {
    pub name: String,
    pub ty: AbstractType,
    pub store_type: Option<String>,
    pub output: bool,
    pub default: Option<LiteralValue>,
    pub default_sql: Option<String>,
}

impl ProcedureParameter {
    pub fn new(name: impl Into<String>, ty: AbstractType) -> Self {
        Self {
            name: name.into(),
            ty,
            store_type: None,
            output: false,
            default: None,
            default_sql: None,
        }
    }

    #[must_use]
    pub fn output(mut self) -> Self {
        self.output = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: LiteralValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn with_default_sql(mut self, sql: impl Into<String>) -> Self {
        self.default_sql = Some(sql.into());
        self
    }
}
