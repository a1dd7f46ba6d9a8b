use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    #[error(
        "unsupported dialect token {token:?}; expected one of \"2000\", \"2005\", \"2008\", \"2012\", \"2012.Azure\""
    )]
    UnsupportedToken { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("type {name:?} is not supported by the {dialect} dialect")]
    Unsupported { name: String, dialect: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("table {table} has no columns")]
    EmptyTable { table: String },

    #[error("primary key column {column:?} does not exist on table {table}")]
    UnknownKeyColumn { table: String, column: String },

    #[error(
        "foreign key {name:?} declares {dependent} dependent column(s) but {principal} principal column(s)"
    )]
    ForeignKeyColumnMismatch {
        name: String,
        dependent: usize,
        principal: usize,
    },

    #[error("system table move for {table} is missing {missing}")]
    IncompleteSystemTableMove { table: String, missing: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{generator} is unable to generate SQL for operations of kind {operation:?}")]
    UnknownOperation { operation: String, generator: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

pub type Result<T> = std::result::Result<T, Error>;
