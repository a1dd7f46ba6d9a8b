mod capabilities;
mod ddl;
mod generator;
mod typemap;
mod version;
mod writer;

pub use capabilities::{DialectCapabilities, StoreFunction, LIKE_ESCAPE_CHAR};
pub use ddl::{
    count_databases_by_file_script, create_database_script, create_objects_script,
    database_exists_script, database_names_by_file_script, default_foreign_key_name,
    default_index_name, default_primary_key_name, drop_database_script, escape_literal,
    escape_string_literal, like_pattern_escape, quote_identifier, render_store_type,
    set_database_options_script, SchemaScriptBuilder, MAX_IDENTIFIER_LENGTH,
};
pub use typemap::{
    from_store_name, resolve_store_type, to_abstract, to_concrete, ConcreteType,
    BINARY_MAX_LENGTH, DEFAULT_MAX_LENGTH, DEFAULT_NUMERIC_PRECISION, DEFAULT_NUMERIC_SCALE,
    DEFAULT_TIME_PRECISION, NVARCHAR_MAX_LENGTH, VARCHAR_MAX_LENGTH,
};
pub use version::{SqlVersion, AZURE_TOKEN};

use tsqlgen_core::{MigrationOperation, MigrationSqlGenerator, Result, Statement};

/// The SQL Server dialect: resolves a version token and turns migration
/// operations into T-SQL statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerGenerator;

impl SqlServerGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MigrationSqlGenerator for SqlServerGenerator {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn generate(&self, operations: &[MigrationOperation], token: &str) -> Result<Vec<Statement>> {
        generator::generate(operations, token)
    }
}
