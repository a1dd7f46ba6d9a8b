//! Identifier quoting, literal escaping, and the lowercase script builders
//! for schema objects and database management.

use std::collections::HashSet;
use std::fmt::Write as _;

use tsqlgen_core::{Column, ForeignKey, QualifiedName, Result, Table};

use crate::capabilities::DialectCapabilities;
use crate::typemap::{
    self, ConcreteType, DEFAULT_MAX_LENGTH, DEFAULT_NUMERIC_PRECISION, DEFAULT_NUMERIC_SCALE,
    DEFAULT_TIME_PRECISION,
};
use crate::version::SqlVersion;

/// Longest identifier the engine accepts.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Brackets an identifier, doubling any closing bracket it contains.
#[must_use]
pub fn quote_identifier(identifier: &str) -> String {
    format!("[{}]", identifier.replace(']', "]]"))
}

/// Renders a Unicode string literal, doubling embedded quotes.
#[must_use]
pub fn escape_string_literal(text: &str) -> String {
    format!("N'{}'", text.replace('\'', "''"))
}

/// Doubles embedded quotes without adding delimiters, for text spliced into
/// an already-quoted dynamic SQL string.
#[must_use]
pub fn escape_literal(text: &str) -> String {
    text.replace('\'', "''")
}

/// Escapes LIKE wildcards (`%`, `_`, `[`, `^`) with `~`, reporting whether
/// any escape was inserted. The escape character itself is only escaped when
/// the pattern already needs escaping, or unconditionally when
/// `always_escape_escape_char` is set.
#[must_use]
pub fn like_pattern_escape(text: &str, always_escape_escape_char: bool) -> (String, bool) {
    let has_wildcard = text.chars().any(|c| matches!(c, '%' | '_' | '[' | '^'));
    if !has_wildcard
        && !(always_escape_escape_char && text.contains(crate::capabilities::LIKE_ESCAPE_CHAR))
    {
        return (text.to_owned(), false);
    }

    let mut escaped = String::with_capacity(text.len());
    let mut used_escape_char = false;
    for c in text.chars() {
        if matches!(c, '%' | '_' | '[' | '^') || c == crate::capabilities::LIKE_ESCAPE_CHAR {
            escaped.push(crate::capabilities::LIKE_ESCAPE_CHAR);
            used_escape_char = true;
        }
        escaped.push(c);
    }

    (escaped, used_escape_char)
}

/// Renders a store type with its facets, e.g. `[nvarchar](100)` or
/// `[decimal](18, 2)`. The unbounded form renders as `[name](max)` and never
/// takes a length facet.
#[must_use]
pub fn render_store_type(concrete: &ConcreteType) -> String {
    let mut rendered = if concrete.unbounded {
        format!("{}(max)", quote_identifier(&concrete.name))
    } else {
        quote_identifier(&concrete.name)
    };

    match concrete.name.to_ascii_lowercase().as_str() {
        "decimal" | "numeric" => {
            write!(
                rendered,
                "({}, {})",
                concrete.precision.unwrap_or(DEFAULT_NUMERIC_PRECISION),
                concrete.scale.unwrap_or(DEFAULT_NUMERIC_SCALE)
            )
            .expect("writing to String should not fail");
        }
        "datetime2" | "datetimeoffset" | "time" => {
            write!(
                rendered,
                "({})",
                concrete.precision.unwrap_or(DEFAULT_TIME_PRECISION)
            )
            .expect("writing to String should not fail");
        }
        "binary" | "varbinary" | "nvarchar" | "varchar" | "char" | "nchar"
            if !concrete.unbounded =>
        {
            write!(
                rendered,
                "({})",
                concrete.max_length.unwrap_or(DEFAULT_MAX_LENGTH)
            )
            .expect("writing to String should not fail");
        }
        _ => {}
    }

    rendered
}

#[must_use]
pub fn default_primary_key_name(table: &QualifiedName) -> String {
    restrict_to_max_length(format!("PK_{}", dotted_name(table)))
}

#[must_use]
pub fn default_index_name(columns: &[String]) -> String {
    restrict_to_max_length(format!("IX_{}", columns.join("_")))
}

#[must_use]
pub fn default_foreign_key_name(foreign_key: &ForeignKey) -> String {
    restrict_to_max_length(format!(
        "FK_{}_{}_{}",
        dotted_name(&foreign_key.dependent_table),
        dotted_name(&foreign_key.principal_table),
        foreign_key.dependent_columns.join("_")
    ))
}

/// The undecorated `schema.name` form used in derived names and in dynamic
/// SQL that resolves objects through `object_id`.
#[must_use]
pub(crate) fn dotted_name(name: &QualifiedName) -> String {
    match &name.schema {
        Some(schema) => format!("{schema}.{}", name.name),
        None => name.name.clone(),
    }
}

pub(crate) fn restrict_to_max_length(mut name: String) -> String {
    if let Some((index, _)) = name.char_indices().nth(MAX_IDENTIFIER_LENGTH) {
        name.truncate(index);
    }
    name
}

/// Accumulates the schema-objects script: schema guards, tables, then
/// foreign keys, all in lowercase keywords.
///
/// Tables backed by a defining query are skipped with a comment and recorded
/// so that foreign keys touching them are skipped as well.
#[derive(Debug)]
pub struct SchemaScriptBuilder<'a> {
    capabilities: &'a DialectCapabilities,
    sql: String,
    ignored_tables: HashSet<QualifiedName>,
}

impl<'a> SchemaScriptBuilder<'a> {
    #[must_use]
    pub fn new(capabilities: &'a DialectCapabilities) -> Self {
        Self {
            capabilities,
            sql: String::new(),
            ignored_tables: HashSet::new(),
        }
    }

    /// Appends a guarded schema creation, spliced through dynamic SQL so the
    /// guard and the creation travel in one batch.
    pub fn append_create_schema(&mut self, schema: &str) {
        let create = format!("create schema {}", quote_identifier(schema));
        writeln!(
            self.sql,
            "if (schema_id({}) is null) exec({});",
            escape_string_literal(schema),
            escape_string_literal(&create)
        )
        .expect("writing to String should not fail");
    }

    pub fn append_create_table(&mut self, table: &Table) -> Result<()> {
        if table.has_defining_query {
            self.sql.push_str("-- Ignoring entity set with defining query: ");
            self.sql
                .push_str(&newline_safe_identifier(table.name.schema_or_dbo()));
            self.sql.push('.');
            self.sql.push_str(&newline_safe_identifier(&table.name.name));
            self.ignored_tables.insert(table.name.clone());
        } else {
            writeln!(
                self.sql,
                "create table {} (",
                table_identifier(&table.name)
            )
            .expect("writing to String should not fail");

            for (index, column) in table.columns.iter().enumerate() {
                self.sql.push_str("    ");
                self.sql.push_str(&quote_identifier(&column.name));
                self.sql.push(' ');
                self.sql.push_str(&self.column_definition(column)?);
                if table.primary_key.is_some() || index + 1 < table.columns.len() {
                    self.sql.push(',');
                }
                self.sql.push('\n');
            }

            if let Some(primary_key) = &table.primary_key {
                let columns: Vec<String> = primary_key
                    .columns
                    .iter()
                    .map(|column| quote_identifier(column))
                    .collect();
                writeln!(self.sql, "    primary key ({})", columns.join(", "))
                    .expect("writing to String should not fail");
            }

            self.sql.push_str(");");
        }
        self.sql.push('\n');

        Ok(())
    }

    /// Appends a foreign key, or a comment when either end was skipped for a
    /// defining query.
    pub fn append_create_foreign_key(&mut self, foreign_key: &ForeignKey) {
        let name = foreign_key
            .name
            .clone()
            .unwrap_or_else(|| default_foreign_key_name(foreign_key));

        if self.ignored_tables.contains(&foreign_key.dependent_table)
            || self.ignored_tables.contains(&foreign_key.principal_table)
        {
            self.sql.push_str(
                "-- Ignoring association set with participating entity set with defining query: ",
            );
            self.sql.push_str(&newline_safe_identifier(&name));
        } else {
            let dependent_columns: Vec<String> = foreign_key
                .dependent_columns
                .iter()
                .map(|column| quote_identifier(column))
                .collect();
            let principal_columns: Vec<String> = foreign_key
                .principal_columns
                .iter()
                .map(|column| quote_identifier(column))
                .collect();

            write!(
                self.sql,
                "alter table {} add constraint {} foreign key ({}) references {}({})",
                table_identifier(&foreign_key.dependent_table),
                quote_identifier(&name),
                dependent_columns.join(", "),
                table_identifier(&foreign_key.principal_table),
                principal_columns.join(", ")
            )
            .expect("writing to String should not fail");

            if foreign_key.cascade_delete {
                self.sql.push_str(" on delete cascade");
            }
            self.sql.push(';');
        }
        self.sql.push('\n');
    }

    #[must_use]
    pub fn into_sql(self) -> String {
        self.sql
    }

    fn column_definition(&self, column: &Column) -> Result<String> {
        let mut guid = false;
        let mut rendered = if column.is_rowversion() {
            quote_identifier("rowversion")
        } else {
            let concrete = typemap::resolve_store_type(
                &column.ty,
                column.store_type.as_deref(),
                self.capabilities,
            )?;
            guid = concrete.name.eq_ignore_ascii_case("uniqueidentifier");
            render_store_type(&concrete)
        };

        if column.nullable == Some(false) {
            rendered.push_str(" not null");
        } else {
            rendered.push_str(" null");
        }

        if column.is_identity() {
            if guid {
                rendered.push_str(" default newid()");
            } else {
                rendered.push_str(" identity");
            }
        }

        Ok(rendered)
    }
}

/// Renders the full schema-objects script: non-`dbo` schema guards in name
/// order, tables in name order, then foreign keys in name order.
pub fn create_objects_script(
    tables: &[Table],
    foreign_keys: &[ForeignKey],
    capabilities: &DialectCapabilities,
) -> Result<String> {
    let mut builder = SchemaScriptBuilder::new(capabilities);

    if capabilities.supports_schemas {
        let mut schemas: Vec<&str> = tables
            .iter()
            .map(|table| table.name.schema_or_dbo())
            .filter(|schema| *schema != "dbo")
            .collect();
        schemas.sort_unstable();
        schemas.dedup();
        for schema in schemas {
            builder.append_create_schema(schema);
        }
    }

    let mut ordered_tables: Vec<&Table> = tables.iter().collect();
    ordered_tables.sort_by(|a, b| a.name.name.cmp(&b.name.name));
    for table in ordered_tables {
        builder.append_create_table(table)?;
    }

    let mut ordered_keys: Vec<(String, &ForeignKey)> = foreign_keys
        .iter()
        .map(|foreign_key| {
            let name = foreign_key
                .name
                .clone()
                .unwrap_or_else(|| default_foreign_key_name(foreign_key));
            (name, foreign_key)
        })
        .collect();
    ordered_keys.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, foreign_key) in ordered_keys {
        builder.append_create_foreign_key(foreign_key);
    }

    Ok(builder.into_sql())
}

/// Renders `create database`, attaching primary data and derived log file
/// specs when a data file name is given.
#[must_use]
pub fn create_database_script(database: &str, data_file_name: Option<&str>) -> String {
    let mut sql = format!("create database {}", quote_identifier(database));

    if let Some(data_file_name) = data_file_name {
        let log_file_name = log_file_name_for(data_file_name);
        write!(
            sql,
            " on primary {} log on {}",
            file_spec(data_file_name),
            file_spec(&log_file_name)
        )
        .expect("writing to String should not fail");
    }

    sql
}

/// Enables `read_committed_snapshot`, guarded so the hosted engine edition
/// skips it. Engines below 2005 get an empty script.
#[must_use]
pub fn set_database_options_script(database: &str, capabilities: &DialectCapabilities) -> String {
    if capabilities.version < SqlVersion::Sql9 {
        return String::new();
    }

    let options = format!(
        "alter database {} set read_committed_snapshot on",
        quote_identifier(database)
    );
    format!(
        "if serverproperty('EngineEdition') <> 5 execute sp_executesql {}",
        escape_string_literal(&options)
    )
}

#[must_use]
pub fn database_exists_script(database: &str, capabilities: &DialectCapabilities) -> String {
    format!(
        "SELECT Count(*) FROM {} WHERE [name]={}",
        sys_databases(capabilities),
        escape_string_literal(database)
    )
}

/// Names of databases whose files include the given physical file.
#[must_use]
pub fn database_names_by_file_script(
    database_file_name: &str,
    capabilities: &DialectCapabilities,
) -> String {
    let deprecated = use_deprecated_system_tables(capabilities);

    let mut sql = format!("SELECT [d].[name] FROM {} AS [d] ", sys_databases(capabilities));
    if !deprecated {
        sql.push_str("INNER JOIN sys.master_files AS [f] ON [f].[database_id] = [d].[database_id]");
    }
    sql.push_str(" WHERE [");
    sql.push_str(if deprecated {
        "filename"
    } else {
        "f].[physical_name"
    });
    sql.push_str("]=");
    sql.push_str(&escape_string_literal(database_file_name));

    sql
}

#[must_use]
pub fn count_databases_by_file_script(
    database_file_name: &str,
    capabilities: &DialectCapabilities,
) -> String {
    let deprecated = use_deprecated_system_tables(capabilities);

    format!(
        "SELECT Count(*) FROM {} WHERE [{}]={}",
        if deprecated {
            "sysdatabases"
        } else {
            "sys.master_files"
        },
        if deprecated { "filename" } else { "physical_name" },
        escape_string_literal(database_file_name)
    )
}

#[must_use]
pub fn drop_database_script(database: &str) -> String {
    format!("drop database {}", quote_identifier(database))
}

fn table_identifier(name: &QualifiedName) -> String {
    format!(
        "{}.{}",
        quote_identifier(name.schema_or_dbo()),
        quote_identifier(&name.name)
    )
}

/// Quotes an identifier for use inside a line comment, continuing the
/// comment across any line break the identifier smuggles in.
fn newline_safe_identifier(identifier: &str) -> String {
    quote_identifier(&identifier.replace('\r', "\r--").replace('\n', "\n--"))
}

fn file_spec(path: &str) -> String {
    format!(
        "(name={}, filename={})",
        escape_string_literal(file_name_of(path)),
        escape_string_literal(path)
    )
}

fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn log_file_name_for(data_file_name: &str) -> String {
    let file_name = file_name_of(data_file_name);
    let directory = &data_file_name[..data_file_name.len() - file_name.len()];
    let stem = file_name
        .rfind('.')
        .map_or(file_name, |dot| &file_name[..dot]);
    format!("{directory}{stem}_log.ldf")
}

fn sys_databases(capabilities: &DialectCapabilities) -> &'static str {
    if use_deprecated_system_tables(capabilities) {
        "sysdatabases"
    } else {
        "sys.databases"
    }
}

fn use_deprecated_system_tables(capabilities: &DialectCapabilities) -> bool {
    capabilities.version == SqlVersion::Sql8
}
