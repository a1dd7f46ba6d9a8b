//! Migration-operation dispatch: turns an ordered operation sequence into
//! ordered SQL statements, uppercase keyword path.

use std::collections::HashSet;
use std::fmt::Write as _;

use tsqlgen_core::{
    AbstractType, Column, ForeignKey, GenerateError, LiteralValue, MigrationOperation, Procedure,
    ProcedureParameter, QualifiedName, Result, SchemaError, Statement, SystemTableRebuild, Table,
};

use crate::capabilities::DialectCapabilities;
use crate::ddl::{
    self, default_foreign_key_name, default_index_name, default_primary_key_name, dotted_name,
    escape_literal, quote_identifier,
};
use crate::typemap;
use crate::writer::SqlWriter;

pub(crate) const GENERATOR_NAME: &str = "mssql migration generator";
pub(crate) const BATCH_TERMINATOR: &str = "GO";

const HISTORY_TABLE: &str = "dbo.__MigrationHistory";
const HISTORY_TABLE_NAME: &str = "__MigrationHistory";
const CONTEXT_KEY_COLUMN: &str = "ContextKey";

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const DATE_TIME_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

pub(crate) fn generate(operations: &[MigrationOperation], token: &str) -> Result<Vec<Statement>> {
    let capabilities = DialectCapabilities::resolve(token)?;

    let mut generator = Generator {
        capabilities,
        statements: Vec::new(),
        generated_schemas: HashSet::new(),
        variable_counter: 0,
    };
    generator.generate_all(operations)?;

    Ok(generator.statements)
}

/// Per-call dispatch state: schemas already guarded and the counter backing
/// scratch variable names.
struct Generator {
    capabilities: DialectCapabilities,
    statements: Vec<Statement>,
    generated_schemas: HashSet<String>,
    variable_counter: usize,
}

impl Generator {
    fn generate_all(&mut self, operations: &[MigrationOperation]) -> Result<()> {
        let mut index = 0;
        while index < operations.len() {
            if let Some(rebuild) = detect_history_rebuild(&operations[index..]) {
                self.emit_history_rebuild(&rebuild)?;
                index += 3;
            } else {
                self.emit_operation(&operations[index])?;
                index += 1;
            }
        }
        Ok(())
    }

    fn emit_operation(&mut self, operation: &MigrationOperation) -> Result<()> {
        match operation {
            MigrationOperation::CreateTable { table } => self.emit_create_table(table)?,
            MigrationOperation::DropTable { name } => {
                self.push(format!("DROP TABLE {}", name_of(name)));
            }
            MigrationOperation::RenameTable { name, new_name } => {
                self.push(rename_object_sql(name, new_name));
            }
            MigrationOperation::MoveTable {
                name,
                new_schema,
                rebuild,
            } => self.emit_move_table(name, new_schema.as_deref(), rebuild.as_ref())?,
            MigrationOperation::AddColumn { table, column } => {
                self.emit_add_column(table, column)?;
            }
            MigrationOperation::DropColumn { table, name } => self.emit_drop_column(table, name),
            MigrationOperation::AlterColumn { table, column } => {
                self.emit_alter_column(table, column)?;
            }
            MigrationOperation::RenameColumn {
                table,
                name,
                new_name,
            } => {
                self.push(format!(
                    "EXECUTE sp_rename @objname = N'{}.{}', @newname = N'{}', @objtype = N'COLUMN'",
                    escape_literal(&dotted_name(table)),
                    escape_literal(name),
                    escape_literal(new_name)
                ));
            }
            MigrationOperation::AddPrimaryKey {
                table,
                name,
                columns,
                clustered,
            } => self.emit_add_primary_key(table, name.as_deref(), columns, *clustered),
            MigrationOperation::DropPrimaryKey { table, name, .. } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| default_primary_key_name(table));
                self.push(format!(
                    "ALTER TABLE {} DROP CONSTRAINT {}",
                    name_of(table),
                    quote_identifier(&name)
                ));
            }
            MigrationOperation::AddForeignKey { foreign_key } => {
                self.emit_add_foreign_key(foreign_key)?;
            }
            MigrationOperation::DropForeignKey { foreign_key } => {
                let name = foreign_key
                    .name
                    .clone()
                    .unwrap_or_else(|| default_foreign_key_name(foreign_key));
                self.push(format!(
                    "ALTER TABLE {} DROP CONSTRAINT {}",
                    name_of(&foreign_key.dependent_table),
                    quote_identifier(&name)
                ));
            }
            MigrationOperation::CreateIndex {
                table,
                name,
                columns,
                unique,
                clustered,
            } => self.emit_create_index(table, name.as_deref(), columns, *unique, *clustered),
            MigrationOperation::DropIndex {
                table,
                name,
                columns,
            } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| default_index_name(columns));
                self.push(format!(
                    "DROP INDEX {} ON {}",
                    quote_identifier(&name),
                    name_of(table)
                ));
            }
            MigrationOperation::CreateProcedure { procedure } => {
                self.emit_procedure(procedure, "CREATE")?;
            }
            MigrationOperation::AlterProcedure { procedure } => {
                self.emit_procedure(procedure, "ALTER")?;
            }
            MigrationOperation::DropProcedure { name } => {
                self.push(format!("DROP PROCEDURE {}", name_of(name)));
            }
            MigrationOperation::RenameProcedure { name, new_name } => {
                self.push(rename_object_sql(name, new_name));
            }
            MigrationOperation::MoveProcedure { name, new_schema } => {
                let new_schema = new_schema.as_deref().unwrap_or("dbo");
                self.ensure_schema(new_schema);
                self.emit_schema_transfer(new_schema, name);
            }
            MigrationOperation::Sql {
                sql,
                suppress_transaction,
            } => {
                let mut statement = Statement::new(sql);
                if *suppress_transaction {
                    statement = statement.suppressing_transaction();
                }
                self.statements.push(statement);
            }
            MigrationOperation::Custom { name } => {
                return Err(GenerateError::UnknownOperation {
                    operation: name.clone(),
                    generator: GENERATOR_NAME.to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }

    fn emit_create_table(&mut self, table: &Table) -> Result<()> {
        validate_table(table)?;

        if let Some(schema) = non_blank(table.name.schema.as_deref()) {
            self.ensure_schema(schema);
        }

        let mut writer = SqlWriter::new();
        self.write_create_table(table, &mut writer)?;

        if table.is_system {
            writer.write_line("");
            write_make_system_table(&table.name, &mut writer);
        }

        self.push(writer.into_sql());
        Ok(())
    }

    fn emit_move_table(
        &mut self,
        name: &QualifiedName,
        new_schema: Option<&str>,
        rebuild: Option<&SystemTableRebuild>,
    ) -> Result<()> {
        let new_schema = new_schema.unwrap_or("dbo");
        self.ensure_schema(new_schema);

        let Some(rebuild) = rebuild else {
            self.emit_schema_transfer(new_schema, name);
            return Ok(());
        };

        if rebuild.context_key.trim().is_empty() {
            return Err(SchemaError::IncompleteSystemTableMove {
                table: dotted_name(name),
                missing: "a context key".to_owned(),
            }
            .into());
        }
        validate_table(&rebuild.table)?;

        let mut writer = SqlWriter::new();
        writer.write("IF object_id('");
        writer.write(&dotted_name(&rebuild.table.name));
        writer.write_line("') IS NULL BEGIN");
        writer.indent();
        self.write_create_table(&rebuild.table, &mut writer)?;
        writer.write_line("");
        writer.unindent();
        writer.write_line("END");

        let context_key = format!("'{}'", rebuild.context_key);
        writer.write("INSERT INTO ");
        writer.write_line(&name_of(&rebuild.table.name));
        writer.write("SELECT * FROM ");
        writer.write_line(&name_of(name));
        writer.write(&format!("WHERE [{CONTEXT_KEY_COLUMN}] = "));
        writer.write_line(&context_key);
        writer.write("DELETE ");
        writer.write_line(&name_of(name));
        writer.write(&format!("WHERE [{CONTEXT_KEY_COLUMN}] = "));
        writer.write_line(&context_key);
        writer.write("IF NOT EXISTS(SELECT * FROM ");
        writer.write(&name_of(name));
        writer.write_line(")");
        writer.indent();
        writer.write("DROP TABLE ");
        writer.write(&name_of(name));
        writer.unindent();

        self.push(writer.into_sql());
        Ok(())
    }

    fn emit_add_column(&mut self, table: &QualifiedName, column: &Column) -> Result<()> {
        let mut sql = format!(
            "ALTER TABLE {} ADD {}",
            name_of(table),
            self.column_definition(column)?
        );

        if needs_synthesized_default(column) {
            write!(sql, " DEFAULT {}", zero_value_literal(&column.ty))
                .expect("writing to String should not fail");
        }

        self.push(sql);
        Ok(())
    }

    /// Drops any default constraint over the column before the column itself;
    /// the constraint's name is engine-generated, so it has to be discovered
    /// at run time.
    fn emit_drop_column(&mut self, table: &QualifiedName, name: &str) {
        let drop_default = self.drop_default_constraint_sql(table, name);
        self.push(drop_default);

        self.push(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            name_of(table),
            quote_identifier(name)
        ));
    }

    fn emit_alter_column(&mut self, table: &QualifiedName, column: &Column) -> Result<()> {
        if column.default.is_some() || non_blank(column.default_sql.as_deref()).is_some() {
            let drop_default = self.drop_default_constraint_sql(table, &column.name);
            self.push(drop_default);

            let mut sql = format!(
                "ALTER TABLE {} ADD CONSTRAINT DF_{}_{} DEFAULT ",
                name_of(table),
                dotted_name(table),
                column.name
            );
            if let Some(value) = &column.default {
                sql.push_str(&render_literal(value));
            } else if let Some(default_sql) = non_blank(column.default_sql.as_deref()) {
                sql.push_str(default_sql);
            }
            write!(sql, " FOR {}", quote_identifier(&column.name))
                .expect("writing to String should not fail");
            self.push(sql);
        }

        let mut sql = format!(
            "ALTER TABLE {} ALTER COLUMN {} {}",
            name_of(table),
            quote_identifier(&column.name),
            self.column_type(column)?
        );
        if column.nullable == Some(false) {
            sql.push_str(" NOT NULL");
        }
        self.push(sql);

        Ok(())
    }

    fn emit_add_primary_key(
        &mut self,
        table: &QualifiedName,
        name: Option<&str>,
        columns: &[String],
        clustered: bool,
    ) {
        let name = name.map_or_else(|| default_primary_key_name(table), str::to_owned);

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ",
            name_of(table),
            quote_identifier(&name)
        );
        if !clustered {
            sql.push_str("NONCLUSTERED ");
        }
        write!(sql, "({})", quoted_join(columns)).expect("writing to String should not fail");

        self.push(sql);
    }

    fn emit_add_foreign_key(&mut self, foreign_key: &ForeignKey) -> Result<()> {
        let name = foreign_key
            .name
            .clone()
            .unwrap_or_else(|| default_foreign_key_name(foreign_key));

        if foreign_key.dependent_columns.len() != foreign_key.principal_columns.len() {
            return Err(SchemaError::ForeignKeyColumnMismatch {
                name,
                dependent: foreign_key.dependent_columns.len(),
                principal: foreign_key.principal_columns.len(),
            }
            .into());
        }

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            name_of(&foreign_key.dependent_table),
            quote_identifier(&name),
            quoted_join(&foreign_key.dependent_columns),
            name_of(&foreign_key.principal_table),
            quoted_join(&foreign_key.principal_columns)
        );
        if foreign_key.cascade_delete {
            sql.push_str(" ON DELETE CASCADE");
        }

        self.push(sql);
        Ok(())
    }

    fn emit_create_index(
        &mut self,
        table: &QualifiedName,
        name: Option<&str>,
        columns: &[String],
        unique: bool,
        clustered: bool,
    ) {
        let name = name.map_or_else(|| default_index_name(columns), str::to_owned);

        let mut sql = String::from("CREATE ");
        if unique {
            sql.push_str("UNIQUE ");
        }
        if clustered {
            sql.push_str("CLUSTERED ");
        }
        write!(
            sql,
            "INDEX {} ON {}({})",
            quote_identifier(&name),
            name_of(table),
            quoted_join(columns)
        )
        .expect("writing to String should not fail");

        self.push(sql);
    }

    fn emit_procedure(&mut self, procedure: &Procedure, modifier: &str) -> Result<()> {
        let mut writer = SqlWriter::new();
        writer.write(modifier);
        writer.write_line(&format!(" PROCEDURE {}", name_of(&procedure.name)));
        writer.indent();

        for (index, parameter) in procedure.parameters.iter().enumerate() {
            writer.write(&self.parameter_definition(parameter)?);
            if index + 1 < procedure.parameters.len() {
                writer.write_line(",");
            } else {
                writer.write_line("");
            }
        }

        writer.unindent();
        writer.write_line("AS");
        writer.write_line("BEGIN");
        writer.indent();

        if procedure.body.trim().is_empty() {
            writer.write_line("RETURN");
        } else {
            let indentation = writer.current_indentation();
            writer.write_line(&reindent(&procedure.body, &indentation));
        }

        writer.unindent();
        writer.write("END");

        self.statements
            .push(Statement::new(writer.into_sql()).with_batch_terminator(BATCH_TERMINATOR));
        Ok(())
    }

    fn emit_schema_transfer(&mut self, new_schema: &str, name: &QualifiedName) {
        self.push(format!(
            "ALTER SCHEMA {} TRANSFER {}",
            quote_identifier(new_schema),
            name_of(name)
        ));
    }

    /// Emits a guarded CREATE SCHEMA once per schema per call; `dbo` always
    /// exists and is never guarded.
    fn ensure_schema(&mut self, schema: &str) {
        if schema.eq_ignore_ascii_case("dbo") || self.generated_schemas.contains(schema) {
            return;
        }

        let mut writer = SqlWriter::new();
        writer.write("IF schema_id('");
        writer.write(&escape_literal(schema));
        writer.write_line("') IS NULL");
        writer.indent();
        writer.write("EXECUTE('CREATE SCHEMA ");
        writer.write(&escape_literal(&quote_identifier(schema)));
        writer.write("')");
        self.push(writer.into_sql());

        self.generated_schemas.insert(schema.to_owned());
    }

    fn emit_history_rebuild(&mut self, rebuild: &HistoryRebuild<'_>) -> Result<()> {
        let source = rebuild.source_table;
        validate_table(source)?;

        let mut target = source.clone();
        target.name.name.push('2');
        if let Some(primary_key) = &mut target.primary_key {
            primary_key.name = None;
            primary_key.clustered = true;
        }

        let mut writer = SqlWriter::new();
        self.write_create_table(&target, &mut writer)?;
        writer.write_line("");

        writer.write("INSERT INTO ");
        writer.write_line(&name_of(&target.name));
        writer.write("SELECT ");
        for (index, column) in source.columns.iter().enumerate() {
            if index > 0 {
                writer.write(", ");
            }
            if column.name == rebuild.added_column_name {
                writer.write(&format!("'{}'", rebuild.context_key));
            } else {
                writer.write(&name_of(&QualifiedName::parse(&column.name)));
            }
        }
        writer.write(" FROM ");
        writer.write_line(&name_of(&source.name));

        writer.write("DROP TABLE ");
        writer.write_line(&name_of(&source.name));

        writer.write(&rename_object_sql(&target.name, HISTORY_TABLE_NAME));

        self.push(writer.into_sql());
        Ok(())
    }

    fn write_create_table(&self, table: &Table, writer: &mut SqlWriter) -> Result<()> {
        writer.write_line(&format!("CREATE TABLE {} (", name_of(&table.name)));
        writer.indent();

        for (index, column) in table.columns.iter().enumerate() {
            writer.write(&self.column_definition(column)?);
            if index + 1 < table.columns.len() {
                writer.write_line(",");
            }
        }

        match &table.primary_key {
            Some(primary_key) => {
                let name = primary_key
                    .name
                    .clone()
                    .unwrap_or_else(|| default_primary_key_name(&table.name));

                writer.write_line(",");
                writer.write("CONSTRAINT ");
                writer.write(&quote_identifier(&name));
                writer.write(" PRIMARY KEY ");
                if !primary_key.clustered {
                    writer.write("NONCLUSTERED ");
                }
                writer.write("(");
                writer.write(&quoted_join(&primary_key.columns));
                writer.write_line(")");
            }
            None => writer.write_line(""),
        }

        writer.unindent();
        writer.write(")");
        Ok(())
    }

    fn column_definition(&self, column: &Column) -> Result<String> {
        let mut definition = format!(
            "{} {}",
            quote_identifier(&column.name),
            self.column_type(column)?
        );

        if column.nullable == Some(false) {
            definition.push_str(" NOT NULL");
        }

        if let Some(value) = &column.default {
            write!(definition, " DEFAULT {}", render_literal(value))
                .expect("writing to String should not fail");
        } else if let Some(default_sql) = non_blank(column.default_sql.as_deref()) {
            write!(definition, " DEFAULT {default_sql}")
                .expect("writing to String should not fail");
        } else if column.is_identity() {
            if matches!(column.ty, AbstractType::Guid) {
                write!(definition, " DEFAULT {}", self.guid_column_default())
                    .expect("writing to String should not fail");
            } else {
                definition.push_str(" IDENTITY");
            }
        }

        Ok(definition)
    }

    fn column_type(&self, column: &Column) -> Result<String> {
        if column.is_rowversion() {
            return Ok("rowversion".to_owned());
        }

        let concrete = typemap::resolve_store_type(
            &column.ty,
            non_blank(column.store_type.as_deref()),
            &self.capabilities,
        )?;
        Ok(ddl::render_store_type(&concrete))
    }

    fn parameter_definition(&self, parameter: &ProcedureParameter) -> Result<String> {
        let concrete = typemap::resolve_store_type(
            &parameter.ty,
            non_blank(parameter.store_type.as_deref()),
            &self.capabilities,
        )?;

        let mut definition = format!("@{} {}", parameter.name, ddl::render_store_type(&concrete));

        if parameter.output {
            definition.push_str(" OUT");
        }

        if let Some(value) = &parameter.default {
            write!(definition, " = {}", render_literal(value))
                .expect("writing to String should not fail");
        } else if let Some(default_sql) = non_blank(parameter.default_sql.as_deref()) {
            write!(definition, " = {default_sql}").expect("writing to String should not fail");
        }

        Ok(definition)
    }

    /// Discovers and drops the engine-named default constraint on a column;
    /// each emission takes a fresh scratch variable.
    fn drop_default_constraint_sql(&mut self, table: &QualifiedName, column: &str) -> String {
        let variable = format!("@var{}", self.variable_counter);
        self.variable_counter += 1;

        let mut writer = SqlWriter::new();
        writer.write("DECLARE ");
        writer.write(&variable);
        writer.write_line(" nvarchar(128)");
        writer.write("SELECT ");
        writer.write(&variable);
        writer.write_line(" = name");
        writer.write_line("FROM sys.default_constraints");
        writer.write("WHERE parent_object_id = object_id(N'");
        writer.write(&dotted_name(table));
        writer.write_line("')");
        writer.write("AND col_name(parent_object_id, parent_column_id) = '");
        writer.write(column);
        writer.write_line("';");
        writer.write("IF ");
        writer.write(&variable);
        writer.write_line(" IS NOT NULL");
        writer.indent();
        writer.write("EXECUTE('ALTER TABLE ");
        writer.write(&escape_literal(&name_of(table)));
        writer.write(" DROP CONSTRAINT ' + ");
        writer.write(&variable);
        writer.write(")");

        writer.into_sql()
    }

    fn guid_column_default(&self) -> &'static str {
        if self.capabilities.supports_sequential_guid_default {
            "newsequentialid()"
        } else {
            "newid()"
        }
    }

    fn push(&mut self, sql: String) {
        self.statements.push(Statement::new(sql));
    }
}

/// The three-operation tail that widens the history table's key, recognized
/// so it can be collapsed into one copy-and-swap statement.
struct HistoryRebuild<'a> {
    added_column_name: &'a str,
    context_key: &'a str,
    source_table: &'a Table,
}

/// Matches the rebuild window at the head of `operations`: add the context
/// key column, drop the old primary key (carrying the table shape), add the
/// new primary key, all against the history table. Anything less falls
/// through to one-at-a-time dispatch.
fn detect_history_rebuild(operations: &[MigrationOperation]) -> Option<HistoryRebuild<'_>> {
    let [
        MigrationOperation::AddColumn {
            table: add_table,
            column,
        },
        MigrationOperation::DropPrimaryKey {
            table: drop_table,
            create_table: Some(source_table),
            ..
        },
        MigrationOperation::AddPrimaryKey {
            table: key_table, ..
        },
        ..
    ] = operations
    else {
        return None;
    };

    if column.name != CONTEXT_KEY_COLUMN
        || dotted_name(add_table) != HISTORY_TABLE
        || dotted_name(drop_table) != HISTORY_TABLE
        || dotted_name(key_table) != HISTORY_TABLE
    {
        return None;
    }

    let Some(LiteralValue::String(context_key)) = &column.default else {
        return None;
    };

    Some(HistoryRebuild {
        added_column_name: &column.name,
        context_key,
        source_table,
    })
}

fn validate_table(table: &Table) -> Result<()> {
    if table.columns.is_empty() {
        return Err(SchemaError::EmptyTable {
            table: dotted_name(&table.name),
        }
        .into());
    }

    if let Some(primary_key) = &table.primary_key {
        for key_column in &primary_key.columns {
            if !table.columns.iter().any(|column| column.name == *key_column) {
                return Err(SchemaError::UnknownKeyColumn {
                    table: dotted_name(&table.name),
                    column: key_column.clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}

fn write_make_system_table(name: &QualifiedName, writer: &mut SqlWriter) {
    writer.write_line("BEGIN TRY");
    writer.indent();
    writer.write_line(&format!(
        "EXECUTE sp_MS_marksystemobject '{}'",
        escape_literal(&dotted_name(name))
    ));
    writer.unindent();
    writer.write_line("END TRY");
    writer.write_line("BEGIN CATCH");
    writer.write("END CATCH");
}

fn rename_object_sql(name: &QualifiedName, new_name: &str) -> String {
    format!(
        "EXECUTE sp_rename @objname = N'{}', @newname = N'{}', @objtype = N'OBJECT'",
        escape_literal(&dotted_name(name)),
        escape_literal(new_name)
    )
}

/// A non-nullable column added without a default needs one synthesized so
/// existing rows can be filled; store-generated columns fill themselves.
fn needs_synthesized_default(column: &Column) -> bool {
    column.nullable == Some(false)
        && column.default.is_none()
        && non_blank(column.default_sql.as_deref()).is_none()
        && !column.is_identity()
        && !column.is_rowversion()
        && !store_type_is(column, "rowversion")
        && !store_type_is(column, "timestamp")
}

/// The zero/empty literal for a type; date-times get the engine epoch
/// rather than the calendar minimum.
fn zero_value_literal(ty: &AbstractType) -> &'static str {
    match ty {
        AbstractType::Boolean
        | AbstractType::Byte
        | AbstractType::Int16
        | AbstractType::Int32
        | AbstractType::Int64
        | AbstractType::Single
        | AbstractType::Double
        | AbstractType::Decimal { .. } => "0",
        AbstractType::String { .. } => "''",
        AbstractType::Binary { .. } => "0x",
        AbstractType::DateTime => "'1900-01-01T00:00:00.000'",
        AbstractType::DateTimeOffset { .. } => "'0001-01-01T00:00:00.000+00:00'",
        AbstractType::Time { .. } => "'00:00:00'",
        AbstractType::Guid => "'00000000-0000-0000-0000-000000000000'",
        AbstractType::Geography => "'SRID=4326;POINT (0 0)'",
        AbstractType::Geometry => "'SRID=0;POINT (0 0)'",
    }
}

fn render_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(true) => "1".to_owned(),
        LiteralValue::Bool(false) => "0".to_owned(),
        LiteralValue::Int(value) => value.to_string(),
        LiteralValue::Double(value) => value.to_string(),
        LiteralValue::String(value) => format!("'{value}'"),
        LiteralValue::Bytes(bytes) => {
            let mut rendered = String::with_capacity(2 + bytes.len() * 2);
            rendered.push_str("0x");
            for byte in bytes {
                write!(rendered, "{byte:02X}").expect("writing to String should not fail");
            }
            rendered
        }
        LiteralValue::DateTime(value) => format!("'{}'", value.format(DATE_TIME_FORMAT)),
        LiteralValue::DateTimeOffset(value) => {
            format!("'{}'", value.format(DATE_TIME_OFFSET_FORMAT))
        }
        LiteralValue::Time(value) => format!("'{value}'"),
        LiteralValue::Guid(value) => format!("'{value}'"),
        LiteralValue::Geography {
            srid,
            well_known_text,
        }
        | LiteralValue::Geometry {
            srid,
            well_known_text,
        } => format!("'SRID={srid};{well_known_text}'"),
    }
}

/// Re-indents an embedded SQL body: every line break (and the original
/// leading spaces after it) is replaced with a newline at the given
/// indentation.
fn reindent(body: &str, indentation: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        let line_break = match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                true
            }
            '\n' => true,
            _ => {
                result.push(c);
                false
            }
        };

        if line_break {
            result.push('\n');
            result.push_str(indentation);
            while chars.peek() == Some(&' ') {
                chars.next();
            }
        }
    }

    result
}

/// Quotes each part of a possibly schema-qualified name.
fn name_of(name: &QualifiedName) -> String {
    match &name.schema {
        Some(schema) => format!(
            "{}.{}",
            quote_identifier(schema),
            quote_identifier(&name.name)
        ),
        None => quote_identifier(&name.name),
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

fn store_type_is(column: &Column, name: &str) -> bool {
    column
        .store_type
        .as_deref()
        .is_some_and(|store_type| store_type.eq_ignore_ascii_case(name))
}

fn quoted_join(columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ")
}
