use tsqlgen_core::{Column, ForeignKey, QualifiedName, Table};
use tsqlgen_dialect_mssql::{
    DialectCapabilities, MAX_IDENTIFIER_LENGTH, SchemaScriptBuilder, count_databases_by_file_script,
    create_database_script, create_objects_script, database_exists_script,
    database_names_by_file_script, default_foreign_key_name, default_index_name,
    default_primary_key_name, drop_database_script, escape_literal, escape_string_literal,
    like_pattern_escape, quote_identifier, set_database_options_script,
};

#[test]
fn quoting_doubles_closing_brackets() {
    assert_eq!(quote_identifier("Customers"), "[Customers]");
    assert_eq!(quote_identifier("odd]name"), "[odd]]name]");
}

#[test]
fn string_literals_double_embedded_quotes() {
    assert_eq!(escape_string_literal("O'Brien"), "N'O''Brien'");
    assert_eq!(escape_literal("it's"), "it''s");
}

#[test]
fn like_patterns_escape_wildcards_with_a_tilde() {
    assert_eq!(like_pattern_escape("plain", false), ("plain".to_owned(), false));
    assert_eq!(
        like_pattern_escape("100% done", false),
        ("100~% done".to_owned(), true)
    );
    assert_eq!(
        like_pattern_escape("a_b[c]^d", false),
        ("a~_b~[c]~^d".to_owned(), true)
    );
    // Once escaping is in play the escape character is escaped too.
    assert_eq!(like_pattern_escape("50%~", false), ("50~%~~".to_owned(), true));
    // Without wildcards a tilde passes through untouched...
    assert_eq!(like_pattern_escape("a~b", false), ("a~b".to_owned(), false));
    // ...unless escaping it is forced.
    assert_eq!(like_pattern_escape("a~b", true), ("a~~b".to_owned(), true));
}

#[test]
fn derived_constraint_names_are_capped_at_the_identifier_limit() {
    assert_eq!(
        default_primary_key_name(&QualifiedName::parse("dbo.Customers")),
        "PK_dbo.Customers"
    );
    assert_eq!(
        default_index_name(&["CustomerId".to_owned(), "OrderDate".to_owned()]),
        "IX_CustomerId_OrderDate"
    );
    assert_eq!(
        default_foreign_key_name(&orders_foreign_key(None)),
        "FK_dbo.Orders_dbo.Customers_CustomerId"
    );

    let long_table = QualifiedName::parse(&format!("dbo.{}", "x".repeat(200)));
    assert_eq!(
        default_primary_key_name(&long_table).chars().count(),
        MAX_IDENTIFIER_LENGTH
    );
}

#[test]
fn create_schema_guard_travels_in_one_batch() {
    let capabilities = caps("2008");
    let mut builder = SchemaScriptBuilder::new(&capabilities);
    builder.append_create_schema("sales");
    assert_eq!(
        builder.into_sql(),
        "if (schema_id(N'sales') is null) exec(N'create schema [sales]');\n"
    );
}

#[test]
fn create_table_lists_columns_then_the_primary_key() {
    let capabilities = caps("2008");
    let mut builder = SchemaScriptBuilder::new(&capabilities);
    let table = Table::named("dbo.Customers")
        .with_column(Column::int("Id").not_null().identity())
        .with_column(Column::string("Name"))
        .with_primary_key(["Id"]);
    builder.append_create_table(&table).expect("table should render");

    let expected = "\
create table [dbo].[Customers] (
    [Id] [int] not null identity,
    [Name] [nvarchar](max) null,
    primary key ([Id])
);
";
    assert_eq!(builder.into_sql(), expected);
}

#[test]
fn create_table_without_a_primary_key_has_no_trailing_comma() {
    let capabilities = caps("2008");
    let mut builder = SchemaScriptBuilder::new(&capabilities);
    let table = Table::named("dbo.Log").with_column(Column::string("Line"));
    builder.append_create_table(&table).expect("table should render");
    assert_eq!(
        builder.into_sql(),
        "create table [dbo].[Log] (\n    [Line] [nvarchar](max) null\n);\n"
    );
}

#[test]
fn rowversion_and_guid_identity_columns_get_their_special_forms() {
    let capabilities = caps("2008");
    let mut builder = SchemaScriptBuilder::new(&capabilities);
    let table = Table::named("dbo.Versioned")
        .with_column(Column::guid("Id").not_null().identity())
        .with_column(Column::rowversion("RowVersion").not_null())
        .with_primary_key(["Id"]);
    builder.append_create_table(&table).expect("table should render");

    let expected = "\
create table [dbo].[Versioned] (
    [Id] [uniqueidentifier] not null default newid(),
    [RowVersion] [rowversion] not null,
    primary key ([Id])
);
";
    assert_eq!(builder.into_sql(), expected);
}

#[test]
fn defining_query_tables_are_skipped_with_a_comment() {
    let capabilities = caps("2008");
    let mut builder = SchemaScriptBuilder::new(&capabilities);
    let mut table = Table::named("dbo.ActiveCustomers").with_column(Column::int("Id"));
    table.has_defining_query = true;
    builder.append_create_table(&table).expect("table should render");

    let mut foreign_key = orders_foreign_key(Some("FK_orders"));
    foreign_key.principal_table = QualifiedName::parse("dbo.ActiveCustomers");
    builder.append_create_foreign_key(&foreign_key);

    let expected = "\
-- Ignoring entity set with defining query: [dbo].[ActiveCustomers]
-- Ignoring association set with participating entity set with defining query: [FK_orders]
";
    assert_eq!(builder.into_sql(), expected);
}

#[test]
fn foreign_keys_render_with_cascade() {
    let capabilities = caps("2008");
    let mut builder = SchemaScriptBuilder::new(&capabilities);
    let mut foreign_key = orders_foreign_key(Some("FK_Orders_Customers"));
    foreign_key.cascade_delete = true;
    builder.append_create_foreign_key(&foreign_key);
    assert_eq!(
        builder.into_sql(),
        "alter table [dbo].[Orders] add constraint [FK_Orders_Customers] foreign key ([CustomerId]) references [dbo].[Customers]([Id]) on delete cascade;\n"
    );
}

#[test]
fn the_objects_script_orders_schemas_tables_and_keys() {
    let capabilities = caps("2008");
    let tables = vec![
        Table::named("sales.Orders")
            .with_column(Column::int("Id").not_null())
            .with_primary_key(["Id"]),
        Table::named("dbo.Customers")
            .with_column(Column::int("Id").not_null())
            .with_primary_key(["Id"]),
        Table::named("archive.Backups")
            .with_column(Column::int("Id").not_null())
            .with_primary_key(["Id"]),
    ];
    let script = create_objects_script(&tables, &[], &capabilities).expect("script should render");

    let archive_guard = script.find("schema_id(N'archive')").expect("archive guard");
    let sales_guard = script.find("schema_id(N'sales')").expect("sales guard");
    assert!(archive_guard < sales_guard);
    assert!(!script.contains("schema_id(N'dbo')"));

    let backups = script.find("create table [archive].[Backups]").expect("Backups");
    let customers = script.find("create table [dbo].[Customers]").expect("Customers");
    let orders = script.find("create table [sales].[Orders]").expect("Orders");
    assert!(sales_guard < backups);
    assert!(backups < customers && customers < orders);
}

#[test]
fn the_objects_script_on_sql_2000_skips_schema_guards() {
    let capabilities = caps("2000");
    let tables = vec![Table::named("sales.Orders").with_column(Column::int("Id"))];
    let script = create_objects_script(&tables, &[], &capabilities).expect("script should render");
    assert!(!script.contains("schema_id"));
    assert!(script.starts_with("create table [sales].[Orders] ("));
}

#[test]
fn database_scripts_derive_the_log_file_from_the_data_file() {
    assert_eq!(create_database_script("Orders", None), "create database [Orders]");
    assert_eq!(
        create_database_script("Orders", Some(r"C:\data\orders.mdf")),
        r"create database [Orders] on primary (name=N'orders.mdf', filename=N'C:\data\orders.mdf') log on (name=N'orders_log.ldf', filename=N'C:\data\orders_log.ldf')"
    );
    assert_eq!(drop_database_script("Orders"), "drop database [Orders]");
}

#[test]
fn the_snapshot_isolation_script_skips_old_engines_and_hosted_editions() {
    assert_eq!(set_database_options_script("Orders", &caps("2000")), "");
    assert_eq!(
        set_database_options_script("Orders", &caps("2008")),
        "if serverproperty('EngineEdition') <> 5 execute sp_executesql N'alter database [Orders] set read_committed_snapshot on'"
    );
}

#[test]
fn catalog_queries_use_deprecated_tables_on_sql_2000() {
    assert_eq!(
        database_exists_script("Orders", &caps("2008")),
        "SELECT Count(*) FROM sys.databases WHERE [name]=N'Orders'"
    );
    assert_eq!(
        database_exists_script("Orders", &caps("2000")),
        "SELECT Count(*) FROM sysdatabases WHERE [name]=N'Orders'"
    );

    assert_eq!(
        database_names_by_file_script("orders.mdf", &caps("2008")),
        "SELECT [d].[name] FROM sys.databases AS [d] INNER JOIN sys.master_files AS [f] ON [f].[database_id] = [d].[database_id] WHERE [f].[physical_name]=N'orders.mdf'"
    );
    assert_eq!(
        database_names_by_file_script("orders.mdf", &caps("2000")),
        "SELECT [d].[name] FROM sysdatabases AS [d]  WHERE [filename]=N'orders.mdf'"
    );

    assert_eq!(
        count_databases_by_file_script("orders.mdf", &caps("2008")),
        "SELECT Count(*) FROM sys.master_files WHERE [physical_name]=N'orders.mdf'"
    );
    assert_eq!(
        count_databases_by_file_script("orders.mdf", &caps("2000")),
        "SELECT Count(*) FROM sysdatabases WHERE [filename]=N'orders.mdf'"
    );
}

fn caps(token: &str) -> DialectCapabilities {
    DialectCapabilities::resolve(token).expect("token should resolve")
}

fn orders_foreign_key(name: Option<&str>) -> ForeignKey {
    ForeignKey {
        name: name.map(str::to_owned),
        dependent_table: QualifiedName::parse("dbo.Orders"),
        dependent_columns: vec!["CustomerId".to_owned()],
        principal_table: QualifiedName::parse("dbo.Customers"),
        principal_columns: vec!["Id".to_owned()],
        cascade_delete: false,
    }
}
