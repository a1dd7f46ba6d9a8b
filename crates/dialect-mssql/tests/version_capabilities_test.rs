use tsqlgen_core::Error;
use tsqlgen_dialect_mssql::{AZURE_TOKEN, DialectCapabilities, LIKE_ESCAPE_CHAR, SqlVersion};

#[test]
fn tokens_resolve_to_engine_versions() {
    assert_eq!(resolve("2000").version, SqlVersion::Sql8);
    assert_eq!(resolve("2005").version, SqlVersion::Sql9);
    assert_eq!(resolve("2008").version, SqlVersion::Sql10);
    assert_eq!(resolve("2012").version, SqlVersion::Sql11);
    assert_eq!(resolve(AZURE_TOKEN).version, SqlVersion::Sql11);
    assert!(resolve(AZURE_TOKEN).azure);
    assert!(!resolve("2012").azure);
}

#[test]
fn unknown_tokens_are_rejected_with_the_accepted_list() {
    let error = DialectCapabilities::resolve("2014").expect_err("2014 has no dialect");
    assert!(matches!(error, Error::Dialect(_)));
    assert!(error.to_string().contains("\"2012.Azure\""));
}

#[test]
fn feature_flags_follow_the_version() {
    let sql8 = resolve("2000");
    assert!(!sql8.supports_schemas);
    assert!(!sql8.supports_max_types);
    assert!(!sql8.supports_extended_date_time);
    assert!(!sql8.supports_spatial);
    assert!(!sql8.supports_sequential_guid_default);
    assert!(sql8.supports_engine_edition_ddl);

    let sql9 = resolve("2005");
    assert!(sql9.supports_schemas);
    assert!(sql9.supports_max_types);
    assert!(!sql9.supports_extended_date_time);

    let sql10 = resolve("2008");
    assert!(sql10.supports_extended_date_time);
    assert!(sql10.supports_spatial);
    assert!(sql10.supports_sequential_guid_default);

    let azure = resolve(AZURE_TOKEN);
    assert!(!azure.supports_engine_edition_ddl);
    assert!(!azure.supports_sequential_guid_default);
    assert!(resolve("2012").supports_engine_edition_ddl);
    assert_eq!(azure.like_escape_char, LIKE_ESCAPE_CHAR);
}

#[test]
fn dialect_names_follow_the_marketing_names() {
    assert_eq!(resolve("2000").dialect_name(), "SQL Server 2000");
    assert_eq!(resolve("2005").dialect_name(), "SQL Server 2005");
    assert_eq!(resolve("2008").dialect_name(), "SQL Server 2008");
    assert_eq!(resolve("2012").dialect_name(), "SQL Server 2012");
    assert_eq!(resolve(AZURE_TOKEN).dialect_name(), "SQL Azure");
}

#[test]
fn the_store_type_catalog_grows_with_the_version() {
    let names_2000 = resolve("2000").store_type_names();
    assert!(names_2000.contains(&"nvarchar"));
    assert!(!names_2000.contains(&"nvarchar(max)"));
    assert!(!names_2000.contains(&"xml"));
    assert!(!names_2000.contains(&"datetime2"));
    assert!(!names_2000.contains(&"geography"));

    let names_2005 = resolve("2005").store_type_names();
    assert!(names_2005.contains(&"nvarchar(max)"));
    assert!(names_2005.contains(&"xml"));
    assert!(!names_2005.contains(&"datetime2"));
    assert!(!names_2005.contains(&"geography"));

    let names_2008 = resolve("2008").store_type_names();
    assert!(names_2008.contains(&"datetime2"));
    assert!(names_2008.contains(&"date"));
    assert!(names_2008.contains(&"time"));
    assert!(names_2008.contains(&"geography"));
    assert!(names_2008.contains(&"geometry"));
    assert_eq!(names_2008.len(), 35);
}

#[test]
fn the_store_type_catalog_is_sorted_by_name() {
    let names = resolve("2012").store_type_names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn extended_date_time_functions_need_sql_2008() {
    assert!(function_exists("2008", "SYSDATETIME"));
    assert!(function_exists("2008", "SYSUTCDATETIME"));
    assert!(function_exists("2008", "SYSDATETIMEOFFSET"));
    assert!(!function_exists("2005", "SYSDATETIME"));
    assert!(!function_exists("2005", "SYSDATETIMEOFFSET"));
    assert!(function_exists("2005", "GETDATE"));
    assert!(function_exists("2000", "GETDATE"));
    assert!(function_exists("2000", "GETUTCDATE"));
}

#[test]
fn spatial_functions_need_sql_2008() {
    assert!(function_exists("2008", "POINTGEOGRAPHY"));
    assert!(function_exists("2008", "POINTGEOMETRY"));
    assert!(!function_exists("2005", "POINTGEOGRAPHY"));
    assert!(!function_exists("2000", "POINTGEOMETRY"));
}

#[test]
fn aggregate_signatures_over_extended_types_need_sql_2008() {
    let max_over_time = |token: &str| {
        resolve(token)
            .store_functions()
            .iter()
            .any(|function| function.name == "MAX" && function.parameter_types == ["Time"])
    };
    assert!(max_over_time("2008"));
    assert!(!max_over_time("2005"));

    // The plain signatures stay available everywhere.
    assert!(
        resolve("2000")
            .store_functions()
            .iter()
            .any(|function| function.name == "MAX" && function.parameter_types == ["Int32"])
    );
}

#[test]
fn guid_counts_and_long_charindex_need_sql_2005() {
    let count_guid = |token: &str| {
        resolve(token)
            .store_functions()
            .iter()
            .any(|function| function.name == "COUNT" && function.parameter_types == ["Guid"])
    };
    assert!(count_guid("2005"));
    assert!(!count_guid("2000"));

    let long_charindex = |token: &str| {
        resolve(token)
            .store_functions()
            .iter()
            .any(|function| function.name == "CHARINDEX" && function.return_type == "Int64")
    };
    assert!(long_charindex("2005"));
    assert!(!long_charindex("2000"));
    assert!(function_exists("2000", "CHARINDEX"));
}

#[test]
fn signatures_carry_their_aggregate_flag_and_return_type() {
    let functions = resolve("2012").store_functions();

    let sum = functions
        .iter()
        .find(|function| function.name == "SUM" && function.parameter_types == ["Int64"])
        .expect("SUM over Int64 should exist");
    assert!(sum.aggregate);
    assert_eq!(sum.return_type, "Int64");

    let newid = functions
        .iter()
        .find(|function| function.name == "NEWID")
        .expect("NEWID should exist");
    assert!(!newid.aggregate);
    assert!(newid.parameter_types.is_empty());
    assert_eq!(newid.return_type, "Guid");
}

fn resolve(token: &str) -> DialectCapabilities {
    DialectCapabilities::resolve(token).expect("token should resolve")
}

fn function_exists(token: &str, name: &str) -> bool {
    resolve(token)
        .store_functions()
        .iter()
        .any(|function| function.name == name)
}
