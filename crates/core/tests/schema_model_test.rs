use tsqlgen_core::{
    AbstractType, Column, MaxLength, Procedure, ProcedureParameter, StoreGenerated, Table,
};

#[test]
fn table_builder_parses_the_table_name() {
    let table = Table::named("sales.Orders")
        .with_column(Column::int("Id").not_null().identity())
        .with_primary_key(["Id"]);

    assert_eq!(table.name.schema.as_deref(), Some("sales"));
    assert_eq!(table.name.name, "Orders");
    assert!(!table.is_system);
    assert!(!table.has_defining_query);

    let primary_key = table.primary_key.expect("builder should set a primary key");
    assert_eq!(primary_key.columns, vec!["Id".to_owned()]);
    assert!(primary_key.clustered);
    assert_eq!(primary_key.name, None);
}

#[test]
fn identity_and_nullability_builders_set_the_flags() {
    let column = Column::int("Id").not_null().identity();
    assert_eq!(column.nullable, Some(false));
    assert!(column.is_identity());

    let column = Column::string("Name").nullable();
    assert_eq!(column.nullable, Some(true));
    assert!(!column.is_identity());

    let column = Column::boolean("Active");
    assert_eq!(column.nullable, None);
}

#[test]
fn rowversion_is_a_fixed_computed_eight_byte_binary() {
    let column = Column::rowversion("Version");
    assert_eq!(column.store_generated, StoreGenerated::Computed);
    assert_eq!(
        column.ty,
        AbstractType::Binary {
            max_length: Some(MaxLength::Bounded(8)),
            fixed_length: true,
        }
    );
    assert!(column.is_rowversion());
}

#[test]
fn a_computed_binary_of_another_shape_is_not_a_rowversion() {
    let mut column = Column::binary("Thumbprint");
    column.store_generated = StoreGenerated::Computed;
    assert!(!column.is_rowversion());

    assert!(!Column::binary("Payload").is_rowversion());
}

#[test]
fn kind_names_follow_the_model_type_names() {
    assert_eq!(AbstractType::string().kind_name(), "String");
    assert_eq!(AbstractType::binary().kind_name(), "Binary");
    assert_eq!(AbstractType::decimal().kind_name(), "Decimal");
    assert_eq!(AbstractType::Guid.kind_name(), "Guid");
    assert_eq!(
        AbstractType::DateTimeOffset { precision: None }.kind_name(),
        "DateTimeOffset"
    );
    assert_eq!(AbstractType::Time { precision: None }.kind_name(), "Time");
}

#[test]
fn procedure_builder_collects_parameters_in_order() {
    let procedure = Procedure::named("dbo.InsertCustomer")
        .with_parameter(ProcedureParameter::new("Name", AbstractType::string()))
        .with_parameter(ProcedureParameter::new("Id", AbstractType::Int32).output())
        .with_body("RETURN");

    assert_eq!(procedure.name.to_string(), "dbo.InsertCustomer");
    assert_eq!(procedure.parameters.len(), 2);
    assert_eq!(procedure.parameters[0].name, "Name");
    assert!(!procedure.parameters[0].output);
    assert!(procedure.parameters[1].output);
    assert_eq!(procedure.body, "RETURN");
}
