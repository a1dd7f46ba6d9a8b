mod dialect;
mod error;
mod ir;
mod renderer;
mod statement;

pub use dialect::MigrationSqlGenerator;
pub use error::{DialectError, Error, GenerateError, Result, SchemaError, TypeError};
pub use ir::{
    AbstractType, Column, ForeignKey, LiteralValue, MaxLength, MigrationOperation, PrimaryKey,
    Procedure, ProcedureParameter, QualifiedName, StoreGenerated, SystemTableRebuild, Table,
};
pub use renderer::Renderer;
pub use statement::Statement;
