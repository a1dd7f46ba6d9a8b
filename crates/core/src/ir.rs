mod ident;
mod ops;
mod schema_object;
mod types;

pub use ident::QualifiedName;
pub use ops::{MigrationOperation, SystemTableRebuild};
pub use schema_object::{
    Column, ForeignKey, PrimaryKey, Procedure, ProcedureParameter, Table,
};
pub use types::{AbstractType, LiteralValue, MaxLength, StoreGenerated};
