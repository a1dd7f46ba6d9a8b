use crate::{MigrationOperation, Result, Statement};

pub trait MigrationSqlGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Turns an ordered operation sequence into an ordered statement
    /// sequence for the dialect selected by `token`. Either every operation
    /// generates or the whole call fails; a partial statement list is never
    /// returned.
    fn generate(&self, operations: &[MigrationOperation], token: &str) -> Result<Vec<Statement>>;
}
