use super::{Column, ForeignKey, Procedure, QualifiedName, Table};

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOperation {
    // --- Table ---
    CreateTable {
        table: Table,
    },
    DropTable {
        name: QualifiedName,
    },
    RenameTable {
        name: QualifiedName,
        new_name: String,
    },
    MoveTable {
        name: QualifiedName,
        new_schema: Option<String>,
        rebuild: Option<SystemTableRebuild>,
    },

    // --- Column (scoped to a table) ---
    AddColumn {
        table: QualifiedName,
        column: Column,
    },
    DropColumn {
        table: QualifiedName,
        name: String,
    },
    AlterColumn {
        table: QualifiedName,
        column: Column,
    },
    RenameColumn {
        table: QualifiedName,
        name: String,
        new_name: String,
    },

    // --- Primary key ---
    AddPrimaryKey {
        table: QualifiedName,
        name: Option<String>,
        columns: Vec<String>,
        clustered: bool,
    },
    DropPrimaryKey {
        table: QualifiedName,
        name: Option<String>,
        create_table: Option<Table>,
    },

    // --- Foreign key ---
    AddForeignKey {
        foreign_key: ForeignKey,
    },
    DropForeignKey {
        foreign_key: ForeignKey,
    },

    // --- Index ---
    CreateIndex {
        table: QualifiedName,
        name: Option<String>,
        columns: Vec<String>,
        unique: bool,
        clustered: bool,
    },
    DropIndex {
        table: QualifiedName,
        name: Option<String>,
        columns: Vec<String>,
    },

    // --- Procedure ---
    CreateProcedure {
        procedure: Procedure,
    },
    AlterProcedure {
        procedure: Procedure,
    },
    DropProcedure {
        name: QualifiedName,
    },
    RenameProcedure {
        name: QualifiedName,
        new_name: String,
    },
    MoveProcedure {
        name: QualifiedName,
        new_schema: Option<String>,
    },

    // --- Raw SQL ---
    Sql {
        sql: String,
        suppress_transaction: bool,
    },

    // --- Externally-defined operation kinds ---
    Custom {
        name: String,
    },
}

/// Copy-and-swap payload for moving a system table across logical owners:
/// the target table shape plus the owner key whose rows should move.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTableRebuild {
    pub table: Table,
    pub context_key: String,
}
