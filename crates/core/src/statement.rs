#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    /// Run outside the enclosing transaction; the statement is not rolled
    /// back if a later statement in the batch fails.
    pub suppress_transaction: bool,
    /// Client-side batch separator the execution layer must emit after this
    /// statement (e.g. `GO`), for statements that must end a batch.
    pub batch_terminator: Option<String>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            suppress_transaction: false,
            batch_terminator: None,
        }
    }

    #[must_use]
    pub fn suppressing_transaction(mut self) -> Self {
        self.suppress_transaction = true;
        self
    }

    #[must_use]
    pub fn with_batch_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.batch_terminator = Some(terminator.into());
        self
    }
}
