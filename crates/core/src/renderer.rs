use crate::Statement;

#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn render(&self, statements: &[Statement]) -> String {
        let mut rendered = String::new();

        for statement in statements {
            rendered.push_str(&statement.sql);
            if !statement.sql.ends_with('\n') {
                rendered.push('\n');
            }
            self.push_batch_terminator(&mut rendered, statement);
        }

        rendered
    }

    fn push_batch_terminator(&self, rendered: &mut String, statement: &Statement) {
        let Some(terminator) = statement.batch_terminator.as_deref() else {
            return;
        };
        if terminator.is_empty() {
            return;
        }

        rendered.push_str(terminator);
        if !terminator.ends_with('\n') {
            rendered.push('\n');
        }
    }
}
