const TAB: &str = "    ";

/// Indentation-aware buffer for composing one multi-line statement.
///
/// Indentation is emitted lazily at the start of the next non-empty write, so
/// blank lines never carry trailing whitespace.
#[derive(Debug)]
pub(crate) struct SqlWriter {
    buffer: String,
    indent: usize,
    tabs_pending: bool,
}

impl SqlWriter {
    pub(crate) fn new() -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
            tabs_pending: true,
        }
    }

    pub(crate) fn write(&mut self, text: &str) {
        self.flush_tabs();
        self.buffer.push_str(text);
    }

    /// Writes `text` and ends the line. An empty `text` emits a bare newline.
    pub(crate) fn write_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.flush_tabs();
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self.tabs_pending = true;
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn unindent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// The whitespace prefix lines are currently indented by.
    #[must_use]
    pub(crate) fn current_indentation(&self) -> String {
        TAB.repeat(self.indent)
    }

    #[must_use]
    pub(crate) fn into_sql(self) -> String {
        self.buffer
    }

    fn flush_tabs(&mut self) {
        if self.tabs_pending {
            for _ in 0..self.indent {
                self.buffer.push_str(TAB);
            }
            self.tabs_pending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SqlWriter;

    #[test]
    fn indents_lines_written_after_indent() {
        let mut writer = SqlWriter::new();
        writer.write_line("BEGIN");
        writer.indent();
        writer.write_line("SELECT 1");
        writer.unindent();
        writer.write("END");

        assert_eq!(writer.into_sql(), "BEGIN\n    SELECT 1\nEND");
    }

    #[test]
    fn blank_lines_carry_no_indentation() {
        let mut writer = SqlWriter::new();
        writer.indent();
        writer.write_line("a");
        writer.write_line("");
        writer.write_line("b");

        assert_eq!(writer.into_sql(), "    a\n\n    b\n");
    }

    #[test]
    fn split_writes_indent_only_once_per_line() {
        let mut writer = SqlWriter::new();
        writer.indent();
        writer.write("IF x ");
        writer.write_line("IS NULL");

        assert_eq!(writer.into_sql(), "    IF x IS NULL\n");
    }

    #[test]
    fn unindent_at_margin_is_a_no_op() {
        let mut writer = SqlWriter::new();
        writer.unindent();
        writer.write("a");

        assert_eq!(writer.into_sql(), "a");
    }
}
