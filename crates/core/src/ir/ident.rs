use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub schema: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Splits a dotted object name into schema and name. Bracketed parts may
    /// contain dots; `]]` inside brackets is an escaped `]`.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut parts = split_qualified(input);
        let name = parts.pop().unwrap_or_default();
        if parts.is_empty() {
            Self { schema: None, name }
        } else {
            Self {
                schema: Some(parts.join(".")),
                name,
            }
        }
    }

    #[must_use]
    pub fn schema_or_dbo(&self) -> &str {
        self.schema.as_deref().unwrap_or("dbo")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write_part(f, schema)?;
            f.write_str(".")?;
        }
        write_part(f, &self.name)
    }
}

fn write_part(f: &mut fmt::Formatter<'_>, part: &str) -> fmt::Result {
    if part.contains(['.', '[', ']']) {
        write!(f, "[{}]", part.replace(']', "]]"))
    } else {
        f.write_str(part)
    }
}

fn split_qualified(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '[' if !in_brackets => in_brackets = true,
            ']' if in_brackets => {
                if chars.peek() == Some(&']') {
                    chars.next();
                    current.push(']');
                } else {
                    in_brackets = false;
                }
            }
            '.' if !in_brackets => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    parts.push(current);
    parts
}
