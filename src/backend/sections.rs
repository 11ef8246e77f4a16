//! Section intermediate representation for generated C
//!
//! The emitters never print directly. Each region of the output is built as
//! a named [`Section`] holding its lines; [`render`] turns an ordered list
//! of sections into the final text. Keeping extraction, section building and
//! rendering separate means each can be tested on its own.

/// One named region of a generated translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: &'static str,
    lines: Vec<String>,
}

impl Section {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            lines: Vec::new(),
        }
    }

    /// Name this section was registered under (for tests and debugging).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append one output line.
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append user-supplied literal code, which may itself span lines.
    pub fn verbatim(&mut self, code: &str) {
        self.lines.push(code.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Render sections to text. Every line gets a trailing newline unless it
/// already carries one (multi-line verbatim code keeps its own layout).
pub fn render(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        for line in section.lines() {
            out.push_str(line);
            if !line.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out
}
