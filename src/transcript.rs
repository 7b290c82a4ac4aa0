use crate::parser::Diagnostic;

/// Name given to blocks that never saw a `;; ` label.
pub const DEFAULT_NAME: &str = "default_comment";

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

#[derive(Debug, PartialEq, Clone)]
pub enum Expectation {
    Output(String),
    Error(String),
}

impl Expectation {
    /// Both variants are asserted the same way in generated code.
    pub fn text(&self) -> &str {
        match self {
            Expectation::Output(text) => text,
            Expectation::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expectation::Error(_))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct TestCase {
    pub input: String,
    pub expected: Expectation,
    pub line: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TestBlock {
    pub label: Option<String>,
    pub name: String,
    pub cases: Vec<TestCase>,
}

impl TestBlock {
    pub fn new() -> TestBlock {
        TestBlock {
            label: None,
            name: DEFAULT_NAME.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn set_label(&mut self, label: &str) {
        self.name = normalize_name(label);
        self.label = Some(label.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// The label as written in the transcript, or the function name for unlabeled blocks.
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn error_case_count(&self) -> usize {
        self.cases.iter().filter(|c| c.expected.is_error()).count()
    }
}

impl Default for TestBlock {
    fn default() -> TestBlock {
        TestBlock::new()
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Transcript {
    pub blocks: Vec<TestBlock>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Transcript {
    pub fn case_count(&self) -> usize {
        self.blocks.iter().map(|b| b.cases.len()).sum()
    }
}

/// Turns a block label into a bare Rust identifier.
///
/// Letters are lowercased, whitespace and `-` become `_`, and everything else
/// that can't appear in an identifier (`*`, `!`, quotes, non-ASCII, ...) is
/// dropped. Repeated underscores collapse and the edges are trimmed.
pub fn normalize_name(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    for c in label.chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            '_' | '-' => '_',
            c if c.is_whitespace() => '_',
            _ => continue,
        };
        if mapped == '_' && (name.is_empty() || name.ends_with('_')) {
            continue;
        }
        name.push(mapped);
    }
    while name.ends_with('_') {
        name.pop();
    }

    if name.is_empty() {
        return DEFAULT_NAME.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) || RUST_KEYWORDS.contains(&name.as_str()) {
        return format!("test_{}", name);
    }
    name
}
