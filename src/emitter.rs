use std::collections::HashSet;

use crate::error::{GenError, GenErrorKind};
use crate::transcript::{TestBlock, TestCase};

/// How the per-test environment is handed to the evaluator.
#[derive(Debug, PartialEq, Clone, Copy, clap::ValueEnum)]
pub enum EnvPassing {
    /// `let mut env = ...;` passed as `&mut env`
    Mutable,
    /// `let env = ...;` passed as `&env`, for `Rc<RefCell<Env>>` style environments
    Shared,
}

impl EnvPassing {
    fn binding(&self) -> &'static str {
        match self {
            EnvPassing::Mutable => "let mut env",
            EnvPassing::Shared => "let env",
        }
    }

    fn argument(&self) -> &'static str {
        match self {
            EnvPassing::Mutable => "&mut env",
            EnvPassing::Shared => "&env",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub evaluator: String,
    pub env_init: String,
    pub env_passing: EnvPassing,
    pub imports: Vec<String>,
}

impl Default for EmitOptions {
    fn default() -> EmitOptions {
        EmitOptions {
            evaluator: "mal_rust::rep".to_string(),
            env_init: "Env::new_default()".to_string(),
            env_passing: EnvPassing::Mutable,
            imports: vec!["mal_rust::env::Env".to_string()],
        }
    }
}

pub struct Emitter<'a> {
    options: &'a EmitOptions,
    used_names: HashSet<String>,
    out: String,
}

impl<'a> Emitter<'a> {
    pub fn new(options: &'a EmitOptions) -> Emitter<'a> {
        Emitter {
            options,
            used_names: HashSet::new(),
            out: String::new(),
        }
    }

    pub fn emit(mut self, blocks: &[TestBlock]) -> String {
        self.emit_imports();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.emit_block(block);
        }
        self.out
    }

    fn emit_imports(&mut self) {
        if self.options.imports.is_empty() {
            return;
        }
        for path in &self.options.imports {
            self.out.push_str(&format!("use {};\n", path));
        }
        self.out.push('\n');
    }

    fn emit_block(&mut self, block: &TestBlock) {
        let name = self.unique_name(&block.name);
        self.out.push_str("#[test]\n");
        self.out.push_str(&format!("fn {}() {{\n", name));
        self.out.push_str(&format!(
            "    {} = {};\n",
            self.options.env_passing.binding(),
            self.options.env_init
        ));
        for case in &block.cases {
            self.emit_case(case);
        }
        self.out.push_str("}\n");
    }

    fn emit_case(&mut self, case: &TestCase) {
        self.out.push_str(&format!(
            "    assert_eq!({}(\"{}\", {}), \"{}\");\n",
            self.options.evaluator,
            escape(&case.input),
            self.options.env_passing.argument(),
            escape(case.expected.text())
        ));
    }

    // Two blocks may share a label; the second becomes `name_2`, and so on.
    fn unique_name(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut suffix = 2;
        while self.used_names.contains(&candidate) {
            candidate = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        self.used_names.insert(candidate.clone());
        candidate
    }
}

pub fn emit_tests(blocks: &[TestBlock], options: &EmitOptions) -> String {
    Emitter::new(options).emit(blocks)
}

/// Renders `text` as the inside of a Rust string literal.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c.is_control() => escaped.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Inverse of [`escape`].
pub fn unescape(literal: &str) -> Result<String, GenError> {
    let mut text = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => text.push('"'),
            Some('\\') => text.push('\\'),
            Some('n') => text.push('\n'),
            Some('r') => text.push('\r'),
            Some('t') => text.push('\t'),
            Some('0') => text.push('\0'),
            Some('u') => text.push(unescape_unicode(&mut chars)?),
            Some(other) => {
                return Err(malformed(&format!("unknown escape '\\{}'", other)));
            }
            None => return Err(malformed("trailing backslash")),
        }
    }
    Ok(text)
}

fn unescape_unicode(chars: &mut std::str::Chars<'_>) -> Result<char, GenError> {
    if chars.next() != Some('{') {
        return Err(malformed("expected '{' after '\\u'"));
    }
    let mut hex = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            _ => return Err(malformed("unterminated unicode escape")),
        }
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| malformed(&format!("invalid unicode escape '\\u{{{}}}'", hex)))
}

fn malformed(message: &str) -> GenError {
    GenError::new(GenErrorKind::MalformedLiteral, message)
}
