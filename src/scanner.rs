#[derive(PartialEq, Debug, Clone, Copy)]
pub enum LineKind {
    // Ignored:
    Blank,
    PureComment,
    GenericComment,
    PromptEcho,
    // Carrying a payload:
    Label,
    ExpectedOutput,
    ExpectedError,
    Content,
    // EOF:
    Eof,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Line<'a> {
    pub kind: LineKind,
    /// Label text, the remainder after an output/error marker, or the raw line for content.
    pub lexeme: &'a str,
    pub raw: &'a str,
    pub line: usize,
}

pub struct Scanner<'a> {
    lines: Vec<&'a str>,
    current_pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            // `lines` also strips the '\r' of CRLF endings
            lines: source.lines().collect(),
            current_pos: 0,
        }
    }

    pub fn scan_line(&mut self) -> Line<'a> {
        if self.is_at_end() {
            return Line {
                kind: LineKind::Eof,
                lexeme: "",
                raw: "",
                line: self.current_pos + 1,
            };
        }

        let raw = self.advance();
        let (kind, lexeme) = classify(raw);
        Line {
            kind,
            lexeme,
            raw,
            line: self.current_pos,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current_pos >= self.lines.len()
    }

    fn advance(&mut self) -> &'a str {
        let raw = self.lines[self.current_pos];
        self.current_pos += 1;
        raw
    }
}

/// Classifies one physical line. Order matters: `;;;` must win over `;; `,
/// and a `;;` that doesn't introduce a label is a plain comment.
pub fn classify(raw: &str) -> (LineKind, &str) {
    let text = raw.trim();

    if text.is_empty() {
        return (LineKind::Blank, "");
    }
    if text.starts_with(";;;") {
        return (LineKind::PureComment, "");
    }
    if let Some(rest) = text.strip_prefix(";; ") {
        let label = rest.trim();
        if !label.is_empty() {
            return (LineKind::Label, label);
        }
    }
    if text.starts_with(";;") {
        return (LineKind::GenericComment, "");
    }
    if text.starts_with(";>>>") {
        return (LineKind::PromptEcho, "");
    }
    if let Some(rest) = text.strip_prefix(";=>") {
        return (LineKind::ExpectedOutput, rest);
    }
    if let Some(rest) = text.strip_prefix(";/") {
        return (LineKind::ExpectedError, rest);
    }

    (LineKind::Content, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_markers() {
        assert_eq!(classify(""), (LineKind::Blank, ""));
        assert_eq!(classify("  \t "), (LineKind::Blank, ""));
        assert_eq!(classify(";;; just a note"), (LineKind::PureComment, ""));
        assert_eq!(
            classify(";; Testing evaluation"),
            (LineKind::Label, "Testing evaluation")
        );
        assert_eq!(classify(";;"), (LineKind::GenericComment, ""));
        assert_eq!(classify(";;   "), (LineKind::GenericComment, ""));
        assert_eq!(classify(";;no space"), (LineKind::GenericComment, ""));
        assert_eq!(classify(";>>> deferrable=True"), (LineKind::PromptEcho, ""));
        assert_eq!(classify(";=>3"), (LineKind::ExpectedOutput, "3"));
        assert_eq!(classify(";=>"), (LineKind::ExpectedOutput, ""));
        assert_eq!(
            classify(";/division by zero"),
            (LineKind::ExpectedError, "division by zero")
        );
        assert_eq!(classify("(+ 1 2)"), (LineKind::Content, "(+ 1 2)"));
    }

    #[test]
    fn triple_semicolon_beats_label() {
        assert_eq!(classify(";;; Not a label"), (LineKind::PureComment, ""));
    }

    #[test]
    fn markers_are_recognized_after_indentation() {
        assert_eq!(classify("   ;=>nil"), (LineKind::ExpectedOutput, "nil"));
        assert_eq!(classify("\t;; Indented label"), (LineKind::Label, "Indented label"));
    }

    #[test]
    fn content_keeps_raw_text() {
        assert_eq!(classify("   2)  "), (LineKind::Content, "   2)  "));
    }

    #[test]
    fn scan() {
        let mut scanner = Scanner::new(";; Basic\r\n(+ 1 2)\r\n;=>3\r\n");
        let mut lines = Vec::new();
        loop {
            let line = scanner.scan_line();
            if line.kind == LineKind::Eof {
                assert_eq!(line.line, 4);
                break;
            }
            lines.push(line);
        }

        assert_eq!(
            lines,
            vec![
                Line {
                    kind: LineKind::Label,
                    lexeme: "Basic",
                    raw: ";; Basic",
                    line: 1
                },
                Line {
                    kind: LineKind::Content,
                    lexeme: "(+ 1 2)",
                    raw: "(+ 1 2)",
                    line: 2
                },
                Line {
                    kind: LineKind::ExpectedOutput,
                    lexeme: "3",
                    raw: ";=>3",
                    line: 3
                },
            ]
        );
    }
}
