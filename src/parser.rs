use std::fmt::Formatter;
use std::path::Path;

use crate::error::{GenError, GenErrorKind};
use crate::scanner::{Line, LineKind, Scanner};
use crate::transcript::{Expectation, TestBlock, TestCase, Transcript};

#[derive(Debug, PartialEq, Clone)]
pub enum DiagnosticKind {
    /// A `;/` case; recorded normally, reported to the user.
    ExpectedError { message: String },
    /// A `;=>` or `;/` line with no input before it. The line is skipped.
    OrphanMarker { text: String },
    /// Input still open at a blank line or at end of file. The case is dropped.
    DanglingInput { input: String },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Only expected-error notices are shown by default; the rest are leniencies.
    pub fn is_notice(&self) -> bool {
        matches!(self.kind, DiagnosticKind::ExpectedError { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] ", self.line)?;
        match &self.kind {
            DiagnosticKind::ExpectedError { message } => {
                write!(f, "expected error: {}", message)
            }
            DiagnosticKind::OrphanMarker { text } => {
                write!(f, "marker without input ignored: {}", text)
            }
            DiagnosticKind::DanglingInput { input } => {
                write!(f, "input without expected output dropped: {}", input)
            }
        }
    }
}

enum State<'a> {
    AwaitingInput,
    AccumulatingInput {
        first_line: usize,
        lines: Vec<&'a str>,
    },
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    state: State<'a>,
    pending: TestBlock,
    blocks: Vec<TestBlock>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Parser<'a> {
        Parser {
            scanner: Scanner::new(source),
            state: State::AwaitingInput,
            pending: TestBlock::new(),
            blocks: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Transcript {
        loop {
            let line = self.scanner.scan_line();
            if line.kind == LineKind::Eof {
                self.end();
                break;
            }
            self.state = match std::mem::replace(&mut self.state, State::AwaitingInput) {
                State::AwaitingInput => self.awaiting_input(line),
                State::AccumulatingInput { first_line, lines } => {
                    self.accumulating_input(line, first_line, lines)
                }
            };
        }

        Transcript {
            blocks: self.blocks,
            diagnostics: self.diagnostics,
        }
    }

    fn awaiting_input(&mut self, line: Line<'a>) -> State<'a> {
        match line.kind {
            LineKind::Blank => self.seal_block(),
            LineKind::Label => self.pending.set_label(line.lexeme),
            LineKind::PureComment | LineKind::GenericComment | LineKind::PromptEcho => {}
            LineKind::ExpectedOutput | LineKind::ExpectedError => {
                self.diagnostics.push(Diagnostic {
                    line: line.line,
                    kind: DiagnosticKind::OrphanMarker {
                        text: line.raw.trim().to_string(),
                    },
                });
            }
            LineKind::Content => {
                return State::AccumulatingInput {
                    first_line: line.line,
                    lines: vec![line.raw],
                };
            }
            LineKind::Eof => {}
        }
        State::AwaitingInput
    }

    fn accumulating_input(
        &mut self,
        line: Line<'a>,
        first_line: usize,
        mut lines: Vec<&'a str>,
    ) -> State<'a> {
        let expected = match line.kind {
            LineKind::ExpectedOutput => Expectation::Output(line.lexeme.to_string()),
            LineKind::ExpectedError => {
                self.diagnostics.push(Diagnostic {
                    line: line.line,
                    kind: DiagnosticKind::ExpectedError {
                        message: line.lexeme.to_string(),
                    },
                });
                Expectation::Error(line.lexeme.to_string())
            }
            // A blank line ends the block even mid-input.
            LineKind::Blank => {
                self.drop_input(first_line, &lines);
                self.seal_block();
                return State::AwaitingInput;
            }
            // Anything else up to the next marker belongs to this input, verbatim.
            _ => {
                lines.push(line.raw);
                return State::AccumulatingInput { first_line, lines };
            }
        };

        self.pending.cases.push(TestCase {
            input: join_input(&lines),
            expected,
            line: first_line,
        });
        State::AwaitingInput
    }

    fn end(&mut self) {
        if let State::AccumulatingInput { first_line, lines } =
            std::mem::replace(&mut self.state, State::AwaitingInput)
        {
            self.drop_input(first_line, &lines);
        }
        self.seal_block();
    }

    fn drop_input(&mut self, first_line: usize, lines: &[&str]) {
        self.diagnostics.push(Diagnostic {
            line: first_line,
            kind: DiagnosticKind::DanglingInput {
                input: join_input(lines),
            },
        });
    }

    fn seal_block(&mut self) {
        let block = std::mem::take(&mut self.pending);
        if !block.is_empty() {
            self.blocks.push(block);
        }
    }
}

fn join_input(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

pub fn parse_transcript(source: &str) -> Transcript {
    Parser::new(source).parse()
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Transcript, GenError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| {
        GenError::new(
            GenErrorKind::FileAccess,
            &format!("could not read '{}': {}", path.display(), e),
        )
    })?;
    Ok(parse_transcript(&source))
}
