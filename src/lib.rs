pub mod emitter;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod transcript;

use std::path::Path;

use emitter::EmitOptions;
use error::GenError;
use transcript::Transcript;

pub struct Generated {
    pub code: String,
    /// Kept for reporting: block titles, case counts and diagnostics.
    pub transcript: Transcript,
}

/// Transcript text in, generated test source out.
pub fn generate(source: &str, options: &EmitOptions) -> Generated {
    let transcript = parser::parse_transcript(source);
    let code = emitter::emit_tests(&transcript.blocks, options);
    Generated { code, transcript }
}

pub fn generate_file<P: AsRef<Path>>(path: P, options: &EmitOptions) -> Result<Generated, GenError> {
    let transcript = parser::parse_file(path)?;
    let code = emitter::emit_tests(&transcript.blocks, options);
    Ok(Generated { code, transcript })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenErrorKind;

    #[test]
    fn one_function_per_sealed_block() {
        let source = "\
;; Testing list functions
(list)
;=>()
(list? (list))
;=>true

;; Nothing

;; Error case
(/ 1 0)
;/division by zero
";
        let generated = generate(source, &EmitOptions::default());
        assert_eq!(generated.code.matches("#[test]").count(), 2);
        assert!(generated.code.contains("fn testing_list_functions() {"));
        assert!(generated.code.contains("fn error_case() {"));
        assert!(!generated.code.contains("fn nothing()"));
        assert!(generated
            .code
            .contains(r#"assert_eq!(mal_rust::rep("(/ 1 0)", &mut env), "division by zero");"#));

        let diagnostics = &generated.transcript.diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), "[line 11] expected error: division by zero");
        assert_eq!(generated.transcript.case_count(), 3);
    }

    #[test]
    fn generate_file_reads_the_transcript() {
        let generated = generate_file("tests/fixtures/arithmetic.mal", &EmitOptions::default()).unwrap();
        let expected = std::fs::read_to_string("tests/fixtures/arithmetic.out").unwrap();
        assert_eq!(generated.code, expected);
        assert_eq!(generated.transcript.blocks.len(), 2);
    }

    #[test]
    fn generate_file_reports_unreadable_paths() {
        let err = generate_file("tests/fixtures/missing.mal", &EmitOptions::default())
            .err()
            .unwrap();
        assert_eq!(err.kind, GenErrorKind::FileAccess);
    }
}
