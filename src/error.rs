use std::fmt::Formatter;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GenErrorKind {
    FileAccess,
    MalformedLiteral,
}

#[derive(Debug, PartialEq)]
pub struct GenError {
    pub kind: GenErrorKind,
    pub message: String,
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GenError {}

impl GenError {
    pub fn new(kind: GenErrorKind, message: &str) -> GenError {
        GenError {
            kind,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_kind() {
        let err = GenError::new(GenErrorKind::FileAccess, "could not read 'step2.mal'");
        assert_eq!(err.to_string(), "FileAccess: could not read 'step2.mal'");
    }
}
