/// Represents the single lexical failure mode: an unmatched character.
///
/// Carries the 1-based source line, the 0-based column, the offending
/// character and the full text of the line, so the diagnostic can point at
/// the exact spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// The character no token category matched.
    pub character: char,
    /// The 1-based source line of the character.
    pub line:      usize,
    /// The 0-based column of the character within its line.
    pub column:    usize,
    /// The full text of the offending line.
    pub line_text: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f,
                 "Lexer Error: Unexpected character \"{}\" at line {}, column {}.",
                 self.character, self.line, self.column)?;
        writeln!(f, "    {}", self.line_text)?;
        write!(f, "    {}^-- This should not be here.", " ".repeat(self.column))
    }
}

impl std::error::Error for LexError {}
