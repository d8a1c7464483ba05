//! Lexer (tokenizer) for search queries.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::SearchError;

/// Error encountered during lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    /// What went wrong.
    pub kind: LexerErrorKind,
    /// The byte position (0-indexed) of the offending token.
    pub position: usize,
}

/// Kinds of lexer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    /// A `"` was opened and never closed.
    UnterminatedQuote,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexerErrorKind::UnterminatedQuote => write!(
                f,
                "Invalid search query: unterminated quoted string starting at position {}",
                self.position
            ),
        }
    }
}

impl std::error::Error for LexerError {}

impl From<LexerError> for SearchError {
    fn from(error: LexerError) -> Self {
        SearchError::invalid_query(error.to_string())
    }
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: QueryToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// A free-text word or quoted phrase.
    Text {
        value: String,
        /// Whether the text was written in double quotes.
        quoted: bool,
    },

    /// A `key:value` term, optionally negated with a leading `!`.
    Filter {
        negated: bool,
        key: String,
        value: String,
        /// Whether the value was written in double quotes.
        quoted: bool,
    },
}

impl QueryToken {
    /// Creates an unquoted free-text token.
    pub fn text(value: impl Into<String>) -> Self {
        QueryToken::Text {
            value: value.into(),
            quoted: false,
        }
    }

    /// Creates an unquoted, non-negated filter token.
    pub fn filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        QueryToken::Filter {
            negated: false,
            key: key.into(),
            value: value.into(),
            quoted: false,
        }
    }
}

/// Returns true for characters allowed in a filter key.
fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '[' | ']')
}

/// Lexer for tokenizing search queries.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads characters while the predicate holds.
    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(&c) = self.peek() {
            if !predicate(c) {
                break;
            }
            out.push(c);
            self.next_char();
        }
        out
    }

    /// Reads a double-quoted string. `\"` and `\\` are escapes.
    fn read_quoted_string(&mut self) -> Result<String, LexerError> {
        let start = self.position;
        // Consume the opening quote
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            match c {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some(escaped) => result.push(escaped),
                    None => break,
                },
                _ => result.push(c),
            }
        }

        Err(LexerError {
            kind: LexerErrorKind::UnterminatedQuote,
            position: start,
        })
    }

    /// Returns the next token with its position, or None at end of input.
    pub fn next_token(&mut self) -> Result<Option<PositionedToken>, LexerError> {
        self.skip_whitespace();

        let Some(&c) = self.peek() else {
            return Ok(None);
        };
        let token_start = self.position;

        if c == '"' {
            let value = self.read_quoted_string()?;
            return Ok(Some(PositionedToken {
                token: QueryToken::Text {
                    value,
                    quoted: true,
                },
                position: token_start,
            }));
        }

        let negated = c == '!';
        if negated {
            self.next_char();

            // `!"phrase"` is free text; the `!` stays part of it.
            if self.peek() == Some(&'"') {
                let value = self.read_quoted_string()?;
                return Ok(Some(PositionedToken {
                    token: QueryToken::Text {
                        value: format!("!{}", value),
                        quoted: true,
                    },
                    position: token_start,
                }));
            }
        }
        let key = self.read_while(is_key_char);

        if !key.is_empty() && self.peek() == Some(&':') {
            self.next_char(); // consume ':'

            if self.peek() == Some(&'"') {
                let value = self.read_quoted_string()?;
                return Ok(Some(PositionedToken {
                    token: QueryToken::Filter {
                        negated,
                        key,
                        value,
                        quoted: true,
                    },
                    position: token_start,
                }));
            }

            let value = self.read_while(|c| !c.is_whitespace());
            if !value.is_empty() {
                return Ok(Some(PositionedToken {
                    token: QueryToken::Filter {
                        negated,
                        key,
                        value,
                        quoted: false,
                    },
                    position: token_start,
                }));
            }

            // `key:` with nothing after it is plain text
            let prefix = if negated { "!" } else { "" };
            return Ok(Some(PositionedToken {
                token: QueryToken::text(format!("{}{}:", prefix, key)),
                position: token_start,
            }));
        }

        let rest = self.read_while(|c| !c.is_whitespace());
        let mut word = String::with_capacity(key.len() + rest.len() + 1);
        if negated {
            word.push('!');
        }
        word.push_str(&key);
        word.push_str(&rest);

        Ok(Some(PositionedToken {
            token: QueryToken::text(word),
            position: token_start,
        }))
    }

    /// Collects all tokens, failing on the first structural error.
    pub fn tokenize(mut self) -> Result<Vec<PositionedToken>, LexerError> {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token()? {
            tokens.push(positioned_token);
        }
        Ok(tokens)
    }
}

/// Tokenizes a query string.
///
/// Never fails on text that merely lacks a recognizable key; such text
/// becomes free-text tokens. Fails only on unterminated quotes.
pub fn tokenize(query: &str) -> Result<Vec<PositionedToken>, LexerError> {
    Lexer::new(query).tokenize()
}
