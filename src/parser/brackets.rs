use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BracketError {
    #[error("unexpected bracket '{got}', expected - '{expected}'")]
    Unexpected { got: String, expected: char },

    #[error("bracket '{closer}' does not match '{opener}'")]
    Mismatched { opener: char, closer: char },

    #[error("bracket '{0}' closes nothing")]
    NothingToClose(char),

    #[error("some brackets weren't closed: {0:?}")]
    Unclosed(Vec<char>),
}

/// Stack of currently open `{` and `(` brackets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketTracker {
    stack: Vec<char>,
}

fn opener_of(closer: char) -> Option<char> {
    match closer {
        '}' => Some('{'),
        ')' => Some('('),
        _ => None,
    }
}

impl BracketTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that `lexeme` is the `expected` bracket, then opens or closes it.
    pub fn control(&mut self, lexeme: &str, expected: char) -> Result<(), BracketError> {
        let mut chars = lexeme.chars();
        let bracket = match (chars.next(), chars.next()) {
            (Some(c), None) if c == expected => c,
            _ => {
                return Err(BracketError::Unexpected {
                    got: lexeme.to_string(),
                    expected,
                })
            }
        };

        match bracket {
            '{' | '(' => {
                self.stack.push(bracket);
                Ok(())
            }
            closer => {
                let want = opener_of(closer).ok_or(BracketError::Unexpected {
                    got: lexeme.to_string(),
                    expected,
                })?;
                match self.stack.pop() {
                    Some(opener) if opener == want => Ok(()),
                    Some(opener) => Err(BracketError::Mismatched { opener, closer }),
                    None => Err(BracketError::NothingToClose(closer)),
                }
            }
        }
    }

    pub fn check_fully_closed(&self) -> Result<(), BracketError> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(BracketError::Unclosed(self.stack.clone()))
        }
    }
}
