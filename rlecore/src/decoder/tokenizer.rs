use std::fmt::Display;

use log::trace;
use strum_macros::Display;

use super::DecodeError;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Bracket {
    Open,
    Close,
}

impl Bracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "[",
            Self::Close => "]",
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Token<'a> {
    Number(&'a str),
    Letters(&'a str),
    Bracket(Bracket),
    EndOfInput,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Display)]
pub enum TokenKind {
    #[strum(to_string = "number")]
    Number,
    #[strum(to_string = "letter")]
    Letter,
    #[strum(to_string = "bracket")]
    Bracket,
    #[strum(to_string = "end of input")]
    EndOfInput,
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> TokenKind {
        self.into()
    }

    /// The literal text this token was cut from, empty for `EndOfInput`.
    pub fn value(&self) -> &'a str {
        match *self {
            Self::Number(v) | Self::Letters(v) => v,
            Self::Bracket(b) => b.as_str(),
            Self::EndOfInput => "",
        }
    }
}

impl<'a> From<&Token<'a>> for TokenKind {
    fn from(value: &Token<'a>) -> Self {
        match value {
            Token::Number(_) => TokenKind::Number,
            Token::Letters(_) => TokenKind::Letter,
            Token::Bracket(_) => TokenKind::Bracket,
            Token::EndOfInput => TokenKind::EndOfInput,
        }
    }
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::EndOfInput => write!(f, "end of input"),
            _ => write!(f, "{} `{}`", self.kind(), self.value()),
        }
    }
}

/// Pull-based tokenizer over a compressed string.
///
/// Every call to [`Tokenizer::next_token`] cuts the longest run of one
/// character class off the front of the remaining input. Once the input is
/// exhausted it keeps handing out `EndOfInput`.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Tokenizer<'a> {
        Tokenizer { src, pos: 0 }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, DecodeError> {
        let token = match self.rest().chars().next() {
            None => Token::EndOfInput,
            Some('0'..='9') => Token::Number(self.take_while(u8::is_ascii_digit)),
            Some(c) if c.is_ascii_alphabetic() => {
                Token::Letters(self.take_while(u8::is_ascii_alphabetic))
            }
            Some('[') => {
                self.pos += 1;
                Token::Bracket(Bracket::Open)
            }
            Some(']') => {
                self.pos += 1;
                Token::Bracket(Bracket::Close)
            }
            Some(ch) => return Err(DecodeError::Tokenize { pos: self.pos, ch }),
        };

        trace!("token {} ending at index {}", token, self.pos);
        Ok(token)
    }

    /// Byte offset of the cursor into the original input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.src.len()
    }

    fn take_while(&mut self, class: fn(&u8) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.bytes().position(|b| !class(&b)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

#[cfg(test)]
mod test_tokenizer {
    use rand::Rng;

    use super::*;

    #[test]
    fn single_number_token() {
        let mut tok = Tokenizer::new("123");

        assert_eq!(tok.next_token().unwrap(), Token::Number("123"));
        assert_eq!(tok.pos(), 3);
        assert!(tok.is_exhausted());
    }

    #[test]
    fn single_letters_token() {
        let mut tok = Tokenizer::new("abc");

        assert_eq!(tok.next_token().unwrap(), Token::Letters("abc"));
        assert_eq!(tok.rest(), "");
    }

    #[test]
    fn number_then_letters() {
        let mut tok = Tokenizer::new("456abc");

        assert_eq!(tok.next_token().unwrap(), Token::Number("456"));
        assert_eq!(tok.rest(), "abc");

        assert_eq!(tok.next_token().unwrap(), Token::Letters("abc"));
        assert_eq!(tok.rest(), "");
    }

    #[test]
    fn letters_then_number() {
        let mut tok = Tokenizer::new("abc123");

        assert_eq!(tok.next_token().unwrap(), Token::Letters("abc"));
        assert_eq!(tok.rest(), "123");
    }

    #[test]
    fn brackets_are_single_chars() {
        let mut tok = Tokenizer::new("[]");

        assert_eq!(tok.next_token().unwrap(), Token::Bracket(Bracket::Open));
        assert_eq!(tok.rest(), "]");

        assert_eq!(tok.next_token().unwrap(), Token::Bracket(Bracket::Close));
        assert!(tok.is_exhausted());
    }

    #[test]
    fn open_bracket_before_letters() {
        let mut tok = Tokenizer::new("[abc]");

        assert_eq!(tok.next_token().unwrap(), Token::Bracket(Bracket::Open));
        assert_eq!(tok.rest(), "abc]");
    }

    #[test]
    fn mixed_case_letters_form_one_run() {
        let mut tok = Tokenizer::new("aBcD2");

        assert_eq!(tok.next_token().unwrap(), Token::Letters("aBcD"));
    }

    #[test]
    fn empty_input_is_end_of_input() {
        let mut tok = Tokenizer::new("");

        assert_eq!(tok.next_token().unwrap(), Token::EndOfInput);
    }

    #[test]
    fn end_of_input_is_idempotent() {
        let mut tok = Tokenizer::new("a");
        tok.next_token().unwrap();

        for _ in 0..5 {
            assert_eq!(tok.next_token().unwrap(), Token::EndOfInput);
            assert_eq!(tok.pos(), 1);
        }
    }

    #[test]
    fn error_unknown_char_does_not_advance() {
        let mut tok = Tokenizer::new("ab#c");
        tok.next_token().unwrap();

        assert!(matches!(
            tok.next_token().unwrap_err(),
            DecodeError::Tokenize { pos: 2, ch: '#' }
        ));
        assert_eq!(tok.pos(), 2);

        // still failing on the same char
        assert!(tok.next_token().is_err());
        assert_eq!(tok.rest(), "#c");
    }

    #[test]
    fn error_reports_whole_multibyte_char() {
        let mut tok = Tokenizer::new("é");

        assert_eq!(
            tok.next_token().unwrap_err(),
            DecodeError::Tokenize { pos: 0, ch: 'é' }
        );
    }

    #[test]
    fn whitespace_is_not_a_token() {
        let mut tok = Tokenizer::new(" 3[a]");

        assert!(matches!(
            tok.next_token().unwrap_err(),
            DecodeError::Tokenize { pos: 0, ch: ' ' }
        ));
    }

    #[test]
    fn token_kinds_and_values() {
        assert_eq!(Token::Number("12").kind(), TokenKind::Number);
        assert_eq!(Token::Letters("ab").kind(), TokenKind::Letter);
        assert_eq!(Token::Bracket(Bracket::Close).kind(), TokenKind::Bracket);
        assert_eq!(Token::EndOfInput.kind(), TokenKind::EndOfInput);

        assert_eq!(Token::Bracket(Bracket::Open).value(), "[");
        assert_eq!(Token::EndOfInput.value(), "");
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::Number("12").to_string(), "number `12`");
        assert_eq!(Token::Bracket(Bracket::Close).to_string(), "bracket `]`");
        assert_eq!(Token::EndOfInput.to_string(), "end of input");
    }

    #[test]
    fn maximal_munch_on_random_runs() {
        let mut rng = rand::rng();

        for _ in 0..200 {
            let digits: String = (0..rng.random_range(1..12))
                .map(|_| rng.random_range(b'0'..=b'9') as char)
                .collect();
            let letters: String = (0..rng.random_range(1..12))
                .map(|_| rng.random_range(b'a'..=b'z') as char)
                .collect();
            let input = format!("{digits}{letters}[");

            let mut tok = Tokenizer::new(&input);
            assert_eq!(tok.next_token().unwrap(), Token::Number(&digits));
            assert_eq!(tok.next_token().unwrap(), Token::Letters(&letters));
            assert_eq!(tok.next_token().unwrap(), Token::Bracket(Bracket::Open));
            assert_eq!(tok.next_token().unwrap(), Token::EndOfInput);
        }
    }
}
