use atoi::FromRadix10Checked;
use log::debug;

use super::{
    DecodeError, DecodeOptions, TrailingInput,
    tokenizer::{Bracket, Token, Tokenizer},
};

// Grammar, evaluated while it is recognized:
//
//   Expr    ::= Number '[' Expr ']' Tail | Letters
//   Tail    ::= Letters | Number '[' Expr ']' Tail | ε
//   Number  ::= digit+
//   Letters ::= letter*

/// Decodes `input` with the default [`DecodeOptions`].
///
/// ```text
/// 3[a]          ->  aaa
/// 3[abc]4[ab]c  ->  abcabcabcababababc
/// ```
pub fn decompress(input: &str) -> Result<String, DecodeError> {
    decompress_with(input, &DecodeOptions::default())
}

pub fn decompress_with(input: &str, options: &DecodeOptions) -> Result<String, DecodeError> {
    debug!("decompressing {} bytes", input.len());
    let out = Parser::new(input, *options)?.decompress()?;
    debug!("decompressed {} bytes into {} bytes", input.len(), out.len());
    Ok(out)
}

/// Recursive-descent parser with one token of lookahead.
///
/// There is no syntax tree: every repeat group is expanded as soon as its
/// closing bracket is matched.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    lookahead: Token<'a>,
    // where the lookahead starts in the input
    lookahead_pos: usize,
    depth: usize,
    options: DecodeOptions,
}

impl<'a> Parser<'a> {
    /// Primes the lookahead, so a bad first character fails here.
    pub fn new(src: &'a str, options: DecodeOptions) -> Result<Parser<'a>, DecodeError> {
        let mut tokenizer = Tokenizer::new(src);
        let lookahead = tokenizer.next_token()?;

        Ok(Parser {
            tokenizer,
            lookahead,
            lookahead_pos: 0,
            depth: 0,
            options,
        })
    }

    pub fn decompress(mut self) -> Result<String, DecodeError> {
        let out = self.expression()?;

        if self.options.trailing == TrailingInput::Reject && self.lookahead != Token::EndOfInput {
            return Err(self.syntax_error("expected end of input"));
        }
        Ok(out)
    }

    fn expression(&mut self) -> Result<String, DecodeError> {
        match self.lookahead {
            Token::Number(_) => self.groups(),
            Token::Letters(letters) => {
                self.advance()?;
                let mut out = String::new();
                self.push_checked(&mut out, letters)?;
                Ok(out)
            }
            // empty Letters: the enclosing group (or the caller) deals with it
            Token::Bracket(Bracket::Close) | Token::EndOfInput => Ok(String::new()),
            Token::Bracket(Bracket::Open) => Err(self.syntax_error("expected letter or number")),
        }
    }

    /// A repeat group followed by its tail. Sibling groups in the tail are
    /// expanded in a loop so the stack only grows with bracket nesting.
    fn groups(&mut self) -> Result<String, DecodeError> {
        let mut out = self.repeat_group()?;

        loop {
            match self.lookahead {
                Token::Number(_) => {
                    let next = self.repeat_group()?;
                    self.push_checked(&mut out, &next)?;
                }
                Token::Letters(letters) => {
                    self.advance()?;
                    self.push_checked(&mut out, letters)?;
                    return Ok(out);
                }
                // a closing bracket belongs to whoever opened it
                Token::EndOfInput | Token::Bracket(Bracket::Close) => return Ok(out),
                Token::Bracket(Bracket::Open) => {
                    return Err(self.syntax_error("unexpected token after group"));
                }
            }
        }
    }

    /// `Number '[' Expr ']'`, already expanded.
    fn repeat_group(&mut self) -> Result<String, DecodeError> {
        let group_pos = self.lookahead_pos;
        let n = self.repeat_count()?;
        self.advance()?;

        self.expect(Bracket::Open, "expected '['")?;

        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(DecodeError::DepthLimitExceeded {
                    limit,
                    pos: group_pos,
                });
            }
        }
        self.depth += 1;
        let inner = self.expression()?;
        self.depth -= 1;

        self.expect(Bracket::Close, "expected ']'")?;

        self.repeat(&inner, n)
    }

    fn repeat_count(&self) -> Result<usize, DecodeError> {
        let digits = self.lookahead.value();
        let (maybe_n, used) = usize::from_radix_10_checked(digits.as_bytes());

        match maybe_n {
            Some(n) if used == digits.len() => Ok(n),
            _ => Err(DecodeError::NumberParse {
                pos: self.lookahead_pos,
                value: digits.to_owned(),
            }),
        }
    }

    fn repeat(&self, inner: &str, n: usize) -> Result<String, DecodeError> {
        let mut out = String::new();
        if inner.is_empty() || n == 0 {
            return Ok(out);
        }

        let len = inner.len().checked_mul(n).ok_or_else(|| self.too_large())?;
        self.reserve(&mut out, len)?;
        for _ in 0..n {
            out.push_str(inner);
        }
        Ok(out)
    }

    /// Appends `s` to `out`, keeping the result under `max_output_len`.
    fn push_checked(&self, out: &mut String, s: &str) -> Result<(), DecodeError> {
        let len = out.len().checked_add(s.len()).ok_or_else(|| self.too_large())?;
        self.reserve(out, len)?;
        out.push_str(s);
        Ok(())
    }

    /// Grows `out` to hold `len` bytes without panicking or aborting when
    /// the allocator says no.
    fn reserve(&self, out: &mut String, len: usize) -> Result<(), DecodeError> {
        if let Some(limit) = self.options.max_output_len {
            if len > limit {
                return Err(DecodeError::OutputTooLarge { limit });
            }
        }
        out.try_reserve(len - out.len()).map_err(|_| self.too_large())
    }

    fn too_large(&self) -> DecodeError {
        DecodeError::OutputTooLarge {
            limit: self.options.max_output_len.unwrap_or(isize::MAX as usize),
        }
    }

    fn expect(&mut self, bracket: Bracket, expected: &'static str) -> Result<(), DecodeError> {
        if self.lookahead != Token::Bracket(bracket) {
            return Err(self.syntax_error(expected));
        }
        self.advance()
    }

    fn advance(&mut self) -> Result<(), DecodeError> {
        self.lookahead_pos = self.tokenizer.pos();
        self.lookahead = self.tokenizer.next_token()?;
        Ok(())
    }

    fn syntax_error(&self, expected: &'static str) -> DecodeError {
        DecodeError::Syntax {
            pos: self.lookahead_pos,
            expected,
            found: self.lookahead.to_string(),
        }
    }
}
