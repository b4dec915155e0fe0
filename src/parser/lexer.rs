use super::error::{LexError, ParseError};
use super::line::Line;
use super::token::{BinaryOp, CondOp, KeyWord, Paren, Token, UnaryOp};
use core::iter::Peekable;
use core::str::Chars;

/// Number of spaces that make up one level of indentation.
pub const INDENT_WIDTH: usize = 4;

// A token still being built from consecutive characters.
#[derive(Debug)]
enum Pending {
    Int(i64),
    Word(String),
    Cond(CondOp),
}

impl Pending {
    fn ends_operand(&self) -> bool {
        match self {
            Pending::Int(_) => true,
            Pending::Word(word) => KeyWord::from_word(word).is_none(),
            Pending::Cond(_) => false,
        }
    }

    fn finish(self) -> Token {
        match self {
            Pending::Int(i) => Token::Int(i),
            Pending::Cond(op) => Token::CondOp(op),
            Pending::Word(word) => match word.as_str() {
                "True" => Token::Bool(true),
                "False" => Token::Bool(false),
                _ => match KeyWord::from_word(&word) {
                    Some(keyword) => Token::KeyWord(keyword),
                    None => Token::Ident(word),
                },
            },
        }
    }
}

/// Tokenizes a single source line.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    pending: Option<Pending>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            line,
            pending: None,
            tokens: vec![],
        }
    }

    pub fn lex_line(mut self) -> Result<Line, ParseError> {
        let result = self.lex_indent().and_then(|indent| {
            self.lex_body()?;
            Ok(indent)
        });

        match result {
            // a whitespace only line is blank no matter how it is indented
            Ok(_) if self.tokens.is_empty() => Ok(Line::new(self.line, 0, vec![])),
            Ok(indent) => Ok(Line::new(self.line, indent, self.tokens)),
            Err(err) => Err(ParseError::lex(err, self.line)),
        }
    }

    fn lex_indent(&mut self) -> Result<usize, LexError> {
        let mut tabs = 0;
        let mut spaces = 0;

        while let Some(c) = self.chars.peek() {
            match c {
                '\t' => tabs += 1,
                ' ' => spaces += 1,
                _ => break,
            }

            self.chars.next();
        }

        let blank = self.chars.peek().map_or(true, |c| *c == '\r' || *c == '\n');
        if blank {
            return Ok(0);
        }

        if tabs > 0 && spaces > 0 {
            return Err(LexError::InvalidIndentation);
        }

        if spaces % INDENT_WIDTH != 0 {
            return Err(LexError::InvalidIndentation);
        }

        Ok(tabs + spaces / INDENT_WIDTH)
    }

    fn lex_body(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.chars.next() {
            match c {
                ' ' | '\t' | '\r' | '\n' => self.flush(),
                '0'..='9' => self.lex_digit(c)?,
                'a'..='z' | 'A'..='Z' | '_' => self.lex_letter(c),
                '(' => self.emit(Token::Paren(Paren::Open)),
                ')' => self.emit(Token::Paren(Paren::Close)),
                '+' | '-' => self.lex_sign(c),
                '*' => self.emit(Token::BinaryOp(BinaryOp::Mul)),
                '/' => self.emit(Token::BinaryOp(BinaryOp::Div)),
                '%' => self.emit(Token::BinaryOp(BinaryOp::Mod)),
                '^' => self.emit(Token::BinaryOp(BinaryOp::Pow)),
                '=' => self.lex_equal(),
                '<' => self.start(Pending::Cond(CondOp::Lt)),
                '>' => self.start(Pending::Cond(CondOp::Gt)),
                _ => return Err(LexError::InvalidCharacter(c)),
            }
        }

        self.flush();

        Ok(())
    }

    fn lex_digit(&mut self, c: char) -> Result<(), LexError> {
        let digit = i64::from(c as u8 - b'0');

        match &mut self.pending {
            Some(Pending::Int(value)) => {
                *value = value
                    .checked_mul(10)
                    .and_then(|value| value.checked_add(digit))
                    .ok_or(LexError::InvalidNumber)?;
            }
            Some(Pending::Word(word)) => word.push(c),
            _ => self.start(Pending::Int(digit)),
        }

        Ok(())
    }

    fn lex_letter(&mut self, c: char) {
        if let Some(Pending::Word(word)) = &mut self.pending {
            word.push(c);
        } else {
            self.start(Pending::Word(c.to_string()));
        }
    }

    fn lex_sign(&mut self, c: char) {
        let follows_operand = match &self.pending {
            Some(pending) => pending.ends_operand(),
            None => self.tokens.last().map_or(false, Token::ends_operand),
        };

        let token = match (c, follows_operand) {
            ('+', true) => Token::BinaryOp(BinaryOp::Add),
            ('-', true) => Token::BinaryOp(BinaryOp::Sub),
            ('+', false) => Token::UnaryOp(UnaryOp::Plus),
            _ => Token::UnaryOp(UnaryOp::Neg),
        };

        self.emit(token);
    }

    fn lex_equal(&mut self) {
        match self.pending {
            Some(Pending::Cond(CondOp::Lt)) => {
                self.pending = Some(Pending::Cond(CondOp::Lte));
                return;
            }
            Some(Pending::Cond(CondOp::Gt)) => {
                self.pending = Some(Pending::Cond(CondOp::Gte));
                return;
            }
            _ => {}
        }

        if self.read('=') {
            self.emit(Token::CondOp(CondOp::Equal));
        } else {
            self.emit(Token::Assign);
        }
    }

    fn read(&mut self, c: char) -> bool {
        if self.chars.peek() == Some(&c) {
            self.chars.next();
            return true;
        }

        false
    }

    fn start(&mut self, pending: Pending) {
        self.flush();
        self.pending = Some(pending);
    }

    fn emit(&mut self, token: Token) {
        self.flush();
        self.tokens.push(token);
    }

    fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.tokens.push(pending.finish());
        }
    }
}
