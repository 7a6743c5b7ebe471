//! Scans a formula expression (the text after the leading `=`) into tokens.

use std::iter::Peekable;
use std::str::Chars;

use crate::position::{parse_a1, Position};
use crate::token::Token;

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.input.next() {
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Star,
            Some('/') => Token::Slash,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch),
            Some(ch) if ch.is_ascii_alphabetic() => self.read_cell_ref(ch),
            None => Token::Eof,
            Some(ch) => Token::Illegal(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn read_number(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        let mut has_dot = first == '.';
        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.input.next();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                text.push(ch);
                self.input.next();
            } else {
                break;
            }
        }
        match text.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Illegal(first),
        }
    }

    fn read_cell_ref(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_alphanumeric() {
                text.push(ch);
                self.input.next();
            } else {
                break;
            }
        }
        match parse_a1(&text) {
            Some(pos) => Token::CellRef(pos),
            // An out-of-range row/col overflow or malformed reference still
            // reads as a cell reference token so the parser can surface it as
            // an invalid-position error rather than a generic syntax error.
            None => Token::CellRef(Position::new(usize::MAX, usize::MAX)),
        }
    }
}
