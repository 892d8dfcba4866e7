use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    TinyLexer::lex(s)
}

fn is_tiny_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_tiny_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_tiny_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        loop {
            self.chars().next();
            len += 1;
            if let Some(pk) = self.chars().peek() {
                if is_tiny_whitespace(*pk) {
                    continue;
                }
            }
            return Some(Token::Whitespace(len));
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut decimal = false;
        while let Some(&pk) = self.chars().peek() {
            if is_tiny_digit(pk) || (!decimal && pk == '.') {
                if pk == '.' {
                    decimal = true;
                }
                s.push(pk);
                self.chars().next();
                continue;
            }
            break;
        }
        if decimal {
            Some(Token::Literal(Literal::Real(s)))
        } else {
            Some(Token::Literal(Literal::Integer(s)))
        }
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars().next();
        loop {
            match self.chars().next() {
                Some('"') => return Some(Token::Literal(Literal::String(s))),
                Some(ch) => s.push(ch),
                None => return Some(Token::Unknown(format!("\"{}", s))),
            }
        }
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(&pk) = self.chars().peek() {
            if is_tiny_alphabetic(pk) || is_tiny_digit(pk) {
                s.push(pk.to_ascii_lowercase());
                self.chars().next();
                continue;
            }
            break;
        }
        match Token::from_string(&s) {
            Some(token @ Token::Word(_)) => Some(token),
            _ => Some(Token::Ident(s)),
        }
    }

    fn minutia(&mut self) -> Option<Token> {
        let mut s = String::new();
        let ch = self.chars().next()?;
        s.push(ch);
        if ch == '=' || ch == '!' {
            if let Some('=') = self.chars().peek() {
                s.push('=');
                self.chars().next();
            }
        }
        match Token::from_string(&s) {
            Some(t) => Some(t),
            None => Some(Token::Unknown(s)),
        }
    }
}

struct TinyLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for TinyLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for TinyLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = self.chars.peek()?;
        if is_tiny_whitespace(*pk) {
            return self.whitespace();
        }
        if is_tiny_digit(*pk) {
            return self.number();
        }
        if is_tiny_alphabetic(*pk) {
            return self.alphabetic();
        }
        if *pk == '"' {
            return self.string();
        }
        self.minutia()
    }
}

impl<'a> TinyLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = TinyLexer {
            chars: s.chars().peekable(),
        }
        .collect();
        TinyLexer::trim_end(&mut tokens);
        tokens
    }

    fn trim_end(tokens: &mut Vec<Token>) {
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
    }
}
