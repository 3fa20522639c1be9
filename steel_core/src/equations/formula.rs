//! # Plain-Text Formulas
//!
//! The registry's `formula_plain` strings are small arithmetic expressions:
//! numbers, symbols, `+ - * / ^`, parentheses, `sqrt`, `min`, `max` and the
//! constant `pi`. This module substitutes recorded values into them and
//! evaluates them, which is what makes a derivation step re-checkable from
//! its text alone.
//!
//! ```rust
//! use steel_core::equations::formula;
//!
//! let v = formula::evaluate("K * L / r", &[("K", 1.0), ("L", 3000.0), ("r", 22.6)]).unwrap();
//! assert!((v - 132.743).abs() < 1e-3);
//!
//! let s = formula::substitute("K * L / r", &[("K", 1.0), ("L", 3000.0), ("r", 22.6)]);
//! assert_eq!(s, "1 * 3000 / 22.6");
//! ```

use std::f64::consts::PI;
use std::iter::Peekable;
use std::str::Chars;

use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
    Comma,
}

fn tokenize(text: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
            }
            '0'..='9' | '.' => tokens.push(Token::Number(number(&mut chars, text)?)),
            'a'..='z' | 'A'..='Z' | '_' => tokens.push(Token::Ident(ident(&mut chars))),
            '+' | '-' | '*' | '/' | '^' => {
                chars.next();
                tokens.push(Token::Op(c));
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            other => return Err(syntax(text, format!("unexpected character '{}'", other))),
        }
    }
    Ok(tokens)
}

fn number(chars: &mut Peekable<Chars<'_>>, text: &str) -> CalcResult<f64> {
    let mut literal = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
            chars.next();
        } else {
            break;
        }
    }
    literal
        .parse()
        .map_err(|_| syntax(text, format!("bad number '{}'", literal)))
}

fn ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

fn syntax(text: &str, reason: String) -> CalcError {
    CalcError::computation(format!("formula '{}'", text), reason)
}

fn is_reserved(name: &str) -> bool {
    matches!(name, "pi" | "sqrt" | "min" | "max")
}

/// Recursive-descent evaluator over a token stream.
struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    inputs: &'a [(&'a str, f64)],
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> CalcResult<()> {
        match self.next() {
            Some(ref t) if *t == expected => Ok(()),
            other => Err(syntax(self.text, format!("expected {:?}, found {:?}", expected, other))),
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> CalcResult<f64> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> CalcResult<f64> {
        let mut value = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == '*' { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    // unary := '-' unary | power
    fn unary(&mut self) -> CalcResult<f64> {
        if let Some(Token::Op('-')) = self.peek() {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.power()
    }

    // power := primary ('^' unary)?
    fn power(&mut self) -> CalcResult<f64> {
        let base = self.primary()?;
        if let Some(Token::Op('^')) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> CalcResult<f64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => match name.as_str() {
                "pi" => Ok(PI),
                "sqrt" => {
                    let args = self.arguments()?;
                    match args.as_slice() {
                        [x] if *x >= 0.0 => Ok(x.sqrt()),
                        [x] => Err(syntax(self.text, format!("square root of negative value {}", x))),
                        _ => Err(syntax(self.text, "sqrt takes one argument".to_string())),
                    }
                }
                "min" | "max" => {
                    let args = self.arguments()?;
                    let init = if name == "min" { f64::INFINITY } else { f64::NEG_INFINITY };
                    if args.is_empty() {
                        return Err(syntax(self.text, format!("{} needs arguments", name)));
                    }
                    Ok(args.into_iter().fold(init, |acc, x| if name == "min" { acc.min(x) } else { acc.max(x) }))
                }
                symbol => self
                    .inputs
                    .iter()
                    .find(|(s, _)| *s == symbol)
                    .map(|(_, v)| *v)
                    .ok_or_else(|| syntax(self.text, format!("no value for symbol '{}'", symbol))),
            },
            other => Err(syntax(self.text, format!("unexpected token {:?}", other))),
        }
    }

    fn arguments(&mut self) -> CalcResult<Vec<f64>> {
        self.expect(Token::LParen)?;
        let mut args = vec![self.expr()?];
        while let Some(Token::Comma) = self.peek() {
            self.pos += 1;
            args.push(self.expr()?);
        }
        self.expect(Token::RParen)?;
        Ok(args)
    }
}

/// Evaluate `text` with the given symbol bindings.
pub fn evaluate(text: &str, inputs: &[(&str, f64)]) -> CalcResult<f64> {
    let mut parser = Parser {
        text,
        tokens: tokenize(text)?,
        pos: 0,
        inputs,
    };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(syntax(text, "trailing tokens".to_string()));
    }
    Ok(value)
}

/// Symbols referenced by `text`, in first-appearance order.
pub fn identifiers(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() || c == '_' {
            let name = ident(&mut chars);
            if !is_reserved(&name) && !seen.contains(&name) {
                seen.push(name);
            }
        } else if c.is_ascii_digit() {
            // skip whole numeric literals so "10^6" never yields a symbol
            while matches!(chars.peek(), Some(d) if d.is_ascii_digit() || *d == '.') {
                chars.next();
            }
        } else {
            chars.next();
        }
    }
    seen
}

/// Replace every bound symbol in `text` by its value.
///
/// Replacement is whole-word, so `F_y` never clobbers part of `F_ub`.
pub fn substitute(text: &str, inputs: &[(&str, f64)]) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() || c == '_' {
            let name = ident(&mut chars);
            match inputs.iter().find(|(s, _)| *s == name) {
                Some((_, value)) => out.push_str(&format_value(*value)),
                None => out.push_str(&name),
            }
        } else if c.is_ascii_digit() {
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    out.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
        } else {
            out.push(c);
            chars.next();
        }
    }
    out
}

/// Compact numeric rendering for substituted expressions.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e6).contains(&magnitude) {
        return format!("{:.4e}", value);
    }
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if value < 0.0 {
        format!("({})", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("1 + 2 * 3", &[]).unwrap(), 7.0);
        assert_eq!(evaluate("(1 + 2) * 3", &[]).unwrap(), 9.0);
        assert_eq!(evaluate("2 * 3^2", &[]).unwrap(), 18.0);
        assert_eq!(evaluate("-2^2", &[]).unwrap(), -4.0);
        assert_eq!(evaluate("2^3^2", &[]).unwrap(), 512.0);
        assert_eq!(evaluate("8 / 4 / 2", &[]).unwrap(), 1.0);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(evaluate("sqrt(16)", &[]).unwrap(), 4.0);
        assert_eq!(evaluate("min(3, 1, 2)", &[]).unwrap(), 1.0);
        assert_eq!(evaluate("max(3, 1 + 4)", &[]).unwrap(), 5.0);
        assert!((evaluate("pi", &[]).unwrap() - PI).abs() < 1e-15);
    }

    #[test]
    fn test_symbols() {
        let v = evaluate("0.658^(F_y / F_e) * F_y", &[("F_y", 350.0), ("F_e", 350.0)]).unwrap();
        assert!((v - 0.658 * 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_errors() {
        assert!(evaluate("sqrt(-1)", &[]).is_err());
        assert!(evaluate("x + 1", &[]).is_err());
        assert!(evaluate("(1 + 2", &[]).is_err());
        assert!(evaluate("1 + 2)", &[]).is_err());
        assert!(evaluate("1 $ 2", &[]).is_err());
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(identifiers("F_y * Z / 10^6"), vec!["F_y", "Z"]);
        assert_eq!(identifiers("pi^2 * E / lambda^2"), vec!["E", "lambda"]);
        assert_eq!(identifiers("min(M_p, 1.6 * F_y * S_y / 10^6)"), vec!["M_p", "F_y", "S_y"]);
    }

    #[test]
    fn test_substitute_whole_words() {
        let s = substitute("0.6 * phi_b * A_b * F_ub * m", &[("phi_b", 0.8), ("A_b", 314.159), ("F_ub", 800.0), ("m", 1.0)]);
        assert_eq!(s, "0.6 * 0.8 * 314.159 * 800 * 1");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(132.743362), "132.7434");
        assert_eq!(format_value(200000.0), "200000");
        assert_eq!(format_value(6.2e6), "6.2000e6");
        assert_eq!(format_value(-3.5), "(-3.5)");
        assert_eq!(format_value(0.0), "0");
    }
}
