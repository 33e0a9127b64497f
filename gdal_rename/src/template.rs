/*
This file is part of gdal_rename
Copyright (C) 2022 Novel-T

gdal_rename is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
//! A small printf subset used to build file names.
//!
//! Names are described as an ordered list of tokens (literal text, char fields,
//! integer fields, real fields) and rendered by [`Template::render`] against an
//! argument list.  Raw user templates (`--printf-syntax`) are parsed into the
//! same tokens, so both paths go through one substitution engine and arity
//! is checked before anything is written.

use core::fmt;
use thiserror::Error;

use crate::name_format::MAX_NAME_CHARS;

#[derive(Clone, PartialEq, Debug, Error)]
pub enum TemplateError {
    #[error("Dangling '%' at end of template")]
    DanglingPercent,
    #[error("Unsupported conversion '%{0}'")]
    UnsupportedConversion(char),
    #[error("Template has {fields} substitution field(s) but {args} value(s) were given")]
    ArityMismatch { fields: usize, args: usize },
    #[error("Field width or precision {0} is larger than the {max} chars a name can have", max = MAX_NAME_CHARS)]
    FieldTooWide(usize),
    #[error("Field {index} expects {expected} but was given {given}")]
    KindMismatch {
        index: usize,
        expected: &'static str,
        given: &'static str,
    },
}

/// Flags, width and precision of a `%` field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    pub plus: bool,
    pub space: bool,
    pub zero: bool,
    pub left: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
}

impl FieldSpec {
    /// Width and precision can not exceed the name length
    pub fn check(&self) -> Result<(), TemplateError> {
        for n in self.width.iter().chain(self.precision.iter()) {
            if *n > MAX_NAME_CHARS {
                return Err(TemplateError::FieldTooWide(*n));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    Char(FieldSpec),
    Int(FieldSpec),
    Real(FieldSpec),
}

/// A value to substitute into a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    Char(char),
    Int(i64),
    Real(f64),
}

impl Arg {
    fn kind(&self) -> &'static str {
        match self {
            Arg::Char(_) => "a char",
            Arg::Int(_) => "an integer",
            Arg::Real(_) => "a real",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    pub fn new() -> Template {
        Template::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Adjacent literals are merged
    pub fn push_literal(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(Token::Literal(last)) = self.tokens.last_mut() {
            last.push_str(s);
            return;
        }
        self.tokens.push(Token::Literal(s.to_string()));
    }

    pub fn push(&mut self, token: Token) {
        match token {
            Token::Literal(s) => self.push_literal(&s),
            t => self.tokens.push(t),
        }
    }

    pub fn field_count(&self) -> usize {
        self.tokens.iter().filter(|t| !matches!(t, Token::Literal(_))).count()
    }

    /// Parses printf syntax, e.g. `Tiles_%.4d-%.4d_Lambert93` or `%c%07.1f`
    pub fn parse(s: &str) -> Result<Template, TemplateError> {
        let mut template = Template::new();
        let mut literal = String::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            template.push_literal(&literal);
            literal.clear();

            let mut spec = FieldSpec::default();

            while let Some(&f) = chars.peek() {
                match f {
                    '+' => spec.plus = true,
                    ' ' => spec.space = true,
                    '0' => spec.zero = true,
                    '-' => spec.left = true,
                    _ => break,
                }
                chars.next();
            }

            spec.width = read_number(&mut chars);

            if chars.peek() == Some(&'.') {
                chars.next();
                //"%.d" is a precision of 0
                spec.precision = Some(read_number(&mut chars).unwrap_or(0));
            }

            let conversion = chars.next().ok_or(TemplateError::DanglingPercent)?;
            spec.check()?;

            let token = match conversion {
                'd' | 'i' | 'u' => Token::Int(spec),
                'f' | 'F' => Token::Real(spec),
                'c' => Token::Char(spec),
                other => return Err(TemplateError::UnsupportedConversion(other)),
            };
            template.push(token);
        }

        template.push_literal(&literal);

        Ok(template)
    }

    /// Substitutes `args` in field order.  Numeric args are coerced to the field kind,
    /// a real in an integer field is truncated toward zero.
    pub fn render(&self, args: &[Arg]) -> Result<String, TemplateError> {
        let fields = self.field_count();
        if fields != args.len() {
            return Err(TemplateError::ArityMismatch { fields, args: args.len() });
        }

        for token in &self.tokens {
            match token {
                Token::Char(spec) | Token::Int(spec) | Token::Real(spec) => spec.check()?,
                Token::Literal(_) => {}
            }
        }

        let mut out = String::new();
        let mut args_iter = args.iter().enumerate();

        for token in &self.tokens {
            let (index, arg) = match token {
                Token::Literal(s) => {
                    out.push_str(s);
                    continue;
                }
                _ => args_iter.next().ok_or(TemplateError::ArityMismatch { fields, args: args.len() })?,
            };

            let rendered = match (token, arg) {
                (Token::Char(spec), Arg::Char(c)) => pad(spec, "", &c.to_string(), false),
                (Token::Int(spec), Arg::Int(v)) => format_int(spec, *v),
                (Token::Int(spec), Arg::Real(v)) => format_int(spec, v.trunc() as i64),
                (Token::Real(spec), Arg::Real(v)) => format_real(spec, *v),
                (Token::Real(spec), Arg::Int(v)) => format_real(spec, *v as f64),
                (t, a) => {
                    return Err(TemplateError::KindMismatch {
                        index,
                        expected: field_kind(t),
                        given: a.kind(),
                    })
                }
            };
            out.push_str(&rendered);
        }

        Ok(out)
    }
}

fn field_kind(token: &Token) -> &'static str {
    match token {
        Token::Char(_) => "a char",
        Token::Int(_) => "an integer",
        Token::Real(_) => "a real",
        Token::Literal(_) => "nothing",
    }
}

fn read_number<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Option<usize> {
    let mut n: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        n = Some(n.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
    }
    n
}

fn sign_str(spec: &FieldSpec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

/// Applies the field width.  Zero fill goes between the sign and the digits.
fn pad(spec: &FieldSpec, sign: &str, body: &str, zero_fill: bool) -> String {
    let len = sign.chars().count() + body.chars().count();
    let width = spec.width.unwrap_or(0);

    if len >= width {
        return format!("{}{}", sign, body);
    }
    let fill = width - len;

    if spec.left {
        format!("{}{}{}", sign, body, " ".repeat(fill))
    } else if zero_fill {
        format!("{}{}{}", sign, "0".repeat(fill), body)
    } else {
        format!("{}{}{}", " ".repeat(fill), sign, body)
    }
}

fn format_int(spec: &FieldSpec, v: i64) -> String {
    let mut digits = v.unsigned_abs().to_string();

    if let Some(p) = spec.precision {
        if p == 0 && v == 0 {
            digits.clear();
        } else if digits.len() < p {
            digits = format!("{}{}", "0".repeat(p - digits.len()), digits);
        }
    }

    let zero_fill = spec.zero && spec.precision.is_none();
    pad(spec, sign_str(spec, v < 0), &digits, zero_fill)
}

fn format_real(spec: &FieldSpec, v: f64) -> String {
    let precision = spec.precision.unwrap_or(6);

    if !v.is_finite() {
        let body = if v.is_nan() { "nan".to_string() } else { "inf".to_string() };
        return pad(spec, sign_str(spec, v.is_sign_negative() && !v.is_nan()), &body, false);
    }

    let body = format!("{:.*}", precision, v.abs());
    pad(spec, sign_str(spec, v.is_sign_negative()), &body, spec.zero)
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.left { write!(f, "-")?; }
        if self.plus { write!(f, "+")?; }
        if self.space { write!(f, " ")?; }
        if self.zero { write!(f, "0")?; }
        if let Some(w) = self.width { write!(f, "{}", w)?; }
        if let Some(p) = self.precision { write!(f, ".{}", p)?; }
        Ok(())
    }
}

/// printf syntax of the template, literal '%' are escaped
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Literal(s) => write!(f, "{}", s.replace('%', "%%"))?,
                Token::Char(spec) => write!(f, "%{}c", spec)?,
                Token::Int(spec) => write!(f, "%{}d", spec)?,
                Token::Real(spec) => write!(f, "%{}f", spec)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod template_tests {
    use super::*;

    fn render(t: &str, args: &[Arg]) -> String {
        Template::parse(t).unwrap().render(args).unwrap()
    }

    #[test]
    fn test_parse_tokens() {
        let t = Template::parse("Tiles_%.4d-%.4d_Lambert93").unwrap();
        assert_eq!(t.field_count(), 2);
        assert_eq!(t.tokens()[0], Token::Literal("Tiles_".to_string()));
        assert_eq!(t.tokens()[1], Token::Int(FieldSpec { precision: Some(4), ..Default::default() }));
        assert_eq!(t.to_string(), "Tiles_%.4d-%.4d_Lambert93");
    }

    #[test]
    fn test_int_fields() {
        assert_eq!(render("%.4d_%.4d", &[Arg::Int(6210), Arg::Int(450)]), "6210_0450");
        assert_eq!(render("%d", &[Arg::Int(-42)]), "-42");
        assert_eq!(render("%+d", &[Arg::Int(42)]), "+42");
        assert_eq!(render("%+.5d", &[Arg::Int(-42)]), "-00042");
        assert_eq!(render("%06d", &[Arg::Int(-42)]), "-00042");
        assert_eq!(render("%6d|", &[Arg::Int(42)]), "    42|");
        assert_eq!(render("%-6d|", &[Arg::Int(42)]), "42    |");
        assert_eq!(render("%08.3d", &[Arg::Int(7)]), "     007");
        assert_eq!(render("%.0d|", &[Arg::Int(0)]), "|");
    }

    #[test]
    fn test_real_fields() {
        assert_eq!(render("%f", &[Arg::Real(621000.25)]), "621000.250000");
        assert_eq!(render("%09.3f", &[Arg::Real(-2.5)]), "-0002.500");
        assert_eq!(render("%+.1f", &[Arg::Real(45.04)]), "+45.0");
        assert_eq!(render("%.2f", &[Arg::Int(3)]), "3.00");
    }

    #[test]
    fn test_char_fields_and_percent() {
        assert_eq!(render("%c%.3d%%", &[Arg::Char('N'), Arg::Int(45)]), "N045%");
        assert_eq!(Template::parse("100%%").unwrap().to_string(), "100%%");
    }

    #[test]
    fn test_real_arg_in_int_field_truncates() {
        assert_eq!(render("%d_%d", &[Arg::Real(621999.9), Arg::Real(-45.7)]), "621999_-45");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Template::parse("abc%"), Err(TemplateError::DanglingPercent));
        assert_eq!(Template::parse("%.4"), Err(TemplateError::DanglingPercent));
        assert_eq!(Template::parse("%s_%d"), Err(TemplateError::UnsupportedConversion('s')));
        assert_eq!(Template::parse("%*d"), Err(TemplateError::UnsupportedConversion('*')));
        assert_eq!(Template::parse("%99999999999999999999999d_%d"), Err(TemplateError::FieldTooWide(usize::MAX)));
        assert_eq!(Template::parse("%.257d"), Err(TemplateError::FieldTooWide(257)));
        assert!(Template::parse("%0256.256f").is_ok());
    }

    #[test]
    fn test_render_errors() {
        let t = Template::parse("%d_%d_%d").unwrap();
        assert_eq!(t.render(&[Arg::Int(1), Arg::Int(2)]),
                   Err(TemplateError::ArityMismatch { fields: 3, args: 2 }));

        let t = Template::parse("%c%d").unwrap();
        assert!(matches!(t.render(&[Arg::Int(1), Arg::Int(2)]),
                         Err(TemplateError::KindMismatch { index: 0, .. })));

        let t = Template::parse("no fields").unwrap();
        assert!(t.render(&[Arg::Int(1), Arg::Int(2)]).is_err());
    }

    #[test]
    fn test_render_rejects_wide_fields() {
        let mut t = Template::new();
        t.push(Token::Int(FieldSpec { precision: Some(usize::MAX), ..Default::default() }));

        assert_eq!(t.render(&[Arg::Int(1)]), Err(TemplateError::FieldTooWide(usize::MAX)));
    }

    #[test]
    fn test_literals_merge() {
        let mut t = Template::new();
        t.push_literal("a");
        t.push(Token::Literal("b".to_string()));
        t.push_literal("");
        assert_eq!(t.tokens(), &[Token::Literal("ab".to_string())]);
    }
}
