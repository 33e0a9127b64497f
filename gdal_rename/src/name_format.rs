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
use log::debug;
use thiserror::Error;

use crate::template::{Arg, FieldSpec, Template, TemplateError, Token};

/// Legacy name buffer size, longer names are cut
pub const MAX_NAME_CHARS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordType {
    Integer,
    Real,
}

impl CoordType {
    /// `real` in any case, everything else is integer
    pub fn from_arg(s: &str) -> CoordType {
        if s.eq_ignore_ascii_case("real") {
            CoordType::Real
        } else {
            CoordType::Integer
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    /// '-' only when negative
    Standard,
    /// always '+' or '-'
    ForceSign,
    /// hemisphere letter instead of a sign
    Geographic,
}

impl SignPolicy {
    /// `geo`, anything starting with `force`, otherwise standard.  Case insensitive.
    pub fn from_arg(s: &str) -> SignPolicy {
        let lower = s.to_ascii_lowercase();
        if lower == "geo" {
            SignPolicy::Geographic
        } else if lower.starts_with("force") {
            SignPolicy::ForceSign
        } else {
            SignPolicy::Standard
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatConfig {
    pub coord_type: CoordType,
    pub sign_policy: SignPolicy,
    /// Significant digits kept (integer) or field width (real)
    pub digit_count: Option<usize>,
    pub decimal_digits: Option<usize>,
    pub zero_padding: bool,
    pub separator: String,
    pub prefix: String,
    pub suffix: String,
    /// printf template replacing everything above except coord type and sign policy
    pub raw_override: Option<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            coord_type: CoordType::Integer,
            sign_policy: SignPolicy::Standard,
            digit_count: Some(7),
            decimal_digits: Some(3),
            zero_padding: false,
            separator: "_".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            raw_override: None,
        }
    }
}

#[derive(Debug, Error)]
#[error("Cannot build a file name from template {template:?}: {source}")]
pub struct NameFormatError {
    pub template: String,
    #[source]
    pub source: TemplateError,
}

/// Number of digits of the integer part, as ceil(log10(v)).
/// Values <= 1 count as 0, so do negative ones.  Exact powers of ten are one short.
pub fn digit_count_of(v: f64) -> i32 {
    if !(v > 1.) {
        return 0;
    }
    v.log10().ceil() as i32
}

/// Drops the low order digits of both coordinates so the longer one keeps
/// `digit_count` digits, e.g. 621000 / 4500000 with 4 digits gives 621 / 4500.
/// Without truncation the values are cut toward zero.
pub fn truncate_coords(coord0: f64, coord1: f64, digit_count: Option<usize>) -> (i64, i64) {
    let base_digits = std::cmp::max(digit_count_of(coord0), digit_count_of(coord1));

    let format_digits = digit_count.and_then(|d| i32::try_from(d).ok());

    match format_digits {
        Some(format_digits) if base_digits > format_digits => {
            let scale = 10f64.powi(base_digits - format_digits);
            ((coord0 / scale).trunc() as i64, (coord1 / scale).trunc() as i64)
        }
        _ => (coord0.trunc() as i64, coord1.trunc() as i64),
    }
}

fn coord_tokens(config: &FormatConfig) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(2);

    if config.sign_policy == SignPolicy::Geographic {
        tokens.push(Token::Char(FieldSpec::default()));
    }

    let mut spec = FieldSpec {
        plus: config.sign_policy == SignPolicy::ForceSign,
        ..Default::default()
    };

    let padded_length = if config.zero_padding { config.digit_count } else { None };

    match config.coord_type {
        CoordType::Real => {
            if let Some(width) = padded_length {
                spec.zero = true;
                spec.width = Some(width);
                spec.precision = config.decimal_digits;
            }
            tokens.push(Token::Real(spec));
        }
        CoordType::Integer => {
            //precision is a minimum digit count for integers
            if let Some(digits) = padded_length {
                spec.precision = Some(digits);
            }
            tokens.push(Token::Int(spec));
        }
    }

    tokens
}

/// prefix, coordinate, separator, coordinate, suffix
pub fn structured_template(config: &FormatConfig) -> Template {
    let mut template = Template::new();

    template.push_literal(&config.prefix);
    for t in coord_tokens(config) {
        template.push(t);
    }
    template.push_literal(&config.separator);
    for t in coord_tokens(config) {
        template.push(t);
    }
    template.push_literal(&config.suffix);

    template
}

/// Builds the new base name (no directory, no extension) from the two reference point
/// coordinates.  `hemispheres` is only used with the geographic sign policy.
pub fn format_name(coords: [f64; 2], hemispheres: Option<[char; 2]>, config: &FormatConfig) -> Result<String, NameFormatError> {
    let geographic = config.sign_policy == SignPolicy::Geographic;

    let (template, values) = match &config.raw_override {
        Some(raw) => {
            let template = Template::parse(raw).map_err(|source| NameFormatError {
                template: raw.clone(),
                source,
            })?;
            //the template's own conversions decide the representation
            (template, [Arg::Real(coords[0]), Arg::Real(coords[1])])
        }
        None => {
            let values = match config.coord_type {
                CoordType::Real => [Arg::Real(coords[0]), Arg::Real(coords[1])],
                CoordType::Integer => {
                    let (i0, i1) = truncate_coords(coords[0], coords[1], config.digit_count);
                    [Arg::Int(i0), Arg::Int(i1)]
                }
            };
            (structured_template(config), values)
        }
    };

    debug!("Name template: {}", template);

    let mut args = Vec::with_capacity(4);
    for (idx, value) in values.iter().enumerate() {
        match (geographic, hemispheres) {
            (true, Some(h)) => {
                args.push(Arg::Char(h[idx]));
                //the hemisphere letter carries the sign
                args.push(match value {
                    Arg::Int(v) => Arg::Int(v.saturating_abs()),
                    Arg::Real(v) => Arg::Real(v.abs()),
                    c => *c,
                });
            }
            _ => args.push(*value),
        }
    }

    let name = template.render(&args).map_err(|source| NameFormatError {
        template: template.to_string(),
        source,
    })?;

    if name.chars().count() > MAX_NAME_CHARS {
        debug!("Name {:?} cut to {} chars", name, MAX_NAME_CHARS);
        return Ok(name.chars().take(MAX_NAME_CHARS).collect());
    }

    Ok(name)
}
