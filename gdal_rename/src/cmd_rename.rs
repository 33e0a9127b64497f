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
use std::path::PathBuf;

use log::warn;
use structopt::StructOpt;

use crate::coords::RefPoint;
use crate::dataset::GeorefSource;
use crate::errors::{Error, Result};
use crate::name_format::{CoordType, FormatConfig, SignPolicy, MAX_NAME_CHARS};
use crate::plan::{FailurePolicy, PlanReport};
use crate::rename::{RenameMode, ShellDialect};
use crate::{rename_dataset, RenameRequest};

#[derive(StructOpt, Debug)]
pub struct RenameArgs {

    #[structopt(long, short = "r", default_value = "WN",
        help = "Corner used in the name, any pair of W/E and N/S (WN, NW, EN, NE, WS, SW, ES, SE)")]
    pub refpoint: String,

    #[structopt(long = "coord-zero-padding", short = "z",
        help = "Pad coordinates with 0 up to --coord-length")]
    pub zero_padding: bool,

    #[structopt(long = "coord-length", short = "l", default_value = "7",
        help = "Integer: number of high weight digits kept (621000 with 4 gives 6210).  Real: total width")]
    pub coord_length: usize,

    #[structopt(long = "coord-decimal-length", short = "d", default_value = "3",
        help = "Number of decimals for real coordinates")]
    pub coord_decimal_length: usize,

    #[structopt(long = "coord-type", short = "t", help = "'int' or 'real'")]
    pub coord_type: Option<String>,

    #[structopt(long = "coord-sign", short = "g", default_value = "std",
        help = "'std': sign when negative, 'force': always +/-, 'geo': E/W and N/S instead of the sign")]
    pub coord_sign: String,

    #[structopt(long = "coord-sep", short = "s", default_value = "_", allow_hyphen_values = true,
        help = "Separator between the 2 coordinates")]
    pub coord_sep: String,

    #[structopt(long, short = "p", allow_hyphen_values = true, help = "Prefix of the new name")]
    pub prefix: Option<String>,

    #[structopt(long, short = "x", allow_hyphen_values = true, help = "Suffix of the new name")]
    pub suffix: Option<String>,

    #[structopt(long = "printf-syntax", short = "f", allow_hyphen_values = true,
        help = "printf template used instead of the options above, e.g. Tiles_%.4d-%.4d_Lambert93.  \
                Exactly 2 coordinate fields, preceded by a %c each with --coord-sign geo")]
    pub printf_syntax: Option<String>,

    #[structopt(long = "output-console", short = "o",
        help = "'win' or 'unix': print the move/mv commands instead of renaming")]
    pub output_console: Option<String>,

    #[structopt(long = "abort-on-primary-failure",
        help = "Do not rename the companion files if the dataset could not be renamed")]
    pub abort_on_primary_failure: bool,

    #[structopt(long = "input-file-to-rename", short = "i", parse(from_os_str))]
    pub input_file: Option<PathBuf>,

    #[structopt(parse(from_os_str), help = "Dataset to rename")]
    pub dataset: Option<PathBuf>,
}

impl RenameArgs {

    pub fn dataset_path(&self) -> Result<PathBuf> {
        match (&self.input_file, &self.dataset) {
            (Some(p), None) | (None, Some(p)) => Ok(p.clone()),
            (Some(_), Some(_)) => Err(Error::Usage("Give the dataset either with --input-file-to-rename or as last argument, not both".to_string())),
            (None, None) => Err(Error::Usage("No dataset to rename".to_string())),
        }
    }

    pub fn format_config(&self) -> FormatConfig {
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

        FormatConfig {
            coord_type: self.coord_type.as_deref().map(CoordType::from_arg).unwrap_or(CoordType::Integer),
            sign_policy: SignPolicy::from_arg(&self.coord_sign),
            digit_count: Some(self.coord_length),
            decimal_digits: Some(self.coord_decimal_length),
            zero_padding: self.zero_padding,
            separator: self.coord_sep.clone(),
            prefix: self.prefix.clone().unwrap_or_default(),
            suffix: self.suffix.clone().unwrap_or_default(),
            raw_override: non_empty(&self.printf_syntax),
        }
    }

    pub fn rename_mode(&self) -> Result<RenameMode> {
        match self.output_console.as_deref() {
            None | Some("") => Ok(RenameMode::Execute),
            Some(s) => ShellDialect::from_arg(s)
                .map(RenameMode::Console)
                .ok_or_else(|| Error::Usage(format!("--output-console must be 'win' or 'unix', not {:?}", s))),
        }
    }

    pub fn request(&self) -> Result<RenameRequest> {
        for (flag, value) in [("--coord-length", self.coord_length), ("--coord-decimal-length", self.coord_decimal_length)] {
            if value > MAX_NAME_CHARS {
                return Err(Error::Usage(format!("{} must be at most {}, not {}", flag, MAX_NAME_CHARS, value)));
            }
        }

        Ok(RenameRequest {
            ref_point: RefPoint::parse_or_default(&self.refpoint),
            format: self.format_config(),
            mode: self.rename_mode()?,
            policy: if self.abort_on_primary_failure {
                FailurePolicy::AbortOnPrimaryFailure
            } else {
                FailurePolicy::ContinueSiblings
            },
        })
    }
}

/// Renames the dataset, in console mode the commands are printed on stdout
pub fn rename_cmd<S: GeorefSource + ?Sized>(args: &RenameArgs, source: &S) -> Result<PlanReport> {
    let path = args.dataset_path()?;
    let request = args.request()?;

    let report = rename_dataset(source, &path, &request)?;

    for command in report.commands() {
        println!("{}", command);
    }

    if report.sibling_failures() > 0 {
        warn!("{} companion file(s) of {:?} could not be renamed", report.sibling_failures(), path);
    }

    Ok(report)
}
