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
use anyhow::Result;
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use structopt::clap::ErrorKind;
use structopt::StructOpt;

use gdal_rename::cmd_rename::{rename_cmd, RenameArgs};
use gdal_rename::{Error, GdalSource};

#[derive(StructOpt)]
#[structopt(name = "gdal_rename",
    about = "Renames a GDAL dataset and its companion files (world file, prj, ...) using the coordinates of one of its corners")]
struct Cli {

    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(flatten)]
    rename: RenameArgs,
}

/// Exit code: 1 for usage, missing georeferencing, bad template or a failed dataset rename
fn run() -> Result<i32> {
    let args = match Cli::from_iter_safe(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            match e.kind {
                ErrorKind::HelpDisplayed => {
                    println!("{}", e.message);
                    return Ok(1);
                }
                ErrorKind::VersionDisplayed => {
                    println!("{}", e.message);
                    return Ok(0);
                }
                _ => {
                    eprintln!("{}", e.message);
                    return Ok(1);
                }
            }
        }
    };

    SimpleLogger::new().with_level(args.log_level).init()?;

    match rename_cmd(&args.rename, &GdalSource) {
        Ok(report) => Ok(if report.primary_succeeded() { 0 } else { 1 }),
        Err(Error::Usage(msg)) => {
            Cli::clap().print_help()?;
            eprintln!("\n\nFAILURE: {}", msg);
            Ok(1)
        }
        Err(e) => {
            error!("{}", e);
            Ok(1)
        }
    }
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:?}", e);
            1
        }
    };
    std::process::exit(code);
}
