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

use thiserror::Error;

use crate::rename::RenameError;
use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),
    #[error("Could not open dataset {path:?}: {msg}")]
    DatasetOpen { path: PathBuf, msg: String },
    #[error("No georeferencing information found in {path:?}")]
    MetadataMissing { path: PathBuf },
    #[error(
        "Could not build the new name of {path:?} with template {template:?}: {reason}.  \
         If --printf-syntax was used check it has exactly 2 coordinate fields"
    )]
    Format {
        path: PathBuf,
        template: String,
        reason: TemplateError,
    },
    #[error(transparent)]
    Rename(#[from] RenameError),
}

pub type Result<T> = std::result::Result<T, Error>;
