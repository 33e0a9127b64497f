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
//! Renames a raster dataset and its companion files (world file, .prj, ...) after the
//! coordinates of one of its corners, e.g. `in.tif` / `in.tfw` to `0621_4500.tif` / `0621_4500.tfw`.

use std::path::Path;

use log::info;

pub mod cmd_rename;
pub mod companions;
pub mod coords;
pub mod dataset;
pub mod errors;
pub mod name_format;
pub mod plan;
pub mod rename;
pub mod template;

pub use coords::{coordinate_for, hemisphere_for, AffineTransform, Corner, RefPoint};
pub use dataset::{Georef, GeorefSource};
pub use errors::{Error, Result};
pub use name_format::{format_name, CoordType, FormatConfig, NameFormatError, SignPolicy};
pub use plan::{FailurePolicy, PairResult, PlanReport, RenamePlan};
pub use rename::{rename_no_overwrite, RenameError, RenameMode, RenameOutcome, ShellDialect};

#[cfg(feature = "gdal")]
pub use dataset::GdalSource;

/// Everything that decides the new name and how it is applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenameRequest {
    pub ref_point: RefPoint,
    pub format: FormatConfig,
    pub mode: RenameMode,
    pub policy: FailurePolicy,
}

/// New base name from the reference point corner of `georef`
pub fn new_base_name(georef: &Georef, ref_point: RefPoint, config: &FormatConfig) -> std::result::Result<String, NameFormatError> {
    let corners = [ref_point.0, ref_point.1];
    let coords = corners.map(|c| coordinate_for(c, &georef.transform, georef.width, georef.height));

    let hemispheres = if config.sign_policy == SignPolicy::Geographic {
        Some([hemisphere_for(corners[0], coords[0]), hemisphere_for(corners[1], coords[1])])
    } else {
        None
    };

    format_name(coords, hemispheres, config)
}

/// Reads the dataset georeferencing, computes the new base name once and renames the
/// dataset and its companion files with it.
pub fn rename_dataset<S: GeorefSource + ?Sized>(source: &S, path: &Path, request: &RenameRequest) -> Result<PlanReport> {
    let georef = source.read_georef(path)?;

    let new_base = new_base_name(&georef, request.ref_point, &request.format).map_err(|e| Error::Format {
        path: path.to_path_buf(),
        template: e.template,
        reason: e.source,
    })?;
    info!("New name for {:?}: {}", path, new_base);

    let plan = RenamePlan::new(path, &new_base);

    Ok(plan.execute(request.mode, request.policy))
}
