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
use std::path::Path;

use crate::coords::AffineTransform;
use crate::errors::Result;

/// Spatial metadata needed to name a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Georef {
    pub transform: AffineTransform,
    pub width: usize,
    pub height: usize,
}

/// Where the geo transform and raster size come from
pub trait GeorefSource {
    fn read_georef(&self, path: &Path) -> Result<Georef>;
}

#[cfg(feature = "gdal")]
pub use gdal_source::GdalSource;

#[cfg(feature = "gdal")]
mod gdal_source {
    use std::path::Path;

    use gdal::Dataset;
    use log::debug;

    use super::{Georef, GeorefSource};
    use crate::errors::{Error, Result};

    /// Reads any raster format GDAL has a driver for
    #[derive(Debug, Default, Clone, Copy)]
    pub struct GdalSource;

    impl GeorefSource for GdalSource {
        fn read_georef(&self, path: &Path) -> Result<Georef> {
            let dataset = Dataset::open(path).map_err(|e| Error::DatasetOpen {
                path: path.to_path_buf(),
                msg: e.to_string(),
            })?;

            let geo_transform = dataset.geo_transform().map_err(|e| {
                debug!("geo_transform failed for {:?}: {}", path, e);
                Error::MetadataMissing { path: path.to_path_buf() }
            })?;

            let (width, height) = dataset.raster_size();

            Ok(Georef {
                transform: geo_transform.into(),
                width,
                height,
            })
        }
    }
}
