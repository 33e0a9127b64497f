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
use core::fmt;
use log::warn;

/// One edge of the raster bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    West,
    East,
    South,
    North,
}

impl Corner {
    /// Anything that is not one of `W`, `E`, `S`, `N` (any case) is read as West
    pub fn from_char(c: char) -> Corner {
        match c.to_ascii_uppercase() {
            'E' => Corner::East,
            'S' => Corner::South,
            'N' => Corner::North,
            _ => Corner::West,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Corner::West | Corner::East)
    }

    pub fn as_char(&self) -> char {
        match self {
            Corner::West => 'W',
            Corner::East => 'E',
            Corner::South => 'S',
            Corner::North => 'N',
        }
    }
}

/// Ordered pair of one horizontal and one vertical edge, i.e. a corner of the raster.
/// The order decides which coordinate comes first in the new name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefPoint(pub Corner, pub Corner);

pub const DEFAULT_REF_POINT: RefPoint = RefPoint(Corner::West, Corner::North);

impl RefPoint {
    /// Accepts WN, EN, NW, NE, WS, ES, SW, SE in any case
    pub fn parse(code: &str) -> Option<RefPoint> {
        let chars: Vec<char> = code.chars().map(|c| c.to_ascii_uppercase()).collect();
        if chars.len() != 2 {
            return None;
        }

        let known = |c: char| matches!(c, 'W' | 'E' | 'S' | 'N');
        if !known(chars[0]) || !known(chars[1]) {
            return None;
        }

        let first = Corner::from_char(chars[0]);
        let second = Corner::from_char(chars[1]);

        //one of each axis
        if first.is_horizontal() == second.is_horizontal() {
            return None;
        }

        Some(RefPoint(first, second))
    }

    /// Invalid codes fall back to top left (WN)
    pub fn parse_or_default(code: &str) -> RefPoint {
        match RefPoint::parse(code) {
            Some(rp) => rp,
            None => {
                warn!("Invalid reference point {:?}, using {}", code, DEFAULT_REF_POINT);
                DEFAULT_REF_POINT
            }
        }
    }
}

impl Default for RefPoint {
    fn default() -> Self {
        DEFAULT_REF_POINT
    }
}

impl fmt::Display for RefPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0.as_char(), self.1.as_char())
    }
}

/// GDAL geo transform
/// [origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(pub [f64; 6]);

impl AffineTransform {
    pub fn origin_x(&self) -> f64 {
        self.0[0]
    }
    pub fn pixel_width(&self) -> f64 {
        self.0[1]
    }
    pub fn origin_y(&self) -> f64 {
        self.0[3]
    }
    /// Note pixel height is negative for north up rasters
    pub fn pixel_height(&self) -> f64 {
        self.0[5]
    }
}

impl From<[f64; 6]> for AffineTransform {
    fn from(gt: [f64; 6]) -> Self {
        AffineTransform(gt)
    }
}

/// Projected coordinate of one edge of the raster.  Rotation terms are ignored.
pub fn coordinate_for(corner: Corner, transform: &AffineTransform, raster_width: usize, raster_height: usize) -> f64 {
    match corner {
        Corner::West => transform.origin_x(),
        Corner::East => transform.origin_x() + raster_width as f64 * transform.pixel_width(),
        Corner::North => transform.origin_y(),
        Corner::South => transform.origin_y() + raster_height as f64 * transform.pixel_height(),
    }
}

/// E/W for horizontal edges, N/S for vertical ones.  Zero is east / north.
pub fn hemisphere_for(corner: Corner, value: f64) -> char {
    match (corner.is_horizontal(), value >= 0.) {
        (true, true) => 'E',
        (true, false) => 'W',
        (false, true) => 'N',
        (false, false) => 'S',
    }
}

#[cfg(test)]
mod coords_tests {
    use float_cmp::approx_eq;

    use super::*;

    // 1000 x 500 pixels of 0.5m, origin 621000 / 4_500_000
    fn utm_transform() -> AffineTransform {
        [621000., 0.5, 0., 4_500_000., 0., -0.5].into()
    }

    #[test]
    fn test_coordinate_for_each_edge() {
        let gt = utm_transform();

        assert!(approx_eq!(f64, coordinate_for(Corner::West, &gt, 1000, 500), 621000.));
        assert!(approx_eq!(f64, coordinate_for(Corner::East, &gt, 1000, 500), 621500.));
        assert!(approx_eq!(f64, coordinate_for(Corner::North, &gt, 1000, 500), 4_500_000.));
        assert!(approx_eq!(f64, coordinate_for(Corner::South, &gt, 1000, 500), 4_499_750.));
    }

    #[test]
    fn test_transform_accessors() {
        let gt = utm_transform();

        assert_eq!(gt, AffineTransform([621000., 0.5, 0., 4_500_000., 0., -0.5]));
        assert_eq!((gt.origin_x(), gt.origin_y()), (621000., 4_500_000.));
        assert_eq!((gt.pixel_width(), gt.pixel_height()), (0.5, -0.5));
    }

    #[test]
    fn test_ref_point_order_is_symmetric() {
        let gt = utm_transform();

        for code in ["WN", "EN", "WS", "ES"] {
            let rp = RefPoint::parse(code).unwrap();
            let swapped: String = code.chars().rev().collect();
            let rp_swapped = RefPoint::parse(&swapped).unwrap();

            let a = (coordinate_for(rp.0, &gt, 1000, 500), coordinate_for(rp.1, &gt, 1000, 500));
            let b = (coordinate_for(rp_swapped.0, &gt, 1000, 500), coordinate_for(rp_swapped.1, &gt, 1000, 500));

            assert_eq!(a.0, b.1, "{}", code);
            assert_eq!(a.1, b.0, "{}", code);
        }
    }

    #[test]
    fn test_ref_point_parse() {
        assert_eq!(RefPoint::parse("wn"), Some(RefPoint(Corner::West, Corner::North)));
        assert_eq!(RefPoint::parse("SE"), Some(RefPoint(Corner::South, Corner::East)));
        assert_eq!(RefPoint::parse("NS"), None);
        assert_eq!(RefPoint::parse("WE"), None);
        assert_eq!(RefPoint::parse("W"), None);
        assert_eq!(RefPoint::parse("WNX"), None);
        assert_eq!(RefPoint::parse("XN"), None);

        assert_eq!(RefPoint::parse_or_default("bogus"), DEFAULT_REF_POINT);
        assert_eq!(RefPoint::parse_or_default("es").to_string(), "ES");
    }

    #[test]
    fn test_unknown_designator_is_west() {
        assert_eq!(Corner::from_char('x'), Corner::West);
        assert_eq!(Corner::from_char('n'), Corner::North);
    }

    #[test]
    fn test_hemisphere_for() {
        assert_eq!(hemisphere_for(Corner::West, 0.), 'E');
        assert_eq!(hemisphere_for(Corner::East, -3.2), 'W');
        assert_eq!(hemisphere_for(Corner::North, 45.), 'N');
        assert_eq!(hemisphere_for(Corner::South, -0.1), 'S');
    }
}
