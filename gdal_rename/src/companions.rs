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

/// World file extension: 1st and 3rd char of the dataset extension plus 'w' (tif -> tfw).
/// Shorter extensions use what they have (ab -> aw), no extension means no world file.
pub fn world_file_ext(dataset_ext: &str) -> Option<String> {
    let mut chars = dataset_ext.chars();
    let first = chars.next()?;
    let third = chars.nth(1);

    let mut ext = String::with_capacity(3);
    ext.push(first);
    if let Some(c) = third {
        ext.push(c);
    }
    ext.push('w');

    Some(ext)
}

/// Extensions of the files that travel with a dataset of extension `dataset_ext`,
/// world file first.  Matching is case insensitive.
pub fn companion_exts_for(dataset_ext: &str) -> Vec<String> {
    let mut exts: Vec<String> = world_file_ext(dataset_ext).into_iter().collect();

    let extra: &[&str] = match dataset_ext.to_ascii_lowercase().as_str() {
        "tif" => &["prj"],
        "ecw" => &["ers"],
        "img" => &["led", "nul", "trl", "vol"],
        "jp2" | "j2k" => &["prj"],
        _ => &[],
    };
    exts.extend(extra.iter().map(|e| e.to_string()));

    exts
}

pub fn companion_exts(dataset_path: &Path) -> Vec<String> {
    let ext = dataset_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    companion_exts_for(&ext)
}

#[cfg(test)]
mod companions_tests {
    use super::*;

    #[test]
    fn test_world_file_ext() {
        assert_eq!(world_file_ext("tif").as_deref(), Some("tfw"));
        assert_eq!(world_file_ext("jp2").as_deref(), Some("j2w"));
        assert_eq!(world_file_ext("TIF").as_deref(), Some("TFw"));
        assert_eq!(world_file_ext("gz").as_deref(), Some("gw"));
        assert_eq!(world_file_ext(""), None);
    }

    #[test]
    fn test_companion_exts() {
        assert_eq!(companion_exts(Path::new("/data/tile.tif")), vec!["tfw", "prj"]);
        assert_eq!(companion_exts(Path::new("tile.ECW")), vec!["EWw", "ers"]);
        assert_eq!(companion_exts(Path::new("tile.img")), vec!["igw", "led", "nul", "trl", "vol"]);
        assert_eq!(companion_exts(Path::new("tile.j2k")), vec!["jkw", "prj"]);
        assert_eq!(companion_exts(Path::new("tile.png")), vec!["pgw"]);
        assert!(companion_exts(Path::new("tile")).is_empty());
    }
}
