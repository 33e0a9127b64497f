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
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, error, warn};

use crate::companions::companion_exts;
use crate::rename::{rename_no_overwrite, RenameError, RenameMode, RenameOutcome};

/// What to do with the companion files when the dataset itself could not be renamed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Rename the companions anyway, each one independently
    ContinueSiblings,
    /// Leave the companions alone
    AbortOnPrimaryFailure,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::ContinueSiblings
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub old: PathBuf,
    pub new: PathBuf,
}

/// The dataset and its companion files, all renamed to the same base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub primary: RenamePair,
    pub siblings: Vec<RenamePair>,
}

impl RenamePlan {
    pub fn new(dataset_path: &Path, new_base: &str) -> RenamePlan {
        let dir = dataset_path.parent().unwrap_or_else(|| Path::new(""));
        let stem = dataset_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let primary_new = match dataset_path.extension() {
            Some(ext) => dir.join(format!("{}.{}", new_base, ext.to_string_lossy())),
            None => dir.join(new_base),
        };

        let siblings = companion_exts(dataset_path)
            .into_iter()
            .map(|ext| RenamePair {
                old: dir.join(format!("{}.{}", stem, ext)),
                new: dir.join(format!("{}.{}", new_base, ext)),
            })
            .collect();

        RenamePlan {
            primary: RenamePair {
                old: dataset_path.to_path_buf(),
                new: primary_new,
            },
            siblings,
        }
    }

    /// Dataset first, then companions in table order.  Companion files that do not
    /// exist are skipped.
    pub fn execute(&self, mode: RenameMode, policy: FailurePolicy) -> PlanReport {
        let primary = match rename_no_overwrite(&self.primary.old, &self.primary.new, mode) {
            Ok(outcome) => PairResult::Done(outcome),
            Err(e) => {
                error!("{}", e);
                error!("Check the file exists, is not locked and can be written");
                PairResult::Failed(e)
            }
        };

        let abort = primary.is_failure() && policy == FailurePolicy::AbortOnPrimaryFailure;
        if abort && !self.siblings.is_empty() {
            warn!("Not renaming companion files {}", self.siblings.iter().map(|s| s.old.display()).join(", "));
        }

        let siblings = self
            .siblings
            .iter()
            .map(|pair| {
                let result = if abort {
                    PairResult::Skipped
                } else if !pair.old.exists() {
                    debug!("No companion file {:?}", pair.old);
                    PairResult::Missing
                } else {
                    match rename_no_overwrite(&pair.old, &pair.new, mode) {
                        Ok(outcome) => PairResult::Done(outcome),
                        Err(e) => {
                            error!("{}", e);
                            PairResult::Failed(e)
                        }
                    }
                };
                (pair.clone(), result)
            })
            .collect();

        PlanReport { primary, siblings }
    }
}

#[derive(Debug)]
pub enum PairResult {
    Done(RenameOutcome),
    Missing,
    Skipped,
    Failed(RenameError),
}

impl PairResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, PairResult::Failed(_))
    }
}

#[derive(Debug)]
pub struct PlanReport {
    pub primary: PairResult,
    pub siblings: Vec<(RenamePair, PairResult)>,
}

impl PlanReport {
    pub fn primary_succeeded(&self) -> bool {
        matches!(self.primary, PairResult::Done(_))
    }

    pub fn sibling_failures(&self) -> usize {
        self.siblings.iter().filter(|(_, r)| r.is_failure()).count()
    }

    /// Shell commands in execution order, console mode only
    pub fn commands(&self) -> Vec<&str> {
        std::iter::once(&self.primary)
            .chain(self.siblings.iter().map(|(_, r)| r))
            .filter_map(|r| match r {
                PairResult::Done(RenameOutcome::Command(c)) => Some(c.as_str()),
                _ => None,
            })
            .collect()
    }
}
