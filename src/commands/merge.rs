//! Merge one JUnit report into another

use crate::commands::Command;
use crate::error::Result;
use crate::merge::merge_files;
use crate::ui::UI;
use std::path::PathBuf;

pub struct MergeCommand {
    logfile: PathBuf,
    other: PathBuf,
}

impl MergeCommand {
    /// Merges the report at `other` into `logfile`.
    pub fn new(logfile: PathBuf, other: PathBuf) -> Self {
        MergeCommand { logfile, other }
    }
}

impl Command for MergeCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        ui.output(&format!(
            "Merging {} into {}",
            self.other.display(),
            self.logfile.display()
        ))?;

        if !merge_files(&self.logfile, &self.other)? {
            ui.warning(&format!(
                "{} contains no test suites, {} left unchanged",
                self.other.display(),
                self.logfile.display()
            ))?;
        }

        Ok(0)
    }

    fn name(&self) -> &str {
        "merge"
    }

    fn help(&self) -> &str {
        "Move the testsuites of another report into the log file"
    }
}
