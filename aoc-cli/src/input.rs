//! Local puzzle input files

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Where puzzle inputs are read from
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`, unless a single
/// override file is given for every year/day.
pub struct InputSource {
    input_dir: PathBuf,
    override_file: Option<PathBuf>,
}

impl InputSource {
    pub fn new(input_dir: PathBuf, override_file: Option<PathBuf>) -> Self {
        Self {
            input_dir,
            override_file,
        }
    }

    /// Get the input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.override_file {
            Some(path) => path.clone(),
            None => self.input_dir.join(format!("{}_day{:02}.txt", year, day)),
        }
    }

    /// Read the input for a year/day
    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::NotFound { year, day, path },
            _ => InputError::Read { path, source },
        })
    }
}
