//! Puzzle inputs and expected answers read from a local directory

use crate::error::InputStoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File layout:
///
/// - input: `{dir}/{year}_day{day:02}.txt`
/// - expected answer: `{dir}/{year}_day{day:02}_part{part}.answer`
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn answer_path(&self, year: u16, day: u8, part: u8) -> PathBuf {
        self.dir
            .join(format!("{}_day{:02}_part{}.answer", year, day, part))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Reads the input, returning [`InputStoreError::Missing`] when there is
    /// no file.
    pub fn input(&self, year: u16, day: u8) -> Result<String, InputStoreError> {
        let path = self.input_path(year, day);
        read_optional(&path)?.ok_or(InputStoreError::Missing(path))
    }

    /// The expected answer with surrounding whitespace trimmed, or `None`
    /// when no answer file exists.
    pub fn expected_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
    ) -> Result<Option<String>, InputStoreError> {
        let path = self.answer_path(year, day, part);
        Ok(read_optional(&path)?.map(|answer| answer.trim().to_string()))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, InputStoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(InputStoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
