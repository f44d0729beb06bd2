use std::fmt::Write;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::categories::Categories;
use crate::classify::{self, FileType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    #[default]
    Application,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Application => "Application",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("application name is required")]
    MissingName,
    #[error("executable location is required for type 'Application'")]
    MissingExecutable,
}

/// One launcher definition. Fields are set directly by the caller; nothing is
/// validated until `validate` or serialized until `generate`.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub entry_type: EntryType,
    pub name: String,
    pub comment: String,
    pub exec_path: String,
    pub icon_path: String,
    pub terminal: bool,
    pub categories: Categories,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the required fields. Whether `exec_path` actually exists on disk
    /// is not this function's business; see `save::check_executable`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        match self.entry_type {
            EntryType::Application => {
                if self.exec_path.is_empty() {
                    return Err(ValidationError::MissingExecutable);
                }
            }
        }
        Ok(())
    }

    /// Serialize to `.desktop` file content. Works on whatever state is
    /// present, so an invalid entry can still be previewed: an empty
    /// `exec_path` just drops the Exec= line.
    pub fn generate(&self, terminal_launcher: &str) -> String {
        let mut content = String::new();

        writeln!(content, "[Desktop Entry]").unwrap();
        writeln!(content, "Version=1.0").unwrap();
        writeln!(content, "Type={}", self.entry_type.as_str()).unwrap();
        writeln!(content, "Name={}", self.name).unwrap();

        if !self.comment.is_empty() {
            writeln!(content, "Comment={}", self.comment).unwrap();
        }

        match self.entry_type {
            EntryType::Application => {
                if !self.exec_path.is_empty() {
                    writeln!(content, "Exec={}", self.exec_line(terminal_launcher)).unwrap();
                }
                writeln!(content, "Terminal={}", self.terminal).unwrap();
            }
        }

        if !self.icon_path.is_empty() {
            writeln!(content, "Icon={}", self.icon_path).unwrap();
        }

        let categories = self.categories.render();
        if !categories.is_empty() {
            writeln!(content, "Categories={}", categories).unwrap();
        }

        content
    }

    /// Invocation command for the Exec= line, templated on what the target
    /// file turns out to be. Scripts get their interpreter spelled out;
    /// binaries and anything unrecognized run as-is.
    fn exec_line(&self, terminal_launcher: &str) -> String {
        let file_type = classify::classify(Path::new(&self.exec_path));
        debug!("{} classified as {:?}", self.exec_path, file_type);

        match file_type {
            FileType::Python => {
                if self.terminal {
                    format!("{} -- python3 \"{}\"", terminal_launcher, self.exec_path)
                } else {
                    format!("python3 \"{}\"", self.exec_path)
                }
            }
            FileType::Shell => {
                if self.terminal {
                    // Keep the terminal open after the script finishes.
                    format!(
                        "{} -- bash -c \"{}; exec bash\"",
                        terminal_launcher, self.exec_path
                    )
                } else {
                    format!("bash \"{}\"", self.exec_path)
                }
            }
            FileType::Elf | FileType::Other | FileType::Unknown => {
                format!("\"{}\"", self.exec_path)
            }
        }
    }
}
