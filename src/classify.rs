use std::fs::{self, File};
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use log::debug;

/// How a target file should be invoked, decided by sniffing the file itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Unknown,
    Elf,
    Python,
    Shell,
    Other,
}

const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];
const FIRST_LINE_MAX: usize = 256;

/// Classify an executable path. The checks run in a fixed order and the first
/// match wins: extension, ELF magic, shebang line, executable-bit fallback.
/// Later checks only see files the earlier ones were inconclusive about, so
/// the order must stay as is.
pub fn classify(path: &Path) -> FileType {
    if !path.exists() {
        return FileType::Unknown;
    }

    // Extension short-circuits all content inspection.
    let lower = path.to_string_lossy().to_ascii_lowercase();
    if lower.ends_with(".py") {
        return FileType::Python;
    }
    if lower.ends_with(".sh") {
        return FileType::Shell;
    }

    let mut header = [0u8; 8];
    let read = match File::open(path).and_then(|mut f| f.read(&mut header)) {
        Ok(n) => n,
        Err(_) => return FileType::Unknown,
    };
    if read < 4 {
        return FileType::Unknown;
    }

    if header[..4] == ELF_MAGIC {
        debug!("{:?}: ELF magic", path);
        return FileType::Elf;
    }

    if header[0] == b'#' && header[1] == b'!' {
        if let Some(line) = read_first_line(path) {
            if line.contains("python") {
                return FileType::Python;
            }
            if ["/bin/bash", "/bin/sh", "/bin/zsh", "/bin/dash"]
                .iter()
                .any(|shell| line.contains(shell))
            {
                return FileType::Shell;
            }
        }
    }

    // Extensionless script with an ambiguous or missing shebang: fall back to
    // the executable bit and a looser first-line scan.
    if is_executable(path) {
        if let Some(line) = read_first_line(path) {
            if line.contains("python") {
                return FileType::Python;
            }
            if line.contains("/bin/") {
                return FileType::Shell;
            }
        }
    }

    FileType::Other
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// First line of the file, capped at 256 bytes, lowercased.
fn read_first_line(path: &Path) -> Option<String> {
    let mut buf = [0u8; FIRST_LINE_MAX];
    let read = File::open(path).and_then(|mut f| f.read(&mut buf)).ok()?;
    let line = match buf[..read].iter().position(|&b| b == b'\n') {
        Some(end) => &buf[..end],
        None => &buf[..read],
    };
    Some(String::from_utf8_lossy(line).to_ascii_lowercase())
}
