// The default mounts file.
//
// This is a really primitive format, and the parser is just as primitive:
//
//    # comments
//    x:filename.ext
//    xR:filename.ext
//
// Where x is a drive from 0 to 3, and an R (or r) between the drive and the colon
// means read-only. No extra whitespace, no quoting. For example:
//
//    0:SD_BOOT.DSK
//    1:CT_UTILS.DSK
//    2R:DANGER.DSK
//    3:PLAY.DSK
//
// Lines that don't fit are skipped rather than rejected.

// Imports

use log::{debug, warn};

use super::disks_struct::MAX_DISKS;
use crate::disk::disk_struct::FILENAME_SIZE;

// Structs, Enums, Flags

/// One `x:filename` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub drive: u8,
    pub read_only: bool,
    pub filename: String,
}

/// Where the parser is within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Start of a line.
    FirstChar,
    /// Throwing away the rest of the line.
    WaitEol,
    /// Got a drive number, want an `R` or a `:`.
    AfterDrive,
    /// Collecting the filename.
    Filename,
}

/// Where the rewriter is within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RewriteState {
    NewLine,
    CopyLine,
    SkipLine,
}

// Implementations

impl ConfigEntry {
    pub fn new(drive: u8, read_only: bool, filename: impl Into<String>) -> Self {
        ConfigEntry {
            drive,
            read_only,
            filename: filename.into(),
        }
    }

    /// The line this entry would be in a config file, newline included.
    pub fn to_line(&self) -> String {
        let flag = if self.read_only { "R" } else { "" };
        format!("{}{flag}:{}\n", self.drive, self.filename)
    }
}

// Functions

/// Pull every usable mount line out of a config file.
pub fn parse_config(contents: &[u8]) -> Vec<ConfigEntry> {
    let mut entries: Vec<ConfigEntry> = Vec::new();
    let mut state = ParseState::FirstChar;
    let mut drive: u8 = 0;
    let mut read_only = false;
    let mut filename = String::new();
    // Set once a name goes over 8.3 length, the line gets dropped.
    let mut too_long = false;

    for token in contents.iter().copied() {
        state = match state {
            ParseState::FirstChar => match token {
                b'#' => ParseState::WaitEol,
                b'0'..=b'3' => {
                    drive = token - b'0';
                    read_only = false;
                    ParseState::AfterDrive
                }
                b'\n' => ParseState::FirstChar,
                // Not a line we understand.
                _ => ParseState::WaitEol,
            },
            ParseState::WaitEol => {
                if token == b'\n' {
                    ParseState::FirstChar
                } else {
                    ParseState::WaitEol
                }
            }
            ParseState::AfterDrive => match token {
                b':' => {
                    filename.clear();
                    too_long = false;
                    ParseState::Filename
                }
                b'R' | b'r' => {
                    read_only = true;
                    ParseState::AfterDrive
                }
                b'\n' => {
                    warn!("Config line for drive {drive} has no filename, skipping it.");
                    ParseState::FirstChar
                }
                _ => ParseState::AfterDrive,
            },
            ParseState::Filename => {
                if token == b'\n' {
                    finish_entry(&mut entries, drive, read_only, &filename, too_long);
                    ParseState::FirstChar
                } else {
                    if token.is_ascii_graphic() {
                        if filename.len() == FILENAME_SIZE {
                            too_long = true;
                        } else {
                            filename.push(char::from(token));
                        }
                    }
                    ParseState::Filename
                }
            }
        };
    }

    // Last line might not have a newline on it.
    if state == ParseState::Filename {
        finish_entry(&mut entries, drive, read_only, &filename, too_long);
    }

    debug!("Config file has {} mount lines.", entries.len());
    entries
}

fn finish_entry(entries: &mut Vec<ConfigEntry>, drive: u8, read_only: bool, filename: &str, too_long: bool) {
    if too_long {
        warn!("Config line for drive {drive} has a name that is too long, skipping it.");
        return;
    }
    if filename.is_empty() {
        warn!("Config line for drive {drive} has an empty filename, skipping it.");
        return;
    }
    entries.push(ConfigEntry::new(drive, read_only, filename));
}

/// Rewrite a config file to match what is mounted right now.
///
/// Everything that isn't a drive line is copied over byte for byte. A drive line is
/// replaced with the current mount for that drive, or dropped if the drive is empty.
/// Mounted drives that had no line get one tacked onto the end.
pub fn rewrite_config(original: &[u8], mounted: &[Option<ConfigEntry>; MAX_DISKS]) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::with_capacity(original.len() + 64);
    let mut written = [false; MAX_DISKS];
    let mut state = RewriteState::NewLine;

    for key in original.iter().copied() {
        state = match state {
            RewriteState::NewLine => {
                if key.is_ascii_digit() && usize::from(key - b'0') < MAX_DISKS {
                    // Swap the old drive line for the current one.
                    let drive = usize::from(key - b'0');
                    if let Some(entry) = &mounted[drive] {
                        output.extend_from_slice(entry.to_line().as_bytes());
                        written[drive] = true;
                    }
                    RewriteState::SkipLine
                } else {
                    output.push(key);
                    if key == b'\n' {
                        // Blank line, the next one starts fresh.
                        RewriteState::NewLine
                    } else {
                        RewriteState::CopyLine
                    }
                }
            }
            RewriteState::CopyLine => {
                output.push(key);
                if key == b'\n' {
                    RewriteState::NewLine
                } else {
                    RewriteState::CopyLine
                }
            }
            RewriteState::SkipLine => {
                if key == b'\n' {
                    RewriteState::NewLine
                } else {
                    RewriteState::SkipLine
                }
            }
        };
    }

    // Don't glue new lines onto an unterminated last line.
    if output.last().is_some_and(|last| *last != b'\n') {
        output.push(b'\n');
    }

    for (drive, entry) in mounted.iter().enumerate() {
        if let Some(entry) = entry {
            if !written[drive] {
                output.extend_from_slice(entry.to_line().as_bytes());
            }
        }
    }

    output
}
