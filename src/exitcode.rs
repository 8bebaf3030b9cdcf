//! Process exit codes, taken from BSD `sysexits.h`.
//!
//! A finished game exits 0 whatever the verdict; only failures use these.

/// Bad arguments, e.g. `--case` pointing at a directory
pub const USAGE: i32 = 64;

/// Malformed case file, or a map that breaks the tree rules
pub const DATAERR: i32 = 65;

/// Case file missing or unreadable
pub const NOINPUT: i32 = 66;

/// Out of memory while recording visits
pub const OSERR: i32 = 71;

/// Terminal or config file I/O failed
pub const IOERR: i32 = 74;

pub const CONFIG: i32 = 78;
