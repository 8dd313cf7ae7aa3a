//! CLI Exit Code Registry
//!
//! Single source of truth for `trainset` exit codes. They are part of the
//! shell contract: the cron/CI wrapper that invokes the binary branches on
//! them to decide whether the training step runs.
//!
//! # Exit Code Ranges
//!
//! | Code | Description                                            |
//! |------|--------------------------------------------------------|
//! | 0    | Success                                                |
//! | 1    | General error (unspecified)                            |
//! | 2    | CLI usage error (bad args)                             |
//! | 3    | Invalid assembly config                                |
//! | 4    | Runtime error (unreadable file, unparseable batch)     |
//! | 5    | Assembled set below min_samples - skip training        |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// A batch file could not be read or parsed at the document level.
pub const EXIT_RUNTIME: u8 = 4;

/// Too few records assembled (including zero) to train on.
/// Not a failure; tells the scheduler to skip this cycle.
pub const EXIT_BELOW_MIN: u8 = 5;
