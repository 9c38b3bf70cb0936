//! Exit code constants for the termlock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Metadata store failure (unreadable or unwritable state)
//! - 3: Operation refused by a lock guard (the 403 equivalent)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or uninitialized state directory.
pub const USER_ERROR: i32 = 1;

/// The metadata store could not be read or written.
pub const STORE_FAILURE: i32 = 2;

/// A guard refused the requested operation.
pub const REFUSED: i32 = 3;
