// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Baseband Contributors 2026.

//! Standard error enum for invoking driver operations.

/// Standard errors returned by checked baseband operations.
///
/// The hardware path itself has no failure signaling; these errors are
/// only produced by constructors that validate their inputs before a
/// value ever reaches a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 1,
    /// Underlying system is busy; retry
    BUSY = 2,
    /// An invalid parameter was passed
    INVAL = 3,
    /// Parameter passed was too large
    SIZE = 4,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}
