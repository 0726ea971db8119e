// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Size of the legacy fixed error buffer. [`ModeError::brief`] never exceeds it.
pub const ERROR_MESSAGE_CAPACITY: usize = 256;

/// Coarse grouping of [`ModeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Allocation,
    Malformed,
    Type,
    Runtime,
}

/// The main error type for reading and projecting mode group configs.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeError {
    /// Raised when a config file is missing or unreadable.
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    AllocationError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a quoted scalar is not closed before the end of its line.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    NestingTooDeep {
        depth: usize,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    LineTooLong {
        length: usize,
        limit: usize,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    RuntimeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ModeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ModeError::FileError { .. } => ErrorCategory::Io,
            ModeError::AllocationError { .. } => ErrorCategory::Allocation,
            ModeError::UnclosedString { .. }
            | ModeError::NestingTooDeep { .. }
            | ModeError::LineTooLong { .. } => ErrorCategory::Malformed,
            ModeError::TypeError { .. } | ModeError::PathNotFound { .. } => ErrorCategory::Type,
            ModeError::RuntimeError { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.category() == ErrorCategory::Malformed
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ModeError::FileError { code, .. }
            | ModeError::AllocationError { code, .. }
            | ModeError::UnclosedString { code, .. }
            | ModeError::NestingTooDeep { code, .. }
            | ModeError::LineTooLong { code, .. }
            | ModeError::TypeError { code, .. }
            | ModeError::PathNotFound { code, .. }
            | ModeError::RuntimeError { code, .. } => *code,
        }
    }

    /// The display message cut down to [`ERROR_MESSAGE_CAPACITY`] bytes.
    ///
    /// Hosts that hand errors back through a fixed-size buffer can use this
    /// directly; the cut always lands on a char boundary.
    pub fn brief(&self) -> String {
        let mut message = self.to_string();
        if message.len() > ERROR_MESSAGE_CAPACITY {
            let mut cut = ERROR_MESSAGE_CAPACITY;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        message
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::FileError { message, path, hint, code } =>
                write!(f, "[MODECFG] File Error '{}': {}{}", path, message, suffix(hint, code)),
            ModeError::AllocationError { message, hint, code } =>
                write!(f, "[MODECFG] Allocation Error: {}{}", message, suffix(hint, code)),
            ModeError::UnclosedString { quote, line, column, hint, code } =>
                write!(f, "[MODECFG] Unclosed string starting with '{}' at {}:{}{}",
                    quote, line, column, suffix(hint, code)),
            ModeError::NestingTooDeep { depth, line, hint, code } =>
                write!(f, "[MODECFG] Nesting deeper than {} levels at line {}{}",
                    depth, line, suffix(hint, code)),
            ModeError::LineTooLong { length, limit, line, hint, code } =>
                write!(f, "[MODECFG] Line {} is {} characters long (limit {}){}",
                    line, length, limit, suffix(hint, code)),
            ModeError::TypeError { message, line, column, hint, code } =>
                write!(f, "[MODECFG] Type Error at {}:{}: {}{}", line, column, message, suffix(hint, code)),
            ModeError::PathNotFound { path, hint, code } =>
                write!(f, "[MODECFG] Path '{}' not found{}", path, suffix(hint, code)),
            ModeError::RuntimeError { message, hint, code } =>
                write!(f, "[MODECFG] Runtime Error: {}{}", message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for ModeError {}
