//! Null-terminated C argument vector handed to the engine's startup routine.
//!
//! The engine is permitted to stash the raw pointers and dereference them at
//! any later, unspecified point in the process lifetime, so the backing
//! token strings are deliberately leaked: an arena scoped to process exit.
//! The pointer table itself lives as long as the block (which the launch
//! configuration retains for its whole lifetime).

use std::ffi::{CStr, CString, c_char};
use std::fmt;

use crate::ArgumentSink;
use crate::error::LaunchError;

/// Heap-resident argument vector with a trailing null pointer.
///
/// Invariants: the last pointer is always null, and [`argc`](Self::argc)
/// reports `len − 1` — the terminator stays physically present but is never
/// counted.  The block is write-once: filled while the launch configuration
/// is built, read-only from the moment it is handed to the engine.
pub struct ArgvBlock {
    /// Leaked backing tokens, in argument order.
    tokens: Vec<&'static CStr>,
    /// One pointer per token plus the trailing null.
    ptrs: Vec<*const c_char>,
}

impl ArgvBlock {
    pub fn new() -> Self {
        Self { tokens: Vec::new(), ptrs: vec![std::ptr::null()] }
    }

    /// Number of arguments, excluding the null terminator.
    pub fn argc(&self) -> usize {
        self.ptrs.len() - 1
    }

    /// Raw `argv` view for the engine's C entry point.
    ///
    /// Valid as long as the block is alive and no further tokens are
    /// appended; the pointed-to strings stay valid until process exit.
    pub fn as_ptr(&self) -> *const *const c_char {
        self.ptrs.as_ptr()
    }

    /// Iterate the tokens as UTF-8 strings.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.to_str().unwrap_or_default())
    }

    fn leak_token(token: &str) -> Result<&'static CStr, LaunchError> {
        let token = CString::new(token)?;
        Ok(Box::leak(token.into_boxed_c_str()))
    }

    fn push(&mut self, token: &str) -> Result<(), LaunchError> {
        let leaked = Self::leak_token(token)?;
        // Keep the trailing null in place.
        self.ptrs.insert(self.ptrs.len() - 1, leaked.as_ptr());
        self.tokens.push(leaked);
        Ok(())
    }
}

impl Default for ArgvBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentSink for ArgvBlock {
    fn set_program(&mut self, name: &str) -> Result<(), LaunchError> {
        let leaked = Self::leak_token(name)?;
        if self.tokens.is_empty() {
            self.ptrs.insert(0, leaked.as_ptr());
            self.tokens.push(leaked);
        } else {
            self.ptrs[0] = leaked.as_ptr();
            self.tokens[0] = leaked;
        }
        Ok(())
    }

    fn append_switch(&mut self, switch: &str) -> Result<(), LaunchError> {
        self.push(switch)
    }

    fn append_switch_with_value(
        &mut self,
        switch: &str,
        value: &str,
    ) -> Result<(), LaunchError> {
        self.push(&format!("{switch}={value}"))
    }
}

impl fmt::Debug for ArgvBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ArgvBlock {
        let mut block = ArgvBlock::new();
        block.set_program("engine").unwrap();
        block.append_switch("--no-sandbox").unwrap();
        block.append_switch_with_value("--browser-subprocess-path", "/opt/helper").unwrap();
        block
    }

    #[test]
    fn empty_block_is_just_the_terminator() {
        let block = ArgvBlock::new();
        assert_eq!(block.argc(), 0);
        assert_eq!(block.tokens().count(), 0);
    }

    #[test]
    fn count_excludes_trailing_null() {
        let block = filled();
        assert_eq!(block.argc(), 3);
        assert_eq!(block.ptrs.len(), 4);
        assert!(block.ptrs.last().unwrap().is_null());
    }

    #[test]
    fn tokens_are_ordered() {
        let block = filled();
        let tokens: Vec<_> = block.tokens().collect();
        assert_eq!(
            tokens,
            ["engine", "--no-sandbox", "--browser-subprocess-path=/opt/helper"]
        );
    }

    #[test]
    fn set_program_after_appends_replaces_the_first_token() {
        let mut block = filled();
        block.set_program("renamed").unwrap();
        assert_eq!(block.argc(), 3);
        assert_eq!(block.tokens().next(), Some("renamed"));
    }

    #[test]
    fn interior_nul_is_an_error() {
        let mut block = ArgvBlock::new();
        assert!(matches!(
            block.append_switch("--bad\0switch"),
            Err(LaunchError::Nul(_))
        ));
        // The failed token must not leave a stray pointer behind.
        assert_eq!(block.argc(), 0);
    }

    #[test]
    fn raw_view_matches_tokens() {
        let block = filled();
        let argv = block.as_ptr();
        for i in 0..block.argc() {
            // SAFETY: every non-terminator entry points at a leaked,
            // NUL-terminated token.
            let token = unsafe { CStr::from_ptr(*argv.add(i)) };
            assert_eq!(token.to_str().unwrap(), block.tokens().nth(i).unwrap());
        }
        // SAFETY: the table holds argc + 1 pointers; the last is the null
        // terminator.
        assert!(unsafe { *argv.add(block.argc()) }.is_null());
    }
}
