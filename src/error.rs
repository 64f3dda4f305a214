//! Crate-wide error types.
//!
//! The CPU core itself only has two fatal conditions (an opcode outside the
//! documented instruction set, or an addressing mode resolver invoked in a
//! context that doesn't support it — both indicate a bug in the dispatch
//! table, never a reachable runtime state for a well-formed ROM). The
//! remaining variants belong to the iNES loader used by the CLI harness.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unimplemented opcode ${0:02X}")]
    UnimplementedOpcode(u8),

    #[error("addressing mode {mode} has no resolver for {resolver}")]
    UnsupportedAddressingResolver {
        mode: &'static str,
        resolver: &'static str,
    },

    #[error("failed to parse iNES ROM: {0}")]
    RomParse(String),
}
