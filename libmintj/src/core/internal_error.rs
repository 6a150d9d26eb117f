// Copyright 2026 Neil Henderson
//
//! The `internal_error` module defines a macro to emit an Internal Compiler Error (ICE).

/// Generates an internal compiler error.
///
/// Every failure in this crate is a programmer error: the type checker is
/// trusted, so a bad lookup or a malformed tree means a bug in the compiler
/// itself, not in the source program. There is no recovery and no partial
/// output.
#[macro_export]
macro_rules! ICE {
    ($($arg:tt)*) => {
        std::panic!("MintJ ICE: {}\n\n\
        This is a bug in the MintJ compiler, not in the compiled program.\n\
        Please report it with a minimal source file that reproduces the problem.\n",
        format_args!($($arg)*))
    }
}
