//! Command-line front-end for `sanctions-screen`.
//!
//! The binary is a thin layer over the library: it parses flags into an
//! immutable [`sanctions_screen::ScreenConfig`], sets up logging and
//! terminal output, and maps fatal errors to exit codes.

pub mod cli;
pub mod logging;

pub use cli::{BatchArgs, Cli, Commands, SearchArgs};

use sanctions_screen::ScreenError;

/// Exit code for fatal errors other than a missing name list.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code when no usable name was resolved from any source.
pub const EXIT_NO_NAMES: u8 = 2;

/// Map a fatal command error to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ScreenError>() {
        Some(ScreenError::NoNames) => EXIT_NO_NAMES,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanctions_screen::LoadError;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_for_no_names() {
        let err = anyhow::Error::new(ScreenError::NoNames);
        assert_eq!(exit_code(&err), EXIT_NO_NAMES);
    }

    #[test]
    fn test_exit_code_for_other_fatal_errors() {
        let err = anyhow::Error::new(ScreenError::Load(LoadError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }));
        assert_eq!(exit_code(&err), EXIT_FAILURE);

        let err = anyhow::anyhow!("failed to open events log");
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }
}
