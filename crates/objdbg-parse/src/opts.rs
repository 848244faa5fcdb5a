//! Program-argument parser.
//!
//! Interprets the process's argument vector into a [`ProgramArgs`]
//! configuration. Two flags are recognized, each taking a value: `-f` (a
//! command file to run) and `-R` (an inline command string); they are
//! mutually exclusive. At most one positional argument is accepted and
//! names the pool path to open.
//!
//! Supplying neither flag is not an error: the parser is policy-free and the
//! caller decides what an empty configuration means (the shell treats it as
//! interactive mode).

use std::path::PathBuf;

use objdbg_error::{ObjdbgError, Result};

/// Maximum length in bytes of an inline `-R` command string.
pub const RUN_CMD_MAX: usize = 1024;

/// Maximum length in bytes of a file-system path argument.
pub const ARG_PATH_MAX: usize = 4096;

/// Parsed program configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramArgs {
    /// Path of a command file to run (`-f`).
    pub cmd_file: Option<PathBuf>,
    /// Inline command string to run once (`-R`).
    pub run_cmd: Option<String>,
    /// Pool path to open (positional).
    pub pool_path: Option<PathBuf>,
}

impl ProgramArgs {
    /// Parse an argument vector. `argv[0]` is the program name and ignored.
    pub fn parse<I>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut iter = argv.into_iter();
        let _argv0 = iter.next();

        let mut args = Self::default();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-f" => {
                    if args.cmd_file.is_some() {
                        return Err(ObjdbgError::invalid("`-f` may only be provided once"));
                    }
                    if args.run_cmd.is_some() {
                        return Err(ObjdbgError::invalid("`-f` cannot be combined with `-R`"));
                    }
                    let value = iter
                        .next()
                        .ok_or_else(|| ObjdbgError::invalid("missing file path for `-f`"))?;
                    check_len(&value, ARG_PATH_MAX, "-f")?;
                    args.cmd_file = Some(PathBuf::from(value));
                }
                "-R" => {
                    if args.run_cmd.is_some() {
                        return Err(ObjdbgError::invalid("`-R` may only be provided once"));
                    }
                    if args.cmd_file.is_some() {
                        return Err(ObjdbgError::invalid("`-R` cannot be combined with `-f`"));
                    }
                    let value = iter
                        .next()
                        .ok_or_else(|| ObjdbgError::invalid("missing command string for `-R`"))?;
                    check_len(&value, RUN_CMD_MAX, "-R")?;
                    args.run_cmd = Some(value);
                }
                _ => {
                    if arg.starts_with('-') {
                        return Err(ObjdbgError::invalid(format!("unknown option `{arg}`")));
                    }
                    if args.pool_path.is_some() {
                        return Err(ObjdbgError::invalid(
                            "too many positional arguments; expected at most one pool path",
                        ));
                    }
                    check_len(&arg, ARG_PATH_MAX, "pool path")?;
                    args.pool_path = Some(PathBuf::from(arg));
                }
            }
        }

        Ok(args)
    }
}

fn check_len(value: &str, max: usize, what: &str) -> Result<()> {
    if value.len() > max {
        return Err(ObjdbgError::invalid(format!(
            "value for `{what}` is {} bytes; the limit is {max}",
            value.len()
        )));
    }
    Ok(())
}
