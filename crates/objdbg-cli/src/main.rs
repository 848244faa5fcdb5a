use std::ffi::OsString;
use std::io::{self, BufRead, ErrorKind, Write};

use objdbg_error::{ObjdbgError, Result};
use objdbg_parse::{parse_tree_path, tokenize, ProgramArgs};
use objdbg_types::{Level, TreePath};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "objdbg> ";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = run(std::env::args_os(), &mut input, &mut stdout, &mut stderr);
    drop(input);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// What the shell should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Quit,
}

fn run<I, R, W, E>(args: I, input: &mut R, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let argv = args
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned());
    let options = match ProgramArgs::parse(argv) {
        Ok(options) => options,
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            let _ = write_usage(err);
            return error.exit_code();
        }
    };

    if let Some(pool) = options.pool_path.as_deref() {
        tracing::debug!(pool = %pool.display(), "pool path supplied");
    }

    if let Some(command) = options.run_cmd.as_deref() {
        return match run_line(command, out) {
            Ok(_) => 0,
            Err(error) => {
                let _ = writeln!(err, "error: {error}");
                error.exit_code()
            }
        };
    }

    if let Some(path) = options.cmd_file.as_deref() {
        return run_command_file(path, out, err);
    }

    run_repl(input, out, err)
}

/// Run each line of a command file, stopping at the first failure. Blank
/// lines and `#` comment lines are skipped.
fn run_command_file<W, E>(path: &std::path::Path, out: &mut W, err: &mut E) -> i32
where
    W: Write,
    E: Write,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            let _ = writeln!(err, "error: failed reading command file `{}`: {error}", path.display());
            return ObjdbgError::from(error).exit_code();
        }
    };

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match run_line(trimmed, out) {
            Ok(LineOutcome::Continue) => {}
            Ok(LineOutcome::Quit) => return 0,
            Err(error) => {
                let _ = writeln!(err, "error: {error}");
                return error.exit_code();
            }
        }
    }
    0
}

fn run_repl<R, W, E>(input: &mut R, out: &mut W, err: &mut E) -> i32
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut line_buffer = String::new();

    loop {
        if write!(out, "{PROMPT}").and_then(|()| out.flush()).is_err() {
            return 1;
        }

        line_buffer.clear();
        let bytes_read = match input.read_line(&mut line_buffer) {
            Ok(bytes_read) => bytes_read,
            Err(error) if error.kind() == ErrorKind::Interrupted => {
                // Keep the shell alive on Ctrl-C style interrupts.
                let _ = writeln!(out);
                continue;
            }
            Err(error) => {
                let _ = writeln!(err, "error: {error}");
                return 1;
            }
        };

        if bytes_read == 0 {
            return 0;
        }

        let line = line_buffer.trim_end_matches(['\n', '\r']);
        match run_line(line, out) {
            Ok(LineOutcome::Continue) => {}
            Ok(LineOutcome::Quit) => return 0,
            Err(error) => {
                // A bad line does not end an interactive session.
                let _ = writeln!(err, "error: {error}");
            }
        }
    }
}

/// Tokenize one input line and dispatch its command word.
fn run_line<W>(line: &str, out: &mut W) -> Result<LineOutcome>
where
    W: Write,
{
    let words = tokenize(line)?;
    let Some(command) = words.first() else {
        return Ok(LineOutcome::Continue);
    };
    tracing::debug!(command = %command, words = words.len(), "dispatch");

    match command.as_str() {
        "help" => {
            write_help(out)?;
            Ok(LineOutcome::Continue)
        }
        "quit" | "exit" => Ok(LineOutcome::Quit),
        "parse" => {
            if words.len() > 2 {
                return Err(ObjdbgError::invalid(
                    "parse takes at most one address argument",
                ));
            }
            let path = parse_tree_path(words.get(1).map(String::as_str))?;
            write_path(&path, out)?;
            Ok(LineOutcome::Continue)
        }
        other => Err(ObjdbgError::unknown_command(other)),
    }
}

fn write_path<W>(path: &TreePath, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "path: {path}")?;
    write_level(out, "container", &path.cont)?;
    write_level(out, "object", &path.oid)?;
    write_level(out, "dkey", &path.dkey)?;
    write_level(out, "akey", &path.akey)?;
    write_level(out, "extent", &path.recx)?;
    Ok(())
}

fn write_level<W, T>(out: &mut W, name: &str, level: &Level<T>) -> io::Result<()>
where
    W: Write,
    T: std::fmt::Display,
{
    match level {
        Level::Unset => Ok(()),
        Level::Value(v) => writeln!(out, "  {name:<9} {v}"),
        Level::Index(i) => writeln!(out, "  {name:<9} [{i}]"),
    }
}

fn write_usage<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Usage: objdbg [POOL_PATH] [-R COMMAND | -f FILE]\n\
         \n\
         Examples:\n\
         \n\
         objdbg\n\
         objdbg /mnt/pool/vos-0\n\
         objdbg -R \"parse [0]/[0]\"\n\
         objdbg -f commands.txt\n",
    )
}

fn write_help<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Commands:\n\
         \n\
         help               Show this help\n\
         parse [ADDRESS]    Parse a hierarchy address and show each level\n\
         quit               Exit the shell\n\
         exit               Exit the shell\n\
         \n\
         An address is up to five `/`-separated segments:\n\
         CONT_UUID/HI.LO/DKEY/AKEY/{{START-END}}\n\
         Any segment may instead be an index `[N]` into its parent.\n",
    )
}
