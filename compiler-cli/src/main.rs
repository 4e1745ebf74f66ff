#![warn(rust_2018_idioms)]
#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::use_self,
    clippy::use_debug
)]

mod input;

use crate::input::ProgramInput;
use ast::ProgramBuilder;
use compiler_shared::{context::Context, timing::AsciiDisp};
use failure::{Error, Fail, ResultExt};
use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
    process::exit,
};
use strtab::StringTable;
use structopt::StructOpt;
use termcolor::{ColorChoice, StandardStream};
use type_checking::{ElaborationOptions, StrictCheck, StrictChecks};

#[derive(Debug, Fail)]
pub enum CliError {
    #[fail(display = "cannot open input file {:?}", path)]
    OpenInput { path: PathBuf },
    #[fail(display = "cannot parse program tree in {:?}", path)]
    MalformedInput { path: PathBuf },
    #[fail(display = "cannot write report")]
    WriteReport,
}

#[derive(StructOpt)]
#[structopt(name = "elaborate")]
pub struct CliCommand {
    /// Program tree serialised as JSON.
    #[structopt(name = "FILE", parse(from_os_str))]
    input: PathBuf,
    /// Log the class table after all classes were collected.
    #[structopt(long = "dump-class-table")]
    dump_class_table: bool,
    /// Log the scope of every method before its body is checked.
    #[structopt(long = "dump-method-tables")]
    dump_method_tables: bool,
    /// Do not report declared but unreferenced variables.
    #[structopt(long = "no-unused")]
    no_unused: bool,
    /// Enable all strict checks.
    #[structopt(long = "strict")]
    strict: bool,
    /// Enable a single strict check: return-type, new-object-class or
    /// not-operand. Can be given multiple times.
    #[structopt(long = "strict-check", raw(number_of_values = "1"))]
    strict_checks: Vec<StrictCheck>,
    /// Print how long the elaboration phases took to stderr.
    #[structopt(long = "emit-timings")]
    emit_timings: bool,
    /// Raise the log level (-v info, -vv debug). `RUST_LOG` takes
    /// precedence.
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbosity: u8,
}

impl CliCommand {
    fn options(&self) -> ElaborationOptions {
        let mut strict = if self.strict {
            StrictChecks::all()
        } else {
            StrictChecks::default()
        };
        for check in &self.strict_checks {
            strict.enable(*check);
        }

        ElaborationOptions {
            dump_class_table: self.dump_class_table,
            dump_method_tables: self.dump_method_tables,
            report_unused: !self.no_unused,
            strict,
        }
    }

    fn default_log_level(&self) -> &'static str {
        let dumping = self.dump_class_table || self.dump_method_tables;
        match self.verbosity {
            0 if !dumping => "warn",
            0 | 1 => "info",
            _ => "debug",
        }
    }
}

fn main() {
    let cmd = CliCommand::from_args();

    match do_main(&cmd) {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(msg) => exit_with_error(&msg),
    }
}

/// Returns whether the program elaborated without errors.
fn do_main(cmd: &CliCommand) -> Result<bool, Error> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cmd.default_log_level()),
    )
    .init();

    let input = read_input(cmd)?;

    let mut strtab = StringTable::new();
    let program = input.build(&mut ProgramBuilder::new(&mut strtab));
    log::debug!(
        "loaded {} classes from {}",
        program.classes.len(),
        cmd.input.display()
    );

    let context = Context::new();
    let elaboration = type_checking::check(&program, &context, &cmd.options());

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    context.diagnostics.write_to(&mut stderr)?;
    context.diagnostics.write_statistics(&mut stderr)?;

    if !elaboration.unused.is_empty() {
        let stdout = io::stdout();
        write!(stdout.lock(), "{}", elaboration.unused).context(CliError::WriteReport)?;
    }

    if cmd.emit_timings {
        write!(stderr, "{}", AsciiDisp(&context.timings.snapshot()))?;
    }
    context.timings.print()?;

    Ok(!context.diagnostics.errored())
}

fn read_input(cmd: &CliCommand) -> Result<ProgramInput, Error> {
    let file = File::open(&cmd.input).context(CliError::OpenInput {
        path: cmd.input.clone(),
    })?;
    let input = serde_json::from_reader(BufReader::new(file)).context(CliError::MalformedInput {
        path: cmd.input.clone(),
    })?;
    Ok(input)
}

/// Print an error in a format intended for end users and terminate
/// the program.
fn exit_with_error(err: &Error) -> ! {
    let mut stderr = io::stderr();
    print_error(&mut stderr, err).expect("unable to print error");
    exit(1);
}

/// Print error objects in a format intended for end users
fn print_error(writer: &mut dyn io::Write, err: &Error) -> Result<(), Error> {
    writeln!(writer, "error: {}", err.as_fail())?;
    for cause in err.iter_causes() {
        writeln!(writer, "caused by: {}", cause)?;
    }
    Ok(())
}
