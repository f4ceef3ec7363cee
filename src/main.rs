use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    thread,
};

use clap::Parser;
use tracing::{Level, debug};
use treelox::{
    error::{EXIT_IO_ERROR, EXIT_SYNTAX_ERROR, LoxError},
    interpreter::{
        evaluator::core::{Config, DEFAULT_MAX_CALL_DEPTH, Interpreter},
        lexer::scan,
        parser::parse,
    },
    run_source,
};

/// Deep recursion in a script turns into deep recursion here, so the
/// interpreter gets a far bigger stack than the main thread.
const INTERPRETER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Stack left unbudgeted for the frames below the outermost call.
const STACK_RESERVE: usize = 8 * 1024 * 1024;

/// treelox runs Lox scripts, or reads them line by line from an interactive
/// prompt when no script is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Parse only, printing every statement as an S-expression.
    #[arg(long, requires = "script")]
    print_ast: bool,

    /// How deeply function calls may nest before failing with a stack
    /// overflow error.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Log more: once for debug output, twice for tracing every statement.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_writer(io::stderr)
                             .with_max_level(level)
                             .with_target(false)
                             .init();

    let worker = thread::Builder::new().name("interpreter".to_string())
                                       .stack_size(INTERPRETER_STACK_SIZE)
                                       .spawn(move || run(&args));

    match worker.map(thread::JoinHandle::join) {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Failed to start the interpreter thread: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> ExitCode {
    let config = Config { max_call_depth: args.max_call_depth,
                          stack_budget:   INTERPRETER_STACK_SIZE - STACK_RESERVE, };

    match &args.script {
        Some(path) if args.print_ast => print_ast(path),
        Some(path) => run_file(path, config),
        None => run_prompt(config),
    }
}

fn read_script(path: &Path) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
                                eprintln!("Failed to read the script '{}': {e}", path.display());
                                ExitCode::from(EXIT_IO_ERROR)
                            })
}

fn run_file(path: &Path, config: Config) -> ExitCode {
    let source = match read_script(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    debug!(script = %path.display(), bytes = source.len(), "running script");

    let mut interpreter = Interpreter::with_config(io::stdout(), config);
    let result = run_source(&source, &mut interpreter);
    if let Err(e) = interpreter.into_output().flush() {
        eprintln!("Failed to flush output: {e}");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        },
    }
}

fn print_ast(path: &Path) -> ExitCode {
    let source = match read_script(path) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let (tokens, mut errors) = scan(&source);
    let program = parse(&tokens);
    for statement in &program.statements {
        println!("{statement}");
    }

    errors.extend(program.errors);
    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", LoxError::Syntax(errors));
        ExitCode::from(EXIT_SYNTAX_ERROR)
    }
}

/// Reads and runs one line at a time against a single interpreter, so
/// earlier definitions stay visible. Errors are reported and the session
/// carries on until end of input.
fn run_prompt(config: Config) -> ExitCode {
    let mut interpreter = Interpreter::with_config(io::stdout(), config);
    let mut lines = io::stdin().lock().lines();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush output: {e}");
            return ExitCode::from(EXIT_IO_ERROR);
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Failed to read input: {e}");
                return ExitCode::from(EXIT_IO_ERROR);
            },
            None => break,
        };

        if let Err(e) = run_source(&line, &mut interpreter) {
            eprintln!("{e}");
        }
    }

    println!();
    ExitCode::SUCCESS
}
