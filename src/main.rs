use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use std::process::exit;

use transgo::ast::parser as dump_parser;
use transgo::diagnostic::ErrorFormatter;
use transgo::error::Error;
use transgo::frontend::{self, FrontendOptions};
use transgo::goast::printer::Printer;
use transgo::program::Program;
use transgo::transpiler;

/// Command-line arguments for the C-to-Go translator.
#[derive(ClapParser)]
#[command(version, about = "Translates C source into compilable Go", long_about = None)]
struct Cli {
    /// The input C file, or a pre-made syntax-tree dump with --from-dump
    input_file: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Treat the input as an already-produced syntax-tree dump
    #[arg(long)]
    from_dump: bool,

    /// Path of the clang binary to invoke
    #[arg(long, default_value = "clang")]
    clang: String,

    /// Define a macro for the front-end
    #[arg(short = 'D', long)]
    define: Vec<String>,

    /// Add an include path for the front-end
    #[arg(short = 'I', long)]
    include_path: Vec<String>,

    /// Package name of the emitted Go file
    #[arg(long, default_value = "main")]
    package: String,

    /// Import path of the hand-written C runtime
    #[arg(long, default_value = transgo::program::DEFAULT_RUNTIME_IMPORT)]
    runtime_import: String,

    /// Treat translation warnings as errors
    #[arg(long)]
    warnings_as_errors: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();

    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let dump = if cli.from_dump {
        fs::read_to_string(&cli.input_file)?
    } else {
        let options = FrontendOptions {
            clang: cli.clang.clone(),
            defines: cli.define.clone(),
            include_paths: cli.include_path.clone(),
        };
        frontend::ast_dump(&options, &cli.input_file)?
    };

    let root = match dump_parser::parse(&dump) {
        Ok(root) => root,
        Err(err) => {
            // Hard failure: render the offending line before bailing out.
            if let dump_parser::DumpError::Malformed { line, reason, text } = &err {
                let formatter = ErrorFormatter::default();
                eprintln!("{}", formatter.format_dump_error(reason, text, *line));
            }
            return Err(err.into());
        }
    };

    let mut program = Program::new();
    program.package_name = cli.package.clone();
    program.runtime_import = cli.runtime_import.clone();
    program.diagnostics.warnings_as_errors = cli.warnings_as_errors;
    if !cli.from_dump {
        program.input_file = Some(cli.input_file.to_string_lossy().into_owned());
    }

    let file = transpiler::transpile(&mut program, &root)?;

    program.diagnostics.print_diagnostics();
    if program.diagnostics.has_errors() {
        exit(1);
    }

    let text = Printer::new().print_file(&file);
    match &cli.output_file {
        Some(path) => fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}
