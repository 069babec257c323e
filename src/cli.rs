use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::compiler::{emit::Generator, parser::ParserError, CompileError};

// Exit Codes for different types of errors
pub const ERR_CONFIGURATION: i32 = 1;
pub const ERR_SEMANTIC_ERROR: i32 = 2;
pub const ERR_PARSER_ERROR: i32 = 3;
pub const ERR_WRITE_ERROR: i32 = 4;
pub const ERR_LEXER_ERROR: i32 = 5;

/// The process exit code for an error that stopped compilation
pub fn exit_code(err: &CompileError) -> i32 {
    match err {
        CompileError::Source(..) => ERR_CONFIGURATION,
        CompileError::Parser(e) => match e.inner() {
            ParserError::Lexical(_) => ERR_LEXER_ERROR,
            _ => ERR_PARSER_ERROR,
        },
        CompileError::Semantic(_) => ERR_SEMANTIC_ERROR,
    }
}

pub fn configure_cli() -> clap::App<'static, 'static> {
    let app = App::new("Blob Compiler")
        .version("0.1.0")
        .author("Erich Ess")
        .about("Compiles blob struct and constant declarations into matching assembler and C layout descriptions")
        .arg(
            Arg::with_name("input")
                .index(1)
                .required(true)
                .help("Source file to compile"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(true)
                .help("Name the output file that the generated code will be written to"),
        )
        .arg(
            Arg::with_name("generator")
                .short("g")
                .long("generator")
                .takes_value(true)
                .required(true)
                .possible_values(&Generator::NAMES)
                .help("The kind of output to generate: 68k assembler EQU statements or a C header"),
        )
        .arg(
            Arg::with_name("include")
                .short("I")
                .long("include")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("A directory to search for included files.  May be given more than once; directories are searched in order after the directory of the including file."),
        )
        .arg(
            Arg::with_name("emit-layout")
                .long("emit-layout")
                .takes_value(true)
                .help("Also write a JSON report of every struct layout and constant value to the given file"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .takes_value(true)
                .help("Writes compiler diagnostics at the given level and above to stderr"),
        );
    app
}

pub fn get_generator(args: &ArgMatches) -> Option<Generator> {
    args.value_of("generator").and_then(Generator::from_name)
}

pub fn get_include_dirs<'a>(args: &'a ArgMatches) -> Vec<&'a str> {
    match args.values_of("include") {
        None => vec![],
        Some(dirs) => dirs.collect(),
    }
}

pub fn get_log_level(args: &ArgMatches) -> Option<LevelFilter> {
    match args.value_of("log-level") {
        Some("off") => Some(LevelFilter::Off),
        Some("error") => Some(LevelFilter::Error),
        Some("warn") => Some(LevelFilter::Warn),
        Some("info") => Some(LevelFilter::Info),
        Some("debug") => Some(LevelFilter::Debug),
        Some("trace") => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn configure_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
