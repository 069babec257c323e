extern crate log;
extern crate simplelog;

use std::fs::File;
use std::io::Write;
use std::process::exit;
use std::time::Instant;

use log::info;

use blobc::compiler::{compile, emit::layout};
use blobc::*;

fn main() {
    let config = configure_cli().get_matches();

    if let Some(level) = get_log_level(&config) {
        if let Err(e) = configure_logging(level) {
            eprintln!("Failed to configure logger: {}", e);
            exit(ERR_CONFIGURATION)
        }
    }

    // clap has already checked that these were given and are valid
    let (input, output, generator) = match (
        config.value_of("input"),
        config.value_of("output"),
        get_generator(&config),
    ) {
        (Some(input), Some(output), Some(generator)) => (input, output, generator),
        _ => {
            eprintln!("{}", config.usage());
            exit(ERR_CONFIGURATION)
        }
    };

    let include_dirs = get_include_dirs(&config);
    let sources = FileSystemSources::new(include_dirs.as_slice());

    let compile_time = Instant::now();
    let result = match compile(&sources, input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            exit(exit_code(&e))
        }
    };
    info!("Compile: {}", compile_time.elapsed().as_secs_f32());

    // Nothing is written until every output has been generated
    let mut text = vec![];
    if let Err(e) = generator.generate(&result, &mut text) {
        eprintln!("{}", e);
        exit(ERR_WRITE_ERROR)
    }

    let mut report = vec![];
    let layout_target = config.value_of("emit-layout");
    if layout_target.is_some() {
        if let Err(e) = layout::generate(&result, &mut report) {
            eprintln!("{}", e);
            exit(ERR_WRITE_ERROR)
        }
    }

    if let Err(e) = write_file(output, &text) {
        eprintln!("{}: {}", output, e);
        exit(ERR_WRITE_ERROR)
    }
    info!("Wrote {} output to {}", generator.name(), output);

    if let Some(target) = layout_target {
        if let Err(e) = write_file(target, &report) {
            eprintln!("{}: {}", target, e);
            exit(ERR_WRITE_ERROR)
        }
        info!("Wrote layout report to {}", target);
    }
}

fn write_file(path: &str, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.flush()
}
