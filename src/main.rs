use std::io;
use std::process::ExitCode;
use std::thread::JoinHandle;
use word_assist::cli::{CliInterface, parse_cli};
use word_assist::logging::{default_log_path, init_logging};
use word_assist::tui::TuiInterface;
use word_assist::wordbank::{Dictionary, join_load, spawn_load};
use word_assist::{ConstraintFilter, GameInterface, session_loop};

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path, cli.verbose)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
    }

    let source = cli.wordbank_source();
    let loader = match spawn_load(source.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start loading the word bank: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The front end is set up while the word list loads
    let result = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        run(loader, &mut interface)
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => run(loader, &mut interface),
            Err(e) => {
                eprintln!("Failed to initialize the terminal: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to load word bank from '{source}': {e}");
            ExitCode::FAILURE
        }
    }
}

fn run<I: GameInterface>(
    loader: JoinHandle<io::Result<Dictionary>>,
    interface: &mut I,
) -> io::Result<()> {
    let dictionary = join_load(loader)?;
    let mut filter = ConstraintFilter::new(dictionary);
    session_loop(&mut filter, interface);
    Ok(())
}
