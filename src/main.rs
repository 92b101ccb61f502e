use std::process;

use log::error;

use histoprep::cli::build_cli;
use histoprep::commands::{CommandFactory, HistoprepCommandFactory};
use histoprep::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();
    let verbose = matches.get_flag("verbose");

    let logger = if matches.get_flag("no-log-file") {
        Logger::init_console_logger(verbose);
        Logger::disabled()
    } else {
        if let Err(e) = Logger::init_global_logger("histoprep-global.log", verbose) {
            eprintln!("Error setting up global logger: {}", e);
            process::exit(1);
        }
        match Logger::new("histoprep.log") {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error initializing logger: {}", e);
                process::exit(1);
            }
        }
    };

    let factory = HistoprepCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
