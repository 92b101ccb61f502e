//! Command-line definition
//!
//! Running without arguments prepares the dataset from the default
//! locations.

use clap::{Arg, ArgAction, Command as ClapCommand};

pub fn build_cli() -> ClapCommand {
    ClapCommand::new("histoprep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Cut DeepLIIF, MoNuSeg and PanNuke slides into IHC / H&E training patches")
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file overriding the built-in settings")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output root for trainA/testA/trainB/testB")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("deepliif")
                .long("deepliif")
                .help("DeepLIIF dataset root (IHC)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("monuseg")
                .long("monuseg")
                .help("MoNuSeg dataset root (H&E)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("pannuke")
                .long("pannuke")
                .help("PanNuke dataset root holding the fold directories (H&E)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("shuffle-seed")
                .long("shuffle-seed")
                .help("Seed the H&E shuffle so the split is reproducible")
                .value_name("SEED")
                .required(false),
        )
        .arg(
            Arg::new("inspect")
                .long("inspect")
                .help("Check that a PanNuke fold loads and write preview samples")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-log-file")
                .long("no-log-file")
                .help("Log to the console only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}
