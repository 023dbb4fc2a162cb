use anyhow::Context;
use argh::FromArgs;
use dirtree::Dispatcher;
use dirtree::logging::{self, DEFAULT_LEVEL};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Apply CREATE, LIST, DELETE and MOVE commands to an in-memory directory tree.
struct Args {
    #[argh(positional, default = "PathBuf::from(\"input.txt\")")]
    /// file holding one command per line; defaults to input.txt
    input: PathBuf,

    #[argh(switch, short = 'i')]
    /// read commands from an interactive prompt instead of a file
    interactive: bool,

    #[argh(option, default = "String::from(DEFAULT_LEVEL)")]
    /// log level for diagnostics on stderr (error, warn, info, debug, trace);
    /// the DIRTREE_LOG environment variable overrides it
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    logging::init_logging(&args.log_level)?;

    let mut dispatcher = Dispatcher::new();
    if args.interactive {
        return dispatcher.repl();
    }

    let file = File::open(&args.input)
        .with_context(|| format!("error opening file {}", args.input.display()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatcher.run(BufReader::new(file), &mut out)
}
