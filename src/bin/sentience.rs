use clap::{Parser, Subcommand};
use sentience::{config::InterpreterConfig, session::Session, Error, StdoutSink};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "sentience.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive read-eval loop (default)
    Repl,
    /// Evaluate a script file
    Run {
        file: PathBuf,

        /// Bind this text to `msg` and replay the agent's input handlers
        #[arg(long)]
        input: Option<String>,
    },
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = InterpreterConfig::load_or_default(&cli.config)?;
    info!("config loaded.");
    debug!("config: {:?}", config);

    let mut session = Session::new(&config);
    let mut out = StdoutSink;

    match &cli.command {
        Some(Command::Run { file, input }) => {
            session.run_file(file, input.as_deref(), &mut out)
        }
        Some(Command::Repl) | None => repl(&mut session, &mut out),
    }
}

fn repl(session: &mut Session, out: &mut StdoutSink) -> Result<(), Error> {
    println!("Sentience REPL v{}", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", session.prompt());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        session.feed_line(&line?, out);
    }
    println!();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
