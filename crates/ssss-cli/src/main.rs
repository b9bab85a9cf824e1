//! `ssss` command line tool: prompt for a secret and emit shares, or
//! prompt for shares and recover the secret.

use clap::{Args, Parser, Subcommand};
use rand::rngs::OsRng;
use ssss::{secret, Combiner, SecretFormat, Share, Splitter};
use std::io::{self, BufRead, Write};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "ssss",
    about = "Split and combine secrets using Shamir's Secret Sharing Scheme",
    disable_help_subcommand = true
)]
struct Cli {
    /// Print the version and exit.
    #[arg(short = 'v', long = "version", global = true)]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prompt for a secret and generate shares for it.
    Split(SplitArgs),
    /// Prompt for shares and recover the secret.
    Combine(CombineArgs),
}

#[derive(Args)]
struct SplitArgs {
    /// Number of shares needed to reconstruct the secret.
    #[arg(short = 't', default_value_t = 2)]
    threshold: usize,

    /// Total number of shares to generate.
    #[arg(short = 'n', default_value_t = 3)]
    shares: usize,

    /// Security level in bits; 0 derives it from the secret length.
    #[arg(short = 's', default_value_t = 0)]
    security: usize,

    /// Token to prefix every share with.
    #[arg(short = 'w')]
    token: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CombineArgs {
    /// Number of shares to read.
    #[arg(short = 't', default_value_t = 2)]
    threshold: usize,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Read and write the secret as hex instead of ASCII.
    #[arg(short = 'x')]
    hex: bool,

    /// Suppress prompts and informational output.
    #[arg(short = 'q')]
    quiet: bool,

    /// Suppress prompts, informational output and warnings.
    #[arg(short = 'Q')]
    quiet_all: bool,

    /// Disable the diffusion layer.
    #[arg(short = 'D')]
    no_diffusion: bool,
}

impl CommonArgs {
    fn format(&self) -> SecretFormat {
        if self.hex {
            SecretFormat::Hex
        } else {
            SecretFormat::Ascii
        }
    }

    fn quiet(&self) -> bool {
        self.quiet || self.quiet_all
    }
}

fn main() {
    let cli = Cli::parse();
    if cli.version {
        println!("ssss {}", env!("CARGO_PKG_VERSION"));
        return;
    }
    let Some(command) = cli.command else {
        println!("Usage: ssss [OPTIONS] <split|combine>");
        println!("Try 'ssss split -h' or 'ssss combine -h' for details.");
        return;
    };

    let common = match &command {
        Command::Split(args) => &args.common,
        Command::Combine(args) => &args.common,
    };
    tracing_subscriber::fmt()
        .with_max_level(if common.quiet_all {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let result = match command {
        Command::Split(args) => run_split(args),
        Command::Combine(args) => run_combine(args),
    };
    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run_split(args: SplitArgs) -> ssss::Result<()> {
    let format = args.common.format();
    let quiet = args.common.quiet();

    let splitter = Splitter::new(args.threshold, args.shares)?
        .with_security(args.security)?
        .with_format(format)
        .with_diffusion(!args.common.no_diffusion)
        .with_token(args.token)?;

    if !quiet {
        let level = if args.security > 0 {
            format!("a {} bit", args.security)
        } else {
            "dynamic".to_string()
        };
        println!(
            "Generating shares using a ({},{}) scheme with {} security level.",
            args.threshold, args.shares, level
        );
        let max = if args.security > 0 {
            args.security
        } else {
            ssss_math::gf2::MAX_DEGREE
        };
        match format {
            SecretFormat::Hex => print!("Enter the secret, at most {} hex digits: ", max / 4),
            SecretFormat::Ascii => {
                print!("Enter the secret, at most {} ASCII characters: ", max / 8)
            }
        }
        io::stdout().flush()?;
    }

    let line = read_line(&mut io::stdin().lock())?;
    if args.security == 0 && !quiet {
        let degree = secret::dynamic_degree(&line, format);
        if ssss_math::gf2::degree_valid(degree) {
            println!("Using a {degree} bit security level.");
        }
    }

    let shares = splitter.split(&line, &mut OsRng)?;
    let index_width = args.shares.to_string().len();
    for share in &shares {
        println!("{}", share.render(index_width));
    }
    Ok(())
}

fn run_combine(args: CombineArgs) -> ssss::Result<()> {
    let format = args.common.format();
    let quiet = args.common.quiet();

    let combiner = Combiner::new(args.threshold)?.with_diffusion(!args.common.no_diffusion);

    if !quiet {
        println!("Enter {} shares separated by newlines:", args.threshold);
    }
    let mut stdin = io::stdin().lock();
    let mut shares = Vec::with_capacity(args.threshold);
    for i in 0..args.threshold {
        if !quiet {
            print!("Share [{}/{}]: ", i + 1, args.threshold);
            io::stdout().flush()?;
        }
        let line = read_line(&mut stdin)?;
        shares.push(line.trim().parse::<Share>()?);
    }

    let recovered = combiner.combine(&shares)?;
    let rendered = recovered.render(format);
    if quiet {
        println!("{rendered}");
    } else {
        println!("Resulting secret: {rendered}");
    }
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> ssss::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ssss::Error::IOFailure(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no input",
        )));
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
