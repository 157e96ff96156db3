use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use brdoc_address::{Cep, CepResolver};
use brdoc_core::DocumentKind;

/// Exit code for syntactically valid invocations whose input failed
/// validation or resolution. Malformed invocations exit with clap's
/// usage-error code (2).
const EXIT_INVALID: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "brdoc",
    version,
    about = "Validate and generate Brazilian documents",
    after_help = "KINDS:\n  cpf, cnpj, cnh, cns, plate  validate or generate a document\n  cep                         resolve a postal code to an address"
)]
struct Cli {
    /// Document kind keyword, or `cep` for postal-code resolution.
    kind: String,

    /// Value to validate. For document kinds, omit it to generate a new
    /// valid document instead.
    value: Option<String>,

    /// Produce no output; communicate only through the exit code.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    if cli.kind.eq_ignore_ascii_case("cep") {
        return run_cep(cli).await;
    }

    let Some(kind) = DocumentKind::from_keyword(&cli.kind) else {
        if !cli.quiet {
            eprintln!("unknown document kind: {}", cli.kind);
            eprintln!("expected one of: cpf, cnpj, cnh, cns, plate, cep");
        }
        return ExitCode::from(EXIT_USAGE);
    };

    match cli.value {
        Some(value) => validate(kind, &value, cli.quiet),
        None => generate(kind, cli.quiet),
    }
}

fn validate(kind: DocumentKind, value: &str, quiet: bool) -> ExitCode {
    match kind.canonicalize(value) {
        Ok(canonical) => {
            if !quiet {
                println!("{canonical}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(%err, "validation rejected input");
            if !quiet {
                eprintln!("{kind} {value} is invalid");
            }
            ExitCode::from(EXIT_INVALID)
        }
    }
}

fn generate(kind: DocumentKind, quiet: bool) -> ExitCode {
    let mut rng = rand::rng();
    let value = kind.generate(&mut rng);
    if !quiet {
        println!("{value}");
    }
    ExitCode::SUCCESS
}

async fn run_cep(cli: Cli) -> ExitCode {
    let Some(value) = cli.value else {
        if !cli.quiet {
            eprintln!("cep requires a postal code to resolve");
        }
        return ExitCode::from(EXIT_USAGE);
    };

    let cep = match Cep::parse(&value) {
        Ok(cep) => cep,
        Err(err) => {
            if !cli.quiet {
                eprintln!("{err}");
            }
            return ExitCode::from(EXIT_INVALID);
        }
    };

    let resolver = CepResolver::new();
    match resolver.resolve(&cep).await {
        Ok(address) => {
            if !cli.quiet {
                match serde_json::to_string_pretty(&address) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(err) => eprintln!("failed to render address: {err}"),
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if !cli.quiet {
                eprintln!("{err}");
            }
            ExitCode::from(EXIT_INVALID)
        }
    }
}
