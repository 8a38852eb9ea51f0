use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use arith_eval::{DEFAULT_MAX_DEPTH, EvalError, Evaluator, Lexer};
use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;
use miette::WrapErr;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate arithmetic expressions")]
struct Args {
    /// Deepest nesting of parentheses, signs and `**` chains to accept
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the tokens of an expression
    Tokenize {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Evaluate a single expression
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Evaluate every non-blank line of a file
    Run { filename: PathBuf },
    /// Read expressions from stdin, one per line
    Repl,
}

fn report(e: EvalError) {
    eprintln!("{:?}", miette::Report::new(e));
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Tokenize { expression } => {
            for token in Lexer::new(None, &expression) {
                match token {
                    Ok(token) => println!("{token}"),
                    Err(e) => {
                        report(e);
                        std::process::exit(65);
                    }
                }
            }
            println!("EOF");
        }
        Commands::Eval { expression } => {
            match Evaluator::new(None, &expression)
                .with_max_depth(args.max_depth)
                .evaluate_all()
            {
                Ok(value) => println!("{value}"),
                Err(e) => {
                    report(e);
                    std::process::exit(65);
                }
            }
        }
        Commands::Run { filename } => {
            let file_contents = fs::read_to_string(&filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;
            let name = filename.to_str();

            let mut failed = false;
            for (i, line) in file_contents.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match Evaluator::new(name, line)
                    .with_max_depth(args.max_depth)
                    .evaluate_all()
                {
                    Ok(value) => println!("{value}"),
                    Err(e) => {
                        eprintln!("[line {}] Error: {e}", i + 1);
                        report(e);
                        failed = true;
                    }
                }
            }
            if failed {
                std::process::exit(65);
            }
        }
        Commands::Repl => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let mut lines = stdin.lock().lines();
            loop {
                write!(stdout, "> ").into_diagnostic()?;
                stdout.flush().into_diagnostic()?;
                let Some(line) = lines.next() else {
                    break;
                };
                let line = line.into_diagnostic().wrap_err("reading stdin failed")?;
                if line.trim().is_empty() {
                    continue;
                }
                match Evaluator::new(None, &line)
                    .with_max_depth(args.max_depth)
                    .evaluate_all()
                {
                    Ok(value) => println!("{value}"),
                    Err(e) => report(e),
                }
            }
        }
    }
    Ok(())
}
