use clap::Parser;
use cminus::lexer::LexerError;
use cminus::parser::ParseError;
use cminus::report::Report;
use cminus::{check, tokenize};
use colored::Colorize;
use std::fs;
use std::io::IsTerminal;
use std::path::Path;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path of input source file
    file: String,

    /// Trace matched tokens and evaluated expressions to stderr
    #[arg(long, short)]
    debug: bool,

    /// Print the token stream and exit
    #[arg(long)]
    tokens: bool,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let path = Path::new(&cli.file);
    let text = fs::read_to_string(path)?;

    if cli.tokens {
        match tokenize(&text) {
            Ok(tokens) => tokens.iter().for_each(|token| {
                println!("{:>4}  {:<16} {:?}", token.line, token.tok_type.as_str(), token.lexeme)
            }),
            Err(err) => report_error(err),
        }
        return Ok(());
    }

    match check(&text, cli.debug) {
        Ok(symbols) => {
            println!("Parsing completed successfully!");
            let report = Report::new(std::io::stdout().is_terminal()).render(&symbols);
            if !report.is_empty() {
                println!("{}", report);
            }
            Ok(())
        }
        Err(err) => report_error(err),
    }
}

fn report_error(err: anyhow::Error) -> ! {
    let err_msg = err.to_string();

    let token = err
        .downcast::<LexerError>()
        .map(|le| le.token)
        .or_else(|err| err.downcast::<ParseError>().map(|pe| pe.token));

    match token {
        Ok(token) => eprintln!(
            "{}",
            format!("error: {} (at {:?})", err_msg, token.lexeme).red()
        ),
        Err(err) => eprintln!("{}", format!("error: {:#}", err).red()),
    }

    std::process::exit(1);
}
