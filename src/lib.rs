use lexer::token::Token;
use lexer::Lexer;
use parser::Parser;
use semantic::symbol_table::SymbolTable;

pub mod lexer;
pub mod parser;
pub mod report;
pub mod semantic;

/// Parses `input` and evaluates it in the same pass, returning the symbol
/// table as the program leaves it. The first error aborts everything.
pub fn check(input: &str, debug: bool) -> anyhow::Result<SymbolTable> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?.debug(debug);

    parser.program()?;
    let symbols = parser.into_symbols();

    if debug {
        eprintln!("Symbols: {symbols:#?}");
    }

    Ok(symbols)
}

pub fn tokenize(input: &str) -> anyhow::Result<Vec<Token>> {
    Ok(Lexer::new(input).tokenize()?)
}
