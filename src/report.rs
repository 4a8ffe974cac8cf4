use colored::Colorize;

use crate::semantic::symbol_table::{Storage, Symbol, SymbolTable};

/// Renders the final symbol table, one line per variable in declaration
/// order: `x : int = 11` or `a : int[3] = [0, 5, 0]`.
pub struct Report {
    color: bool,
}

impl Report {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, symbols: &SymbolTable) -> String {
        symbols
            .iter()
            .map(|symbol| self.render_symbol(symbol))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_symbol(&self, symbol: &Symbol) -> String {
        let name = if self.color {
            symbol.name.blue().to_string()
        } else {
            symbol.name.clone()
        };

        match &symbol.storage {
            Storage::Scalar(num) => format!("{} : {} = {}", name, symbol.ty, num),
            Storage::Array(elems) => format!(
                "{} : {}[{}] = [{}]",
                name,
                symbol.ty,
                elems.len(),
                elems
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::semantic::r#type::PrimitiveType;
    use crate::semantic::value::{LValue, Number};

    #[test]
    fn test_render_plain() {
        let mut symbols = SymbolTable::new();
        symbols.declare("x", PrimitiveType::Int, 1).unwrap();
        symbols
            .declare("a", PrimitiveType::Float, 2)
            .unwrap()
            .make_array(2);
        symbols
            .store(&LValue::Element("a".to_string(), 1), Number::Float(1.5))
            .unwrap();

        assert_eq!(
            Report::new(false).render(&symbols),
            "x : int = 0\na : float[2] = [0.0, 1.5]"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Report::new(false).render(&SymbolTable::new()), "");
    }
}
