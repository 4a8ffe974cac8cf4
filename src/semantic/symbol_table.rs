use ordermap::map::Entry;
use ordermap::OrderMap;

use super::r#type::PrimitiveType;
use super::value::{LValue, Number};
use super::SemanticErrorKind;

/// Largest element count an array declaration may ask for.
pub const MAX_ARRAY_SIZE: i64 = 1 << 20;

#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Scalar(Number),
    Array(Vec<Number>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: PrimitiveType,
    pub storage: Storage,
    pub decl_line: usize,
}

impl Symbol {
    /// Turns a freshly declared scalar into a zeroed array of `size` elements.
    pub fn make_array(&mut self, size: usize) {
        self.storage = Storage::Array(vec![Number::zero(self.ty); size]);
    }

    fn check_index(&self, index: i64) -> Result<usize, SemanticErrorKind> {
        let Storage::Array(elems) = &self.storage else {
            return Err(SemanticErrorKind::NotAnArray {
                name: self.name.clone(),
                decl_line: self.decl_line,
            });
        };
        usize::try_from(index)
            .ok()
            .filter(|i| *i < elems.len())
            .ok_or_else(|| SemanticErrorKind::IndexOutOfBounds {
                name: self.name.clone(),
                index,
                size: elems.len(),
            })
    }

    fn elements(&self) -> &[Number] {
        match &self.storage {
            Storage::Array(elems) => elems,
            Storage::Scalar(num) => std::slice::from_ref(num),
        }
    }

    /// Resolves `name[index]` to a place, failing if this symbol is a scalar
    /// or the index falls outside `[0, size)`.
    pub fn element_place(&self, index: i64) -> Result<LValue, SemanticErrorKind> {
        let index = self.check_index(index)?;
        Ok(LValue::Element(self.name.clone(), index))
    }
}

/// Every declared variable, in declaration order. There is a single flat
/// scope, so a name can be declared at most once.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: OrderMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: OrderMap::new(),
        }
    }

    /// Inserts a zero-initialised scalar. The returned entry can be turned
    /// into an array once the declaration's `[NUM]` suffix has been read.
    pub fn declare(
        &mut self,
        name: &str,
        ty: PrimitiveType,
        decl_line: usize,
    ) -> Result<&mut Symbol, SemanticErrorKind> {
        match self.symbols.entry(name.to_string()) {
            Entry::Occupied(entry) => Err(SemanticErrorKind::DuplicateDeclaration {
                name: name.to_string(),
                prev_line: entry.get().decl_line,
            }),
            Entry::Vacant(entry) => Ok(entry.insert(Symbol {
                name: name.to_string(),
                ty,
                storage: Storage::Scalar(Number::zero(ty)),
                decl_line,
            })),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Symbol, SemanticErrorKind> {
        self.symbols
            .get(name)
            .ok_or_else(|| SemanticErrorKind::UndeclaredVariable(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Symbol, SemanticErrorKind> {
        self.symbols
            .get_mut(name)
            .ok_or_else(|| SemanticErrorKind::UndeclaredVariable(name.to_string()))
    }

    /// Reads the current contents of a place. Arrays are only readable one
    /// element at a time.
    pub fn load(&self, place: &LValue) -> Result<Number, SemanticErrorKind> {
        let symbol = self.get(place.name())?;
        match (place, &symbol.storage) {
            (LValue::Scalar(_), Storage::Scalar(num)) => Ok(*num),
            (LValue::Scalar(_), Storage::Array(_)) => Err(SemanticErrorKind::ArrayWithoutIndex {
                name: symbol.name.clone(),
            }),
            (LValue::Element(_, index), _) => {
                let index = symbol.check_index(*index as i64)?;
                Ok(symbol.elements()[index])
            }
        }
    }

    /// Writes `num` into a place. The value must have exactly the declared
    /// type of the target variable.
    pub fn store(&mut self, place: &LValue, num: Number) -> Result<(), SemanticErrorKind> {
        let symbol = self.get_mut(place.name())?;

        if symbol.ty != num.ty() {
            return Err(SemanticErrorKind::TypeMismatch {
                op: format!("assignment to `{}`", place),
                lhs: symbol.ty,
                rhs: num.ty(),
            });
        }

        let (name, decl_line) = (symbol.name.clone(), symbol.decl_line);
        match (place, &mut symbol.storage) {
            (LValue::Scalar(_), Storage::Scalar(slot)) => *slot = num,
            (LValue::Scalar(_), Storage::Array(_)) => {
                return Err(SemanticErrorKind::ArrayWithoutIndex { name })
            }
            (LValue::Element(_, index), Storage::Array(elems)) => {
                let size = elems.len();
                let slot = elems
                    .get_mut(*index)
                    .ok_or(SemanticErrorKind::IndexOutOfBounds {
                        name,
                        index: *index as i64,
                        size,
                    })?;
                *slot = num;
            }
            (LValue::Element(..), Storage::Scalar(_)) => {
                return Err(SemanticErrorKind::NotAnArray { name, decl_line })
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}
