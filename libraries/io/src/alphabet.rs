use std::collections::HashMap;

use automata::Symbol;

use crate::SectionError;

/// Translates between symbol names and symbol identifiers.
///
/// The on-the-fly variant assigns fresh identifiers to names in first-seen
/// order; the fixed variant only accepts names present in its translation
/// table.
#[derive(Debug, Clone)]
pub enum Alphabet {
    OnTheFly {
        symbol_map: HashMap<String, Symbol>,
        symbol_names: Vec<String>,
    },
    Fixed {
        symbol_map: HashMap<String, Symbol>,
        symbol_names: HashMap<Symbol, String>,
    },
}

impl Alphabet {
    /// Creates an empty alphabet that assigns identifiers as names appear.
    pub fn on_the_fly() -> Alphabet {
        Alphabet::OnTheFly {
            symbol_map: HashMap::new(),
            symbol_names: Vec::new(),
        }
    }

    /// Creates an alphabet with a fixed translation table.
    pub fn fixed(symbol_map: HashMap<String, Symbol>) -> Alphabet {
        let symbol_names = symbol_map
            .iter()
            .map(|(name, &symbol)| (symbol, name.clone()))
            .collect();

        Alphabet::Fixed {
            symbol_map,
            symbol_names,
        }
    }

    /// Returns the identifier for the given symbol name, assigning a fresh
    /// one in the on-the-fly variant. An unknown name in the fixed variant
    /// is a translation error.
    pub fn translate_symbol(&mut self, name: &str) -> Result<Symbol, SectionError> {
        match self {
            Alphabet::OnTheFly {
                symbol_map,
                symbol_names,
            } => {
                if let Some(&symbol) = symbol_map.get(name) {
                    return Ok(symbol);
                }

                let symbol = symbol_names.len();
                symbol_map.insert(name.to_string(), symbol);
                symbol_names.push(name.to_string());
                Ok(symbol)
            }
            Alphabet::Fixed { symbol_map, .. } => {
                symbol_map
                    .get(name)
                    .copied()
                    .ok_or(SectionError::Translation {
                        kind: "symbol",
                        identifier: name.to_string(),
                    })
            }
        }
    }

    /// Returns the name of the given symbol, if it has one.
    pub fn symbol_name(&self, symbol: Symbol) -> Option<&str> {
        match self {
            Alphabet::OnTheFly { symbol_names, .. } => {
                symbol_names.get(symbol).map(String::as_str)
            }
            Alphabet::Fixed { symbol_names, .. } => {
                symbol_names.get(&symbol).map(String::as_str)
            }
        }
    }

    /// Returns the number of named symbols.
    pub fn num_of_symbols(&self) -> usize {
        match self {
            Alphabet::OnTheFly { symbol_names, .. } => symbol_names.len(),
            Alphabet::Fixed { symbol_names, .. } => symbol_names.len(),
        }
    }
}
