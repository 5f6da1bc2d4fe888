//! Lexemes to instruction records.
//!
//! The steps run in a fixed order over the whole program and collect errors
//! instead of stopping at the first one. Instruction generation only runs when
//! every earlier step came out clean.

mod addressing;
mod classify;
mod directives;
mod generate;
mod labels;
mod macros;
pub mod token;

use crate::error::{self, Error};
use crate::record::Record;
use crate::token::Lexeme;
use indexmap::IndexMap;
use token::Line;

pub struct Resolver {
    lexemes: Vec<Lexeme>,
    /// lowercase name -> value
    macros: IndexMap<String, u16>,
    /// lowercase name -> row of declaration; the label index is the insertion position
    labels: IndexMap<String, usize>,
    errors: Vec<Error>,
}

impl Resolver {
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Resolver {
            lexemes,
            macros: IndexMap::new(),
            labels: IndexMap::new(),
            errors: Vec::new(),
        }
    }

    /// Run all steps. The macro and label tables stay readable afterwards.
    pub fn resolve(&mut self) -> Result<Vec<Record>, Vec<Error>> {
        let lexemes = std::mem::take(&mut self.lexemes);
        let lines = classify::group(lexemes);
        let mut lines = self.classify(lines);
        self.define_macros(&mut lines);
        self.check_numbers(&lines);
        self.collect_org(&mut lines);
        self.collect_data(&mut lines);
        self.resolve_labels(&mut lines);
        self.check_heads(&lines);
        log::debug!(
            "resolver: {} lines, {} macros, {} labels",
            lines.len(),
            self.macros.len(),
            self.labels.len()
        );
        if !self.errors.is_empty() {
            return Err(error::sorted(std::mem::take(&mut self.errors)));
        }

        let records = self.generate(&lines);
        if !self.errors.is_empty() {
            return Err(error::sorted(std::mem::take(&mut self.errors)));
        }
        log::debug!("resolver: {} records", records.len());
        Ok(records)
    }

    pub fn macros(&self) -> &IndexMap<String, u16> {
        &self.macros
    }

    pub fn labels(&self) -> &IndexMap<String, usize> {
        &self.labels
    }

    /// Label names in index order.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.keys().cloned().collect()
    }

    fn error(&mut self, error: Error) {
        log::trace!("resolver: {error}");
        self.errors.push(error);
    }

    /// Report the token at `idx` (or the end of line) as not being `expected`.
    fn expected(&mut self, line: &Line, idx: usize, expected: &'static str) {
        let (pos, found) = line.found(idx);
        self.error(Error::Expected(pos, expected, found));
    }
}
