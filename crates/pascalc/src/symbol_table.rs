//! The Pascal-S symbol table: identifiers (`tab`), blocks (`btab`) and arrays (`atab`).
//!
//! All three tables are append only and addressed by index. Scopes are tracked with an explicit
//! stack, one marker per open block, so leaving a block never removes its entries.

use pascal_ast_parsing::lexer::{KEYWORDS, LOGICAL_OPERATORS, WORD_ARITHMETIC_OPERATORS};
use pascal_types::{DataType, ObjectKind};
use std::fmt::{Display, Formatter};
use tracing::trace;

/// Number of reserved word entries at the start of `tab`
pub const RESERVED_ENTRIES: usize =
    KEYWORDS.len() + LOGICAL_OPERATORS.len() + WORD_ARITHMETIC_OPERATORS.len();

/// An entry of the identifier table
#[derive(Debug, Clone, PartialEq)]
pub struct TabEntry {
    pub name: String,
    pub kind: ObjectKind,
    pub data_type: DataType,
    /// Index into `btab` for routines and the program, or into `atab` for arrays
    pub reference: Option<usize>,
    /// False only for parameters passed by reference
    pub normal: bool,
    pub level: usize,
    /// Storage offset within the owning block
    pub address: usize,
    /// The previous entry of the same block
    pub link: Option<usize>,
}

/// An entry of the block table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub last: Option<usize>,
    pub last_param: Option<usize>,
    pub param_size: usize,
    pub var_size: usize,
}

/// An entry of the array table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEntry {
    pub index_type: DataType,
    pub element_type: DataType,
    /// The `atab` entry of the element type, when elements are arrays themselves
    pub element_ref: Option<usize>,
    pub low: i64,
    pub high: i64,
    pub element_size: usize,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scope {
    block: usize,
    level: usize,
    next_address: usize,
}

const PROGRAM_SCOPE: Scope = Scope {
    block: 0,
    level: 0,
    next_address: 0,
};

/// The symbol table of a single compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    tab: Vec<TabEntry>,
    btab: Vec<BlockEntry>,
    atab: Vec<ArrayEntry>,
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding the reserved words, with the program block open at level 0
    pub fn new() -> Self {
        let tab = KEYWORDS
            .iter()
            .chain(LOGICAL_OPERATORS.iter())
            .chain(WORD_ARITHMETIC_OPERATORS.iter())
            .map(|word| TabEntry {
                name: word.to_string(),
                kind: ObjectKind::Type,
                data_type: DataType::Void,
                reference: None,
                normal: true,
                level: 0,
                address: 0,
                link: None,
            })
            .collect();
        Self {
            tab,
            btab: vec![BlockEntry::default()],
            atab: vec![],
            scopes: vec![PROGRAM_SCOPE],
        }
    }

    pub fn tab(&self) -> &[TabEntry] {
        &self.tab
    }

    pub fn btab(&self) -> &[BlockEntry] {
        &self.btab
    }

    pub fn atab(&self) -> &[ArrayEntry] {
        &self.atab
    }

    pub fn entry(&self, index: usize) -> Option<&TabEntry> {
        self.tab.get(index)
    }

    pub fn array(&self, index: usize) -> Option<&ArrayEntry> {
        self.atab.get(index)
    }

    /// The current lexical level
    pub fn level(&self) -> usize {
        self.scope().level
    }

    /// The block of the innermost open scope
    pub fn current_block(&self) -> usize {
        self.scope().block
    }

    fn scope(&self) -> &Scope {
        self.scopes.last().unwrap_or(&PROGRAM_SCOPE)
    }

    fn scope_mut(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(PROGRAM_SCOPE);
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Appends an entry to the current block, linking it to the block's previous entry
    fn push(&mut self, mut entry: TabEntry) -> usize {
        let block = self.current_block();
        let index = self.tab.len();
        entry.link = self.btab[block].last;
        trace!(index, name = %entry.name, kind = %entry.kind, level = entry.level, "entering symbol");
        self.tab.push(entry);
        self.btab[block].last = Some(index);
        index
    }

    /// Reserves storage in the current block, returning the address
    fn allocate(&mut self, size: usize) -> usize {
        let scope = self.scope_mut();
        let address = scope.next_address;
        scope.next_address = scope.next_address.saturating_add(size);
        address
    }

    /// The storage size of a value of the given type
    pub fn type_size(&self, data_type: DataType, reference: Option<usize>) -> usize {
        match data_type {
            DataType::Array => reference
                .and_then(|r| self.atab.get(r))
                .map(|array| array.size)
                .unwrap_or(1),
            DataType::Integer | DataType::Boolean | DataType::Char => 1,
            DataType::Real => 2,
            DataType::String => 4,
            DataType::Void => 1,
        }
    }

    /// Enters the program name into the program block
    pub fn enter_program(&mut self, name: &str) -> usize {
        self.push(TabEntry {
            name: name.to_string(),
            kind: ObjectKind::Program,
            data_type: DataType::Void,
            reference: Some(0),
            normal: true,
            level: 0,
            address: 0,
            link: None,
        })
    }

    pub fn enter_constant(&mut self, name: &str, data_type: DataType) -> usize {
        let level = self.level();
        self.push(TabEntry {
            name: name.to_string(),
            kind: ObjectKind::Constant,
            data_type,
            reference: None,
            normal: true,
            level,
            address: 0,
            link: None,
        })
    }

    pub fn enter_type(&mut self, name: &str, data_type: DataType, reference: Option<usize>) -> usize {
        let level = self.level();
        self.push(TabEntry {
            name: name.to_string(),
            kind: ObjectKind::Type,
            data_type,
            reference,
            normal: true,
            level,
            address: 0,
            link: None,
        })
    }

    /// Enters a local variable, allocating its storage in the current block
    pub fn enter_variable(&mut self, name: &str, data_type: DataType, reference: Option<usize>) -> usize {
        let size = self.type_size(data_type, reference);
        let address = self.allocate(size);
        let level = self.level();
        let block = self.current_block();
        let block = &mut self.btab[block];
        block.var_size = block.var_size.saturating_add(size);
        self.push(TabEntry {
            name: name.to_string(),
            kind: ObjectKind::Variable,
            data_type,
            reference,
            normal: true,
            level,
            address,
            link: None,
        })
    }

    /// Enters a value parameter of the routine whose block is open
    pub fn enter_parameter(&mut self, name: &str, data_type: DataType, reference: Option<usize>) -> usize {
        let size = self.type_size(data_type, reference);
        let address = self.allocate(size);
        let level = self.level();
        let block = self.current_block();
        let index = self.push(TabEntry {
            name: name.to_string(),
            kind: ObjectKind::Parameter,
            data_type,
            reference,
            normal: true,
            level,
            address,
            link: None,
        });
        let block = &mut self.btab[block];
        block.param_size = block.param_size.saturating_add(size);
        block.last_param = Some(index);
        index
    }

    /// Enters a procedure or function into the enclosing scope, then opens its block one level
    /// deeper. Returns the routine's `tab` index.
    pub fn enter_routine(&mut self, name: &str, kind: ObjectKind, return_type: DataType) -> usize {
        let level = self.level();
        let block = self.btab.len();
        self.btab.push(BlockEntry::default());
        let index = self.push(TabEntry {
            name: name.to_string(),
            kind,
            data_type: return_type,
            reference: Some(block),
            normal: true,
            level,
            address: 0,
            link: None,
        });
        self.scopes.push(Scope {
            block,
            level: level + 1,
            next_address: 0,
        });
        index
    }

    /// Enters an array type, sizing it from its bounds and element type. Returns the `atab` index.
    pub fn enter_array(
        &mut self,
        index_type: DataType,
        element_type: DataType,
        element_ref: Option<usize>,
        low: i64,
        high: i64,
    ) -> usize {
        let element_size = self.type_size(element_type, element_ref);
        self.atab.push(ArrayEntry {
            index_type,
            element_type,
            element_ref,
            low,
            high,
            element_size,
            size: Self::array_size(element_size, low, high).unwrap_or(usize::MAX),
        });
        self.atab.len() - 1
    }

    /// The total size of an array over `low..high`, or `None` if it doesn't fit in a `usize`.
    /// An empty range has size 0.
    pub fn array_size(element_size: usize, low: i64, high: i64) -> Option<usize> {
        let count = (i128::from(high) - i128::from(low) + 1).max(0);
        usize::try_from(count).ok()?.checked_mul(element_size)
    }

    /// Closes the innermost scope. The program scope is never closed.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Finds the most recently entered visible name.
    ///
    /// Entries are searched newest first and any entry at or above the current level matches,
    /// including locals of routines whose blocks were already closed at the same level.
    pub fn lookup(&self, name: &str) -> Option<(usize, &TabEntry)> {
        let level = self.level();
        (RESERVED_ENTRIES..self.tab.len())
            .rev()
            .map(|index| (index, &self.tab[index]))
            .find(|(_, entry)| entry.name == name && entry.level <= level)
    }

    /// Finds a name among the entries of the current block at the current level
    pub fn lookup_in_current_scope(&self, name: &str) -> Option<(usize, &TabEntry)> {
        let level = self.level();
        let mut next = self.btab[self.current_block()].last;
        while let Some(index) = next {
            let entry = &self.tab[index];
            if entry.name == name && entry.level == level {
                return Some((index, entry));
            }
            next = entry.link;
        }
        None
    }

    /// The parameters of a routine's block, in declaration order
    pub fn parameters(&self, block: usize) -> Vec<&TabEntry> {
        let mut params = vec![];
        let mut next = self.btab.get(block).and_then(|b| b.last_param);
        while let Some(index) = next {
            let entry = &self.tab[index];
            params.push(entry);
            next = entry.link;
        }
        params.reverse();
        params
    }
}

fn optional(index: Option<usize>) -> String {
    index.map_or_else(|| "-".to_string(), |i| i.to_string())
}

/// Prints the three tables as aligned text sections
impl Display for SymbolTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== IDENTIFIER TABLE (tab) ===")?;
        writeln!(
            f,
            "{:<5} {:<16} {:<10} {:<8} {:>4} {:>4} {:>4} {:>4} {:>5}",
            "idx", "id", "obj", "type", "ref", "nrm", "lev", "adr", "link"
        )?;
        for (index, entry) in self.tab.iter().enumerate() {
            writeln!(
                f,
                "{:<5} {:<16} {:<10} {:<8} {:>4} {:>4} {:>4} {:>4} {:>5}",
                index,
                entry.name,
                entry.kind,
                entry.data_type,
                optional(entry.reference),
                u8::from(entry.normal),
                entry.level,
                entry.address,
                optional(entry.link)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "=== BLOCK TABLE (btab) ===")?;
        writeln!(
            f,
            "{:<5} {:>5} {:>8} {:>6} {:>6}",
            "idx", "last", "lastpar", "psize", "vsize"
        )?;
        for (index, block) in self.btab.iter().enumerate() {
            writeln!(
                f,
                "{:<5} {:>5} {:>8} {:>6} {:>6}",
                index,
                optional(block.last),
                optional(block.last_param),
                block.param_size,
                block.var_size
            )?;
        }
        writeln!(f)?;
        writeln!(f, "=== ARRAY TABLE (atab) ===")?;
        writeln!(
            f,
            "{:<5} {:<8} {:<8} {:>6} {:>6} {:>6} {:>7} {:>6}",
            "idx", "xtyp", "etyp", "eref", "low", "high", "elsize", "size"
        )?;
        for (index, array) in self.atab.iter().enumerate() {
            writeln!(
                f,
                "{:<5} {:<8} {:<8} {:>6} {:>6} {:>6} {:>7} {:>6}",
                index,
                array.index_type,
                array.element_type,
                optional(array.element_ref),
                array.low,
                array.high,
                array.element_size,
                array.size
            )?;
        }
        Ok(())
    }
}
