use crate::symbol_info::SymbolInfo;
use crate::symbol_map::SymbolMap;

struct Scope {
    map: SymbolMap,
    current_stack_offset: u32,
}

/// A chain of scopes anchored at the global scope. Scopes nest only inside
/// a single function body, so a plain stack (rather than a parent-pointer
/// arena) gives the exact LIFO destruction the design calls for: `exit_scope`
/// really does drop the child's bindings, it does not just move a cursor.
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                map: SymbolMap::new(),
                current_stack_offset: 0,
            }],
        }
    }

    pub fn is_global(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Pushes a new scope whose stack-offset counter continues from the
    /// parent's. Never call this at global scope — scopes only nest inside
    /// one function body.
    pub fn enter_scope(&mut self) {
        let parent_offset = self.scopes.last().expect("global scope always present").current_stack_offset;
        self.scopes.push(Scope {
            map: SymbolMap::new(),
            current_stack_offset: parent_offset,
        });
    }

    /// Pops and destroys the current scope. A no-op at global scope.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Inserts `name` into the current scope. If `info` is a `LocalVar`, its
    /// stack offset is assigned here (overwriting whatever the caller put
    /// in the variant) by incrementing the scope's offset counter by 8.
    /// Returns the assigned offset, or 0 for anything that isn't a local.
    pub fn define(&mut self, name: &str, info: SymbolInfo) -> u32 {
        let scope = self.scopes.last_mut().expect("global scope always present");
        let (info, offset) = match info {
            SymbolInfo::LocalVar { .. } => {
                scope.current_stack_offset += 8;
                let offset = scope.current_stack_offset;
                (SymbolInfo::LocalVar { stack_offset: offset }, offset)
            }
            other => (other, 0),
        };
        scope.map.insert(name.to_string(), info);
        offset
    }

    /// Searches the current scope, then its ancestors, for `name`.
    pub fn lookup(&self, name: &str) -> Option<&SymbolInfo> {
        for scope in self.scopes.iter().rev() {
            if let Some(info) = scope.map.lookup(name) {
                return Some(info);
            }
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
