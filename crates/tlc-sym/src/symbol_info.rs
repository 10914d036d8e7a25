/// What a name in scope refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolInfo {
    /// A stack-resident local; `stack_offset` is `[rbp - stack_offset]`.
    LocalVar { stack_offset: u32 },
    /// A global bound to a `.data` label.
    GlobalVar { asm_label: String },
    /// One of the four built-in arithmetic operators.
    BuiltinFunc,
    /// A user-defined function, callable via `call <asm_label>`.
    UserFunc { asm_label: String },
    /// `define` and `if`: recognised syntactically, dispatched specially.
    SpecialForm,
}

/// Replaces every character that is not alphanumeric or `_` with `_`.
/// Callers prefix user functions with `user_func_` and globals with `G_`
/// before calling this.
pub fn sanitize_label(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_punctuation_to_underscore() {
        assert_eq!(sanitize_label("add-ten"), "add_ten");
        assert_eq!(sanitize_label("G_z!"), "G_z_");
    }

    #[test]
    fn leaves_clean_identifiers_alone() {
        assert_eq!(sanitize_label("user_func_add"), "user_func_add");
    }
}
