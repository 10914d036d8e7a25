use crate::error::{CodeGenError, Result};

/// Five append-only text buffers, one per assembly section, concatenated
/// in a fixed order at [`GlobalDataSections::finalize`].
///
/// While a function body is being emitted, writes aimed at `.text` are
/// rerouted into `func` instead, and the buffer is marked busy so that an
/// attempt to start a second, nested function definition is rejected
/// rather than silently interleaving two bodies.
pub struct GlobalDataSections {
    func: String,
    text: String,
    rodata: String,
    data: String,
    bss: String,
    in_function: bool,
}

impl GlobalDataSections {
    pub fn new() -> Self {
        Self {
            func: String::new(),
            text: String::new(),
            rodata: String::new(),
            data: String::new(),
            bss: String::new(),
            in_function: false,
        }
    }

    pub fn enter_function(&mut self) -> Result<()> {
        if self.in_function {
            return Err(CodeGenError::NestedFunctionDefinition);
        }
        self.in_function = true;
        Ok(())
    }

    pub fn exit_function(&mut self) {
        self.in_function = false;
    }

    pub fn write_text(&mut self, line: &str) {
        if self.in_function {
            self.func.push_str(line);
        } else {
            self.text.push_str(line);
        }
    }

    pub fn write_rodata(&mut self, line: &str) {
        self.rodata.push_str(line);
    }

    pub fn write_data(&mut self, line: &str) {
        self.data.push_str(line);
    }

    /// `.bss` is never targeted by any form this language currently
    /// generates, but the buffer is modeled for parity with the other
    /// four sections.
    #[allow(dead_code)]
    pub fn write_bss(&mut self, line: &str) {
        self.bss.push_str(line);
    }

    /// Concatenates the buffers into final NASM source text. Empty
    /// buffers contribute nothing, including their section header.
    pub fn finalize(self) -> String {
        let mut out = String::new();
        if !self.func.is_empty() || !self.text.is_empty() {
            out.push_str("section .text\n");
            out.push_str(&self.func);
            out.push_str(&self.text);
        }
        if !self.rodata.is_empty() {
            out.push_str("section .rodata\n");
            out.push_str(&self.rodata);
        }
        if !self.data.is_empty() {
            out.push_str("section .data\n");
            out.push_str(&self.data);
        }
        if !self.bss.is_empty() {
            out.push_str("section .bss\n");
            out.push_str(&self.bss);
        }
        out
    }
}

impl Default for GlobalDataSections {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sections_contribute_nothing() {
        let sections = GlobalDataSections::new();
        assert_eq!(sections.finalize(), "");
    }

    #[test]
    fn function_body_routes_into_func_ahead_of_text() {
        let mut sections = GlobalDataSections::new();
        sections.write_text("global main\n");
        sections.enter_function().unwrap();
        sections.write_text("user_func_f:\n  ret\n");
        sections.exit_function();
        sections.write_text("main:\n  ret\n");
        let out = sections.finalize();
        assert_eq!(out, "section .text\nuser_func_f:\n  ret\nglobal main\nmain:\n  ret\n");
    }

    #[test]
    fn nested_function_is_rejected() {
        let mut sections = GlobalDataSections::new();
        sections.enter_function().unwrap();
        assert!(sections.enter_function().is_err());
    }

    #[test]
    fn data_and_rodata_get_their_own_headers() {
        let mut sections = GlobalDataSections::new();
        sections.write_rodata("L_double_0: dq 5.0\n");
        sections.write_data("G_z: dq 0\n");
        let out = sections.finalize();
        assert!(out.contains("section .rodata\nL_double_0: dq 5.0\n"));
        assert!(out.contains("section .data\nG_z: dq 0\n"));
    }
}
