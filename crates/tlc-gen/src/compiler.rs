use crate::error::{CodeGenError, Result};
use crate::sections::GlobalDataSections;
use tlc_par::{Atom, Expr, ExprKind};
use tlc_sym::{sanitize_label, SymbolInfo, SymbolTable};

const ARG_REGISTERS: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

/// Walks the AST and emits NASM text into [`GlobalDataSections`], driving
/// the symbol table across scope entry/exit as it goes. `next_label_id` is
/// the process-wide `L_double_*` counter threaded through here instead of
/// kept as a true global, since a `Compiler` lives for exactly one
/// compilation.
pub struct Compiler {
    symtab: SymbolTable,
    sections: GlobalDataSections,
    next_label_id: u64,
}

impl Compiler {
    pub fn new() -> Self {
        let mut symtab = SymbolTable::new();
        populate_global_scope(&mut symtab);
        Self {
            symtab,
            sections: GlobalDataSections::new(),
            next_label_id: 0,
        }
    }

    fn new_label_id(&mut self) -> u64 {
        let id = self.next_label_id;
        self.next_label_id += 1;
        id
    }

    /// Compiles an entire program to final NASM source text.
    pub fn compile_program(mut self, program: &[Expr]) -> Result<String> {
        self.sections.write_text("global main\n");
        self.sections.write_text("extern lisp_add\n");
        self.sections.write_text("extern lisp_subtract\n");
        self.sections.write_text("extern lisp_multiply\n");
        self.sections.write_text("extern lisp_divide\n");
        self.sections.write_text("extern lisp_make_number\n\n");

        self.sections.write_text("main:\n");
        self.sections.write_text("  push rbp\n");
        self.sections.write_text("  mov rbp, rsp\n");

        for expr in program {
            self.compile_expr(expr)?;
        }

        self.sections.write_text("  mov rax, 0\n");
        self.sections.write_text("  mov rsp, rbp\n");
        self.sections.write_text("  pop rbp\n");
        self.sections.write_text("  ret\n");

        Ok(self.sections.finalize())
    }

    fn compile_expr(&mut self, expr: &Expr) -> Result<()> {
        match &expr.kind {
            ExprKind::Atom(atom) => self.compile_atom(atom),
            ExprKind::List(items) => self.compile_list(items),
            ExprKind::Error(message) => Err(CodeGenError::Unparsable(message.clone())),
        }
    }

    fn compile_atom(&mut self, atom: &Atom) -> Result<()> {
        match atom {
            Atom::Number(value) => {
                let id = self.new_label_id();
                let label = format!("L_double_{id}");
                self.sections
                    .write_rodata(&format!("{label}: dq {}\n", format_double_literal(*value)));
                self.sections
                    .write_text(&format!("  movsd xmm0, [rel {label}]\n"));
                self.sections.write_text("  call lisp_make_number\n");
                Ok(())
            }
            Atom::Symbol(name) => match self.symtab.lookup(name).cloned() {
                Some(SymbolInfo::LocalVar { stack_offset }) => {
                    self.sections
                        .write_text(&format!("  mov rax, [rbp - {stack_offset}]\n"));
                    Ok(())
                }
                Some(SymbolInfo::GlobalVar { asm_label }) => {
                    self.sections
                        .write_text(&format!("  mov rax, [{asm_label}]\n"));
                    Ok(())
                }
                _ => Err(CodeGenError::UndefinedSymbol(name.clone())),
            },
            Atom::String(_) => Err(CodeGenError::StringNotImplemented),
        }
    }

    fn compile_list(&mut self, items: &[Expr]) -> Result<()> {
        let Some(head) = items.first() else {
            return Err(CodeGenError::EmptyList);
        };
        let Some(name) = head.as_symbol() else {
            return Err(CodeGenError::NonSymbolHead);
        };
        let info = self
            .symtab
            .lookup(name)
            .cloned()
            .ok_or_else(|| CodeGenError::UndefinedSymbol(name.to_string()))?;

        match info {
            SymbolInfo::SpecialForm if name == "define" => self.compile_define(items),
            SymbolInfo::SpecialForm if name == "if" => Err(CodeGenError::IfNotImplemented),
            SymbolInfo::SpecialForm => Err(CodeGenError::UndefinedSymbol(name.to_string())),
            SymbolInfo::BuiltinFunc => self.compile_builtin_call(name, &items[1..]),
            SymbolInfo::UserFunc { asm_label } => self.compile_user_call(&asm_label, &items[1..]),
            SymbolInfo::LocalVar { .. } | SymbolInfo::GlobalVar { .. } => {
                Err(CodeGenError::NotCallable(name.to_string()))
            }
        }
    }

    fn compile_define(&mut self, items: &[Expr]) -> Result<()> {
        if items.len() < 3 {
            return Err(CodeGenError::InvalidDefineSyntax);
        }
        let target = &items[1];
        if let Some(name) = target.as_symbol() {
            if items.len() != 3 {
                return Err(CodeGenError::InvalidDefineSyntax);
            }
            self.compile_define_variable(name, &items[2])
        } else if let Some(signature) = target.as_list() {
            self.compile_define_function(signature, &items[2..])
        } else {
            Err(CodeGenError::InvalidDefineSyntax)
        }
    }

    fn compile_define_variable(&mut self, name: &str, value: &Expr) -> Result<()> {
        self.compile_expr(value)?;
        if self.symtab.is_global() {
            let label = format!("G_{}", sanitize_label(name));
            self.sections.write_data(&format!("{label}: dq 0\n"));
            self.symtab.define(
                name,
                SymbolInfo::GlobalVar {
                    asm_label: label.clone(),
                },
            );
            self.sections.write_text("  push rax\n");
            self.sections.write_text("  pop rbx\n");
            self.sections.write_text(&format!("  mov [{label}], rbx\n"));
            self.sections.write_text("  mov rax, rbx\n");
        } else {
            let offset = self
                .symtab
                .define(name, SymbolInfo::LocalVar { stack_offset: 0 });
            self.sections
                .write_text(&format!("  mov [rbp - {offset}], rax\n"));
            self.sections.write_text("  mov rax, 0\n");
        }
        Ok(())
    }

    fn compile_define_function(&mut self, signature: &[Expr], body: &[Expr]) -> Result<()> {
        let Some(fname) = signature.first().and_then(Expr::as_symbol) else {
            return Err(CodeGenError::InvalidDefineSyntax);
        };
        let mut params = Vec::with_capacity(signature.len() - 1);
        for param in &signature[1..] {
            params.push(param.as_symbol().ok_or(CodeGenError::InvalidDefineSyntax)?);
        }
        if params.len() > 6 {
            return Err(CodeGenError::TooManyParameters {
                name: fname.to_string(),
                count: params.len(),
            });
        }
        if body.is_empty() {
            return Err(CodeGenError::InvalidDefineSyntax);
        }

        let asm_label = format!("user_func_{}", sanitize_label(fname));
        self.symtab.define(
            fname,
            SymbolInfo::UserFunc {
                asm_label: asm_label.clone(),
            },
        );

        self.sections.enter_function()?;
        self.symtab.enter_scope();

        let param_offsets: Vec<u32> = params
            .iter()
            .map(|p| self.symtab.define(p, SymbolInfo::LocalVar { stack_offset: 0 }))
            .collect();
        let locals = count_local_defines(body);
        let frame_slots = params.len() + locals;

        self.sections.write_text(&format!("{asm_label}:\n"));
        self.sections.write_text("  push rbp\n");
        self.sections.write_text("  mov rbp, rsp\n");
        if frame_slots > 0 {
            self.sections
                .write_text(&format!("  sub rsp, {}\n", 8 * frame_slots));
        }
        for (offset, reg) in param_offsets.iter().zip(ARG_REGISTERS.iter()) {
            self.sections
                .write_text(&format!("  mov [rbp - {offset}], {reg}\n"));
        }

        for form in body {
            self.compile_expr(form)?;
        }

        self.sections.write_text("  mov rsp, rbp\n");
        self.sections.write_text("  pop rbp\n");
        self.sections.write_text("  ret\n");

        self.symtab.exit_scope();
        self.sections.exit_function();

        // The value of a function definition itself is undefined/zero.
        self.sections.write_text("  mov rax, 0\n");
        Ok(())
    }

    fn compile_builtin_call(&mut self, op: &str, args: &[Expr]) -> Result<()> {
        if args.len() != 2 {
            return Err(CodeGenError::ArityMismatch {
                op: op.to_string(),
                expected: 2,
                found: args.len(),
            });
        }
        let runtime_fn = match op {
            "+" => "lisp_add",
            "-" => "lisp_subtract",
            "*" => "lisp_multiply",
            "/" => "lisp_divide",
            _ => unreachable!("only + - * / are registered as BuiltinFunc"),
        };
        self.compile_expr(&args[1])?;
        self.sections.write_text("  push rax\n");
        self.compile_expr(&args[0])?;
        self.sections.write_text("  mov rdi, rax\n");
        self.sections.write_text("  pop rsi\n");
        self.sections.write_text(&format!("  call {runtime_fn}\n"));
        Ok(())
    }

    fn compile_user_call(&mut self, asm_label: &str, args: &[Expr]) -> Result<()> {
        if args.len() > 6 {
            return Err(CodeGenError::TooManyParameters {
                name: asm_label.to_string(),
                count: args.len(),
            });
        }
        for arg in args {
            self.compile_expr(arg)?;
            self.sections.write_text("  push rax\n");
        }
        for reg in ARG_REGISTERS[..args.len()].iter().rev() {
            self.sections.write_text(&format!("  pop {reg}\n"));
        }
        self.sections.write_text(&format!("  call {asm_label}\n"));
        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn populate_global_scope(symtab: &mut SymbolTable) {
    symtab.define("define", SymbolInfo::SpecialForm);
    symtab.define("if", SymbolInfo::SpecialForm);
    for op in ["+", "-", "*", "/"] {
        symtab.define(op, SymbolInfo::BuiltinFunc);
    }
}

/// Counts body-level `(define symbol value)` forms, ignoring nested
/// function definitions — only the parameter count and this tally
/// determine the frame size.
fn count_local_defines(body: &[Expr]) -> usize {
    body.iter()
        .filter(|expr| match expr.as_list() {
            Some(items) => {
                items.len() == 3
                    && items[0].as_symbol() == Some("define")
                    && items[1].as_symbol().is_some()
            }
            None => false,
        })
        .count()
}

/// NASM's `dq` directive only produces an IEEE-754 double when the literal
/// contains a decimal point; a bare integer literal like `dq 5` encodes the
/// 64-bit integer 5, not the bit pattern for 5.0.
fn format_double_literal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Compiles a full program to the final, concatenated NASM source text.
pub fn compile_program(program: &[Expr]) -> Result<String> {
    Compiler::new().compile_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlc_par::Parser;

    fn compile(source: &str) -> Result<String> {
        let mut parser = Parser::new(source);
        let program = parser.parse_program().expect("test source must parse");
        compile_program(&program)
    }

    #[test]
    fn empty_program_has_bare_main() {
        let asm = compile("").unwrap();
        assert!(asm.contains("main:\n"));
        assert!(asm.trim_end().ends_with("ret"));
        assert!(!asm.contains("user_func_"));
    }

    #[test]
    fn global_binding_stores_into_data_section() {
        let asm = compile("(define z (+ 5 10))").unwrap();
        assert!(asm.contains("section .data\nG_z: dq 0\n"));
        assert_eq!(asm.matches("call lisp_make_number").count(), 2);
        assert!(asm.contains("call lisp_add"));
        assert!(asm.contains("mov rdi, rax"));
        assert!(asm.contains("pop rsi"));
        assert!(asm.contains("pop rbx"));
        assert!(asm.contains("mov [G_z], rbx"));
    }

    #[test]
    fn user_function_definition_and_call() {
        let asm = compile(
            "(define (add-ten x) (+ x 10))\n(define result (add-ten 5))",
        )
        .unwrap();
        assert!(asm.contains("user_func_add_ten:\n"));
        assert!(asm.find("user_func_add_ten:").unwrap() < asm.find("main:").unwrap());
        assert!(asm.contains("mov [rbp - 8], rdi"));
        assert!(asm.contains("call user_func_add_ten"));
    }

    #[test]
    fn arity_error_on_builtin_with_one_argument() {
        let err = compile("(+ 1)").unwrap_err();
        assert!(matches!(err, CodeGenError::ArityMismatch { .. }));
    }

    #[test]
    fn shadowing_assigns_distinct_offsets() {
        let asm = compile("(define (f x) (define x 9) x)").unwrap();
        assert!(asm.contains("mov [rbp - 8], rdi"));
        assert!(asm.contains("mov [rbp - 16], rax"));
        assert!(asm.contains("mov rax, [rbp - 16]"));
    }

    #[test]
    fn if_is_rejected_as_not_implemented() {
        let err = compile("(if 1 2 3)").unwrap_err();
        assert!(matches!(err, CodeGenError::IfNotImplemented));
    }

    #[test]
    fn nested_function_definition_is_rejected() {
        let err = compile("(define (f x) (define (g y) y) (g x))").unwrap_err();
        assert!(matches!(err, CodeGenError::NestedFunctionDefinition));
    }

    #[test]
    fn more_than_six_parameters_is_rejected() {
        let err = compile("(define (f a b c d e f2 g) a)").unwrap_err();
        assert!(matches!(err, CodeGenError::TooManyParameters { .. }));
    }

    #[test]
    fn calling_undefined_symbol_is_an_error() {
        let err = compile("(mystery 1 2)").unwrap_err();
        assert!(matches!(err, CodeGenError::UndefinedSymbol(_)));
    }

    #[test]
    fn calling_a_variable_is_not_callable() {
        let err = compile("(define z 1)\n(z 1)").unwrap_err();
        assert!(matches!(err, CodeGenError::NotCallable(_)));
    }

    #[test]
    fn strings_are_not_implemented() {
        let err = compile("\"hi\"").unwrap_err();
        assert!(matches!(err, CodeGenError::StringNotImplemented));
    }
}
