//! Per-function temporary/label counters.
//!
//! Grounded in the teacher's `codeCounters`-style per-function reset
//! (referenced throughout `CodeGenListener`, e.g. `codeCounters.newTEMP()`,
//! `codeCounters.newLabelIF()`) and in the teacher's own `create_label`
//! counter in `program_code_builder.rs`. Both counters are monotonic within a
//! function and reset at function entry — never shared across functions.

#[derive(Debug, Default)]
pub struct CodeCounters {
    temp: u32,
    if_label: u32,
    while_label: u32,
}

impl CodeCounters {
    pub fn new() -> Self {
        CodeCounters::default()
    }

    pub fn reset(&mut self) {
        *self = CodeCounters::default();
    }

    /// Allocates a fresh temporary name, prefixed `%` to disambiguate from source identifiers.
    pub fn new_temp(&mut self) -> String {
        let name = format!("%t{}", self.temp);
        self.temp += 1;
        name
    }

    pub fn new_if_label(&mut self) -> u32 {
        let n = self.if_label;
        self.if_label += 1;
        n
    }

    pub fn new_while_label(&mut self) -> u32 {
        let n = self.while_label;
        self.while_label += 1;
        n
    }
}
