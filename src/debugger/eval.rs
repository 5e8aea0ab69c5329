//! # Expression Evaluation
//!
//! Watch/hover expressions are a symbol name or a `$HHHH` hex literal,
//! optionally wrapped in a 6502 addressing-mode modifier:
//!
//! ```text
//! counter        value at the symbol's address (symbol size, default 1)
//! $C000          value at $C000
//! buf,X          indexed by X
//! buf,Y          indexed by Y
//! (ptr)          one byte at the address ptr points to
//! (ptr),Y        one byte at ptr's target plus Y
//! ```
//!
//! Indirect forms always yield a single byte at the computed effective
//! address.

use thiserror::Error;

use crate::debuginfo::DebugInfo;
use crate::{Cpu, MemoryBus};

/// Why an expression did not evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The name is not in the symbol table.
    #[error("symbol `{0}` not found")]
    UnknownSymbol(String),

    /// The expression does not scan.
    #[error("malformed expression `{0}`")]
    Malformed(String),
}

/// A successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalResult {
    /// The effective address the value was read from.
    pub addr: u16,
    /// The value bytes, little-endian, `size` long.
    pub bytes: Vec<u8>,
}

impl EvalResult {
    /// The value as an unsigned integer (little-endian).
    pub fn value(&self) -> u32 {
        self.bytes
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | b as u32)
    }
}

/// Base operand: a hex literal or a symbol, with its display size.
fn resolve_base(
    name: &str,
    info: Option<&DebugInfo>,
) -> Result<(u16, u16), EvalError> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('$') {
        let addr = u16::from_str_radix(hex, 16)
            .map_err(|_| EvalError::Malformed(name.to_string()))?;
        return Ok((addr, 1));
    }
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(EvalError::Malformed(name.to_string()));
    }

    let sym = info
        .and_then(|i| i.symbol_by_name(name))
        .ok_or_else(|| EvalError::UnknownSymbol(name.to_string()))?;
    let size = sym.size.unwrap_or(1).clamp(1, 0xFFFF) as u16;
    Ok((sym.addr as u16, size))
}

/// Evaluates an expression against the current CPU state.
pub fn evaluate<M: MemoryBus>(
    expr: &str,
    cpu: &Cpu<M>,
    info: Option<&DebugInfo>,
) -> Result<EvalResult, EvalError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(EvalError::Malformed(String::new()));
    }

    // Indirect forms: (name) and (name),Y
    if let Some(rest) = expr.strip_prefix('(') {
        let (inner, post_indexed) = if let Some(inner) = rest.strip_suffix("),Y") {
            (inner, true)
        } else if let Some(inner) = rest.strip_suffix(')') {
            (inner, false)
        } else {
            return Err(EvalError::Malformed(expr.to_string()));
        };

        let (ptr_addr, _) = resolve_base(inner, info)?;
        let mut addr = cpu.memory().read_word(ptr_addr);
        if post_indexed {
            addr = addr.wrapping_add(cpu.y() as u16);
        }
        return Ok(EvalResult {
            addr,
            bytes: vec![cpu.memory().read(addr)],
        });
    }

    // Direct, optionally indexed: name, name,X, name,Y
    let (base, index) = match expr.rsplit_once(',') {
        Some((base, reg)) => match reg.trim() {
            "X" | "x" => (base, Some(cpu.x())),
            "Y" | "y" => (base, Some(cpu.y())),
            _ => return Err(EvalError::Malformed(expr.to_string())),
        },
        None => (expr, None),
    };

    let (base_addr, size) = resolve_base(base, info)?;
    let addr = base_addr.wrapping_add(index.unwrap_or(0) as u16);

    let mut bytes = Vec::with_capacity(size as usize);
    for i in 0..size {
        bytes.push(cpu.memory().read(addr.wrapping_add(i)));
    }
    Ok(EvalResult { addr, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn setup() -> Cpu<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xC000, 0x42);
        mem.write(0xC001, 0x43);
        mem.write(0x0080, 0x00); // ptr -> $C000
        mem.write(0x0081, 0xC0);
        Cpu::new(mem)
    }

    #[test]
    fn test_hex_literal() {
        let cpu = setup();
        let result = evaluate("$C000", &cpu, None).unwrap();
        assert_eq!(result.addr, 0xC000);
        assert_eq!(result.bytes, vec![0x42]);
        assert_eq!(result.value(), 0x42);
    }

    #[test]
    fn test_indexed_literal() {
        let mut cpu = setup();
        cpu.set_x(1);
        let result = evaluate("$C000,X", &cpu, None).unwrap();
        assert_eq!(result.addr, 0xC001);
        assert_eq!(result.bytes, vec![0x43]);
    }

    #[test]
    fn test_indirect() {
        let cpu = setup();
        let result = evaluate("($0080)", &cpu, None).unwrap();
        assert_eq!(result.addr, 0xC000);
        assert_eq!(result.bytes, vec![0x42]);
    }

    #[test]
    fn test_indirect_post_indexed() {
        let mut cpu = setup();
        cpu.set_y(1);
        let result = evaluate("($0080),Y", &cpu, None).unwrap();
        assert_eq!(result.addr, 0xC001);
        assert_eq!(result.bytes, vec![0x43]);
    }

    #[test]
    fn test_unknown_symbol() {
        let cpu = setup();
        assert_eq!(
            evaluate("nosuch", &cpu, None),
            Err(EvalError::UnknownSymbol("nosuch".into()))
        );
    }

    #[test]
    fn test_malformed() {
        let cpu = setup();
        assert!(matches!(
            evaluate("(unclosed", &cpu, None),
            Err(EvalError::Malformed(_))
        ));
        assert!(matches!(
            evaluate("$GG", &cpu, None),
            Err(EvalError::Malformed(_))
        ));
        assert!(matches!(
            evaluate("a,Z", &cpu, None),
            Err(EvalError::Malformed(_))
        ));
    }
}
