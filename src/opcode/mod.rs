//! The instruction table and disassembler for AVM2 method bodies.

mod table;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::AbcFile;
use serde::Serialize;
pub use table::{Decoder, Handler, OpcodeInfo};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OperandValue {
    U8(u8),
    U32(u32),
    S24(i32),
    Str(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct OpCode {
    pub opcode: u8,
    pub name: &'static str,
    pub operands: Vec<OperandValue>,
}

fn decode_operands(c: &mut Cursor, decoders: &[Decoder]) -> Result<Vec<OperandValue>> {
    let mut operands = Vec::with_capacity(decoders.len());
    for decoder in decoders {
        operands.push(match decoder {
            Decoder::U8 => OperandValue::U8(c.read_u8()?),
            Decoder::U30 => OperandValue::U32(c.read_u30()?),
            Decoder::S24 => OperandValue::S24(c.read_s24()?),
        });
    }
    Ok(operands)
}

fn as_index(v: &OperandValue) -> Option<usize> {
    match v {
        OperandValue::U32(n) => Some(*n as usize),
        OperandValue::U8(n) => Some(*n as usize),
        _ => None,
    }
}

/// Applies a resolution handler to a decoded operand list. Returns `None`
/// (leaving the raw operands untouched) if any index is out of range —
/// disassembly of malformed files is still useful without resolved names.
fn apply_handler(
    abc: &AbcFile,
    exceptions: &[crate::method_body::ASException],
    handler: Handler,
    operands: &[OperandValue],
) -> Option<Vec<OperandValue>> {
    let pool = &abc.pool;
    let resolve_one = |idx: usize| -> Option<String> {
        match handler {
            Handler::String => pool.strings.get(idx).cloned(),
            Handler::Uint => pool.uints.get(idx).map(|v| v.to_string()),
            Handler::Int => pool.ints.get(idx).map(|v| v.to_string()),
            Handler::Double => pool.doubles.get(idx).map(|v| v.to_string()),
            Handler::Multiname => crate::resolve::resolve_multiname(abc, idx as u32).ok(),
            Handler::MethodInfo => crate::resolve::resolve_method_signature(abc, idx as u32).ok(),
            Handler::Exception => {
                exceptions.get(idx).and_then(|e| crate::resolve::resolve_exception(abc, e).ok())
            }
            Handler::Namespace => pool.namespaces.get(idx).map(crate::resolve::namespace_operand),
            Handler::MultinameAndArg | Handler::MethodInfoAndArg => {
                unreachable!("handled separately below")
            }
        }
    };

    match handler {
        Handler::MultinameAndArg | Handler::MethodInfoAndArg => {
            let idx = as_index(operands.first()?)?;
            let resolved = if handler == Handler::MultinameAndArg {
                crate::resolve::resolve_multiname(abc, idx as u32).ok()?
            } else {
                crate::resolve::resolve_method_signature(abc, idx as u32).ok()?
            };
            let mut out = operands.to_vec();
            out[0] = OperandValue::Str(resolved);
            Some(out)
        }
        _ => {
            let mut out = Vec::with_capacity(operands.len());
            for op in operands {
                let idx = as_index(op)?;
                out.push(OperandValue::Str(resolve_one(idx)?));
            }
            Some(out)
        }
    }
}

/// Lazily walks a code blob, yielding one [`OpCode`] per iteration.
pub struct Disassembler<'a> {
    abc: &'a AbcFile,
    exceptions: &'a [crate::method_body::ASException],
    cursor: Cursor<'a>,
}

impl<'a> Disassembler<'a> {
    pub(crate) fn new(
        abc: &'a AbcFile,
        code: &'a [u8],
        exceptions: &'a [crate::method_body::ASException],
    ) -> Self {
        Disassembler { abc, exceptions, cursor: Cursor::new(code) }
    }
}

impl<'a> Iterator for Disassembler<'a> {
    type Item = Result<OpCode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_empty() {
            return None;
        }
        Some(self.step())
    }
}

impl<'a> Disassembler<'a> {
    fn step(&mut self) -> Result<OpCode> {
        let byte = self.cursor.read_u8()?;
        let info = table::lookup(byte).ok_or(Error::BadOpcode { byte })?;
        let mut operands = decode_operands(&mut self.cursor, info.operands)?;

        if info.name == "lookupswitch" {
            // operands[1] is case_count; read case_count + 1 more s24 offsets.
            let case_count = match operands[1] {
                OperandValue::U32(n) => n,
                _ => unreachable!("lookupswitch's second operand is always a u30"),
            };
            for _ in 0..=case_count {
                operands.push(OperandValue::S24(self.cursor.read_s24()?));
            }
        }

        if let Some(handler) = info.handler {
            if let Some(resolved) = apply_handler(self.abc, self.exceptions, handler, &operands) {
                operands = resolved;
            }
        }

        Ok(OpCode { opcode: byte, name: info.name, operands })
    }
}

/// Walks the same table but discards operand values, yielding only the
/// sequence of opcode bytes. Must still consume `lookupswitch`'s trailing
/// variable-length tail to stay in sync with the code stream.
pub fn strip_operands(code: &[u8]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(code);
    let mut stripped = Vec::new();
    while !cursor.is_empty() {
        let byte = cursor.read_u8()?;
        let info = table::lookup(byte).ok_or(Error::BadOpcode { byte })?;
        stripped.push(byte);
        let operands = decode_operands(&mut cursor, info.operands)?;
        if info.name == "lookupswitch" {
            let case_count = match operands[1] {
                OperandValue::U32(n) => n,
                _ => unreachable!("lookupswitch's second operand is always a u30"),
            };
            for _ in 0..=case_count {
                cursor.read_s24()?;
            }
        }
    }
    Ok(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_opcode_is_rejected() {
        let data = [0xFFu8];
        let mut cursor = Cursor::new(&data);
        let byte = cursor.read_u8().unwrap();
        assert!(table::lookup(byte).is_none());
    }

    #[test]
    fn lookupswitch_reads_variable_tail() {
        // default_offset=16, case_count=2, then 3 s24 case offsets.
        let code = [
            0x1B, 0x10, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x02, 0x00, 0x00, 0x03, 0x00, 0x00,
        ];
        let stripped = strip_operands(&code).unwrap();
        assert_eq!(stripped, vec![0x1B]);
    }
}
