use crate::cursor::Cursor;
use crate::error::Result;
use crate::opcode::{strip_operands, Disassembler};
use crate::traits::Trait;
use crate::AbcFile;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ASException {
    pub from: u32,
    pub to: u32,
    pub target: u32,
    pub exc_type: u32,
    pub var_name: u32,
}

impl ASException {
    fn read(c: &mut Cursor) -> Result<Self> {
        Ok(ASException {
            from: c.read_u30()?,
            to: c.read_u30()?,
            target: c.read_u30()?,
            exc_type: c.read_u30()?,
            var_name: c.read_u30()?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodBody {
    pub method: u32,
    pub max_stack: u32,
    pub local_count: u32,
    pub init_scope_depth: u32,
    pub max_scope_depth: u32,
    pub code: Vec<u8>,
    pub exceptions: Vec<ASException>,
    pub traits: Vec<Trait>,
}

impl MethodBody {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let method = c.read_u30()?;
        let max_stack = c.read_u30()?;
        let local_count = c.read_u30()?;
        let init_scope_depth = c.read_u30()?;
        let max_scope_depth = c.read_u30()?;
        let code_length = c.read_u30()? as usize;
        let code = c.read_bytes(code_length)?.to_vec();
        let exception_count = c.read_u30()?;
        let mut exceptions = Vec::with_capacity(exception_count as usize);
        for _ in 0..exception_count {
            exceptions.push(ASException::read(c)?);
        }
        let traits = Trait::read_sequence(c)?;
        Ok(MethodBody {
            method,
            max_stack,
            local_count,
            init_scope_depth,
            max_scope_depth,
            code,
            exceptions,
            traits,
        })
    }

    /// A lazy iterator over the decoded instructions of this method body's
    /// code blob.
    pub fn disassemble<'a>(&'a self, abc: &'a AbcFile) -> Disassembler<'a> {
        Disassembler::new(abc, &self.code, &self.exceptions)
    }

    /// The opcode-only byte string of this method body, independent of
    /// pool contents; used to fingerprint identical instruction sequences.
    pub fn strip_operands(&self) -> Result<Vec<u8>> {
        strip_operands(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_length_matches_captured_bytes() {
        // method=0 max_stack=0 local_count=0 init_scope_depth=0
        // max_scope_depth=0 code_length=2 code=[0x02,0x47] (nop, returnvoid)
        // exception_count=0 trait_count=0
        let data = [0, 0, 0, 0, 0, 2, 0x02, 0x47, 0, 0];
        let mut c = Cursor::new(&data);
        let body = MethodBody::read(&mut c).unwrap();
        assert_eq!(body.code, vec![0x02, 0x47]);
    }
}
