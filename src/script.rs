use crate::cursor::Cursor;
use crate::error::Result;
use crate::traits::Trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Script {
    pub init: u32,
    pub traits: Vec<Trait>,
}

impl Script {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let init = c.read_u30()?;
        let traits = Trait::read_sequence(c)?;
        Ok(Script { init, traits })
    }
}
