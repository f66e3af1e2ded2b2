use crate::cursor::Cursor;
use crate::error::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MetadataItem {
    pub key: u32,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub name: u32,
    pub items: Vec<MetadataItem>,
}

impl Metadata {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let name = c.read_u30()?;
        if name == 0 {
            return Err(Error::BadValue { msg: "Metadata name must not be zero", val: 0 });
        }
        let count = c.read_u30()?;
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let key = c.read_u30()?;
            let value = c.read_u30()?;
            items.push(MetadataItem { key, value });
        }
        Ok(Metadata { name, items })
    }
}
