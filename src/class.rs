use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::traits::Trait;
use serde::Serialize;

const CLASS_FLAG_PROTECTED_NS: u8 = 0x08;

#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    pub name: u32,
    pub super_name: u32,
    pub flags: u8,
    pub protected_ns: Option<u32>,
    pub interfaces: Vec<u32>,
    pub iinit: u32,
    pub traits: Vec<Trait>,
}

impl Instance {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let name = c.read_u30()?;
        let super_name = c.read_u30()?;
        let flags = c.read_u8()?;
        let protected_ns = if flags & CLASS_FLAG_PROTECTED_NS != 0 {
            Some(c.read_u30()?)
        } else {
            None
        };
        let interface_count = c.read_u30()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            let interface = c.read_u30()?;
            if interface == 0 {
                return Err(Error::BadValue { msg: "Invalid interface", val: 0 });
            }
            interfaces.push(interface);
        }
        let iinit = c.read_u30()?;
        let traits = Trait::read_sequence(c)?;
        Ok(Instance { name, super_name, flags, protected_ns, interfaces, iinit, traits })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Class {
    pub cinit: u32,
    pub traits: Vec<Trait>,
}

impl Class {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let cinit = c.read_u30()?;
        let traits = Trait::read_sequence(c)?;
        Ok(Class { cinit, traits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_zero_is_rejected() {
        // name=0, super_name=0, flags=0, interface_count=1, interface=0
        let data = [0x00, 0x00, 0x00, 0x01, 0x00];
        let mut c = Cursor::new(&data);
        assert!(Instance::read(&mut c).is_err());
    }
}
