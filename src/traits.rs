use crate::cursor::Cursor;
use crate::error::{Error, Result};
use serde::Serialize;

const ATTR_METADATA: u8 = 0x04;

#[derive(Debug, Clone, Serialize)]
pub enum TraitData {
    Slot { slot_id: u32, type_name: u32, vindex: u32, vkind: u8 },
    Const { slot_id: u32, type_name: u32, vindex: u32, vkind: u8 },
    Class { slot_id: u32, class_index: u32 },
    Function { slot_id: u32, method: u32 },
    Method { disp_id: u32, method: u32 },
    Getter { disp_id: u32, method: u32 },
    Setter { disp_id: u32, method: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct Trait {
    pub name: u32,
    pub raw_kind: u8,
    pub data: TraitData,
    pub metadata: Vec<u32>,
}

impl Trait {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let name = c.read_u30()?;
        if name == 0 {
            return Err(Error::BadValue { msg: "Trait name must not be zero", val: 0 });
        }
        let raw_kind = c.read_u8()?;
        let kind_low = raw_kind & 0x0F;

        let data = match kind_low {
            0x00 | 0x06 => {
                let slot_id = c.read_u30()?;
                let type_name = c.read_u30()?;
                let vindex = c.read_u30()?;
                let vkind = if vindex != 0 { c.read_u8()? } else { 0 };
                if kind_low == 0x00 {
                    TraitData::Slot { slot_id, type_name, vindex, vkind }
                } else {
                    TraitData::Const { slot_id, type_name, vindex, vkind }
                }
            }
            0x04 => TraitData::Class { slot_id: c.read_u30()?, class_index: c.read_u30()? },
            0x05 => TraitData::Function { slot_id: c.read_u30()?, method: c.read_u30()? },
            0x01 => TraitData::Method { disp_id: c.read_u30()?, method: c.read_u30()? },
            0x02 => TraitData::Getter { disp_id: c.read_u30()?, method: c.read_u30()? },
            0x03 => TraitData::Setter { disp_id: c.read_u30()?, method: c.read_u30()? },
            _ => {
                return Err(Error::BadValue {
                    msg: "Invalid trait kind",
                    val: kind_low as u32,
                })
            }
        };

        let attr = (raw_kind & 0xF0) >> 4;
        let metadata = if attr & ATTR_METADATA != 0 {
            let count = c.read_u30()?;
            let mut metadata = Vec::with_capacity(count as usize);
            for _ in 0..count {
                metadata.push(c.read_u30()?);
            }
            metadata
        } else {
            Vec::new()
        };

        Ok(Trait { name, raw_kind, data, metadata })
    }

    pub(crate) fn read_sequence(c: &mut Cursor) -> Result<Vec<Trait>> {
        let count = c.read_u30()?;
        let mut traits = Vec::with_capacity(count as usize);
        for _ in 0..count {
            traits.push(Trait::read(c)?);
        }
        Ok(traits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_name_must_not_be_zero() {
        let data = [0x00];
        let mut c = Cursor::new(&data);
        assert!(Trait::read(&mut c).is_err());
    }

    #[test]
    fn slot_trait_without_value_skips_vkind() {
        // name=1, raw_kind=0 (Slot), slot_id=0, type_name=0, vindex=0
        let data = [0x01, 0x00, 0x00, 0x00, 0x00];
        let mut c = Cursor::new(&data);
        let t = Trait::read(&mut c).unwrap();
        match t.data {
            TraitData::Slot { vindex, vkind, .. } => {
                assert_eq!(vindex, 0);
                assert_eq!(vkind, 0);
            }
            _ => panic!("expected Slot"),
        }
    }
}
