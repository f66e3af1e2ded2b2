use crate::cursor::Cursor;
use crate::error::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OptionDetail {
    pub val: u32,
    pub kind: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    pub return_type: u32,
    pub param_types: Vec<u32>,
    pub name: u32,
    pub flags: u8,
    pub options: Vec<OptionDetail>,
    pub param_names: Vec<u32>,
}

const NEED_ARGUMENTS: u8 = 0x01;
const NEED_REST: u8 = 0x04;
const HAS_OPTIONAL: u8 = 0x08;
const SET_DXNS: u8 = 0x40;
const HAS_PARAM_NAMES: u8 = 0x80;

impl Method {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let param_count = c.read_u30()?;
        let return_type = c.read_u30()?;
        let mut param_types = Vec::with_capacity(param_count as usize);
        for _ in 0..param_count {
            param_types.push(c.read_u30()?);
        }
        let name = c.read_u30()?;
        let flags = c.read_u8()?;

        let options = if flags & HAS_OPTIONAL != 0 {
            let option_count = c.read_u30()?;
            if option_count == 0 || option_count > param_count {
                return Err(Error::BadValue {
                    msg: "Optional parameter count out of range",
                    val: option_count,
                });
            }
            let mut options = Vec::with_capacity(option_count as usize);
            for _ in 0..option_count {
                let val = c.read_u30()?;
                let kind = c.read_u8()?;
                options.push(OptionDetail { val, kind });
            }
            options
        } else {
            Vec::new()
        };

        let param_names = if flags & HAS_PARAM_NAMES != 0 {
            let mut names = Vec::with_capacity(param_count as usize);
            for _ in 0..param_count {
                names.push(c.read_u30()?);
            }
            names
        } else {
            Vec::new()
        };

        Ok(Method {
            return_type,
            param_types,
            name,
            flags,
            options,
            param_names,
        })
    }

    pub fn needs_arguments(&self) -> bool {
        self.flags & NEED_ARGUMENTS != 0
    }

    pub fn needs_rest(&self) -> bool {
        self.flags & NEED_REST != 0
    }

    pub fn sets_dxns(&self) -> bool {
        self.flags & SET_DXNS != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_count_must_be_in_range() {
        // param_count=1, return_type=0, name=0, flags=HAS_OPTIONAL, option_count=2
        let data = [0x01, 0x00, 0x00, 0x00, HAS_OPTIONAL, 0x02];
        let mut c = Cursor::new(&data);
        assert!(Method::read(&mut c).is_err());
    }

    #[test]
    fn no_optional_flag_yields_empty_options() {
        let data = [0x00, 0x00, 0x00, 0x00];
        let mut c = Cursor::new(&data);
        let m = Method::read(&mut c).unwrap();
        assert!(m.options.is_empty());
    }
}
