//! Constant pools: ints, uints, doubles, strings, namespaces, namespace
//! sets, and multinames. Every pool carries a reserved sentinel at index 0.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use num_enum::TryFromPrimitive;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive)]
#[repr(u8)]
pub enum NamespaceKind {
    PrivateNs = 0x05,
    Namespace = 0x08,
    PackageNamespace = 0x16,
    PackageInternalNs = 0x17,
    ProtectedNamespace = 0x18,
    ExplicitNamespace = 0x19,
    StaticProtectedNs = 0x1A,
}

impl NamespaceKind {
    fn from_u8(v: u8) -> Result<Self> {
        Self::try_from(v).map_err(|_| Error::BadValue { msg: "Unknown namespace kind", val: v as u32 })
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Namespace {
    pub kind: NamespaceKind,
    pub name: u32,
}

impl Namespace {
    fn read(c: &mut Cursor) -> Result<Self> {
        let kind = NamespaceKind::from_u8(c.read_u8()?)?;
        let name = c.read_u30()?;
        Ok(Namespace { kind, name })
    }
}

pub type NamespaceSet = Vec<u32>;

fn read_namespace_set(c: &mut Cursor) -> Result<NamespaceSet> {
    let count = c.read_u30()?;
    let mut set = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let ns = c.read_u30()?;
        if ns == 0 {
            return Err(Error::BadValue {
                msg: "Entry must not be zero",
                val: 0,
            });
        }
        set.push(ns);
    }
    Ok(set)
}

#[derive(Debug, Clone, Serialize)]
pub enum Multiname {
    QName { ns: u32, name: u32 },
    QNameA { ns: u32, name: u32 },
    RTQName { name: u32 },
    RTQNameA { name: u32 },
    RTQNameL,
    RTQNameLA,
    Multiname { name: u32, ns_set: u32 },
    MultinameA { name: u32, ns_set: u32 },
    MultinameL { ns_set: u32 },
    MultinameLA { ns_set: u32 },
    TypeName { name: u32, params: Vec<u32> },
}

impl Multiname {
    fn read(c: &mut Cursor) -> Result<Self> {
        let kind = c.read_u8()?;
        Ok(match kind {
            0x07 => Multiname::QName { ns: c.read_u30()?, name: c.read_u30()? },
            0x0D => Multiname::QNameA { ns: c.read_u30()?, name: c.read_u30()? },
            0x0F => Multiname::RTQName { name: c.read_u30()? },
            0x10 => Multiname::RTQNameA { name: c.read_u30()? },
            0x11 => Multiname::RTQNameL,
            0x12 => Multiname::RTQNameLA,
            0x09 => {
                let name = c.read_u30()?;
                let ns_set = read_nonzero_u30(c)?;
                Multiname::Multiname { name, ns_set }
            }
            0x0E => {
                let name = c.read_u30()?;
                let ns_set = read_nonzero_u30(c)?;
                Multiname::MultinameA { name, ns_set }
            }
            0x1B => Multiname::MultinameL { ns_set: read_nonzero_u30(c)? },
            0x1C => Multiname::MultinameLA { ns_set: read_nonzero_u30(c)? },
            0x1D => {
                let name = c.read_u30()?;
                let param_count = c.read_u30()?;
                let mut params = Vec::with_capacity(param_count as usize);
                for _ in 0..param_count {
                    params.push(c.read_u30()?);
                }
                Multiname::TypeName { name, params }
            }
            _ => {
                return Err(Error::BadValue {
                    msg: "Unknown multiname",
                    val: kind as u32,
                })
            }
        })
    }
}

fn read_nonzero_u30(c: &mut Cursor) -> Result<u32> {
    let v = c.read_u30()?;
    if v == 0 {
        return Err(Error::BadValue {
            msg: "Entry must not be zero",
            val: 0,
        });
    }
    Ok(v)
}

/// The seven constant pools of an ABC file, each with a reserved
/// zero-th element.
#[derive(Debug, Clone, Serialize)]
pub struct ConstantPool {
    pub ints: Vec<i32>,
    pub uints: Vec<u32>,
    pub doubles: Vec<f64>,
    pub strings: Vec<String>,
    pub namespaces: Vec<Namespace>,
    pub namespace_sets: Vec<NamespaceSet>,
    pub multinames: Vec<Multiname>,
}

fn read_pool<T>(c: &mut Cursor, mut read_one: impl FnMut(&mut Cursor) -> Result<T>) -> Result<Vec<T>>
where
    T: Default,
{
    let count = c.read_u30()?;
    let mut pool = Vec::with_capacity(count as usize);
    pool.push(T::default());
    for _ in 1..count {
        pool.push(read_one(c)?);
    }
    Ok(pool)
}

impl ConstantPool {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        let ints = read_pool(c, |c| c.read_s32())?;
        let uints = read_pool(c, |c| c.read_u32())?;
        let doubles = read_pool_with(c, f64::NAN, |c| c.read_f64())?;
        let strings = read_pool(c, |c| c.read_string())?;
        let namespaces = read_pool_with(
            c,
            Namespace { kind: NamespaceKind::Namespace, name: 0 },
            Namespace::read,
        )?;
        let namespace_sets = read_pool(c, read_namespace_set)?;
        let multinames = read_pool_with(
            c,
            Multiname::MultinameL { ns_set: 0 },
            Multiname::read,
        )?;
        Ok(ConstantPool {
            ints,
            uints,
            doubles,
            strings,
            namespaces,
            namespace_sets,
            multinames,
        })
    }
}

fn read_pool_with<T: Clone>(
    c: &mut Cursor,
    sentinel: T,
    mut read_one: impl FnMut(&mut Cursor) -> Result<T>,
) -> Result<Vec<T>> {
    let count = c.read_u30()?;
    let mut pool = Vec::with_capacity(count as usize);
    pool.push(sentinel);
    for _ in 1..count {
        pool.push(read_one(c)?);
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pools_keep_only_sentinel() {
        let data = [0u8; 1];
        let mut c = Cursor::new(&data);
        let ints = read_pool(&mut c, |c| c.read_s32()).unwrap();
        assert_eq!(ints, vec![0]);
    }

    #[test]
    fn namespace_set_rejects_zero_entry() {
        let data = [0x01, 0x00];
        let mut c = Cursor::new(&data);
        assert!(read_namespace_set(&mut c).is_err());
    }
}
