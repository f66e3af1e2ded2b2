#![forbid(unsafe_code)]

pub mod class;
pub mod cursor;
pub mod error;
pub mod metadata;
pub mod method;
pub mod method_body;
pub mod opcode;
pub mod pool;
pub mod resolve;
pub mod script;
pub mod traits;

#[cfg(test)]
mod test;

use class::{Class, Instance};
use cursor::Cursor;
use error::Result;
use metadata::Metadata;
use method::Method;
use method_body::MethodBody;
use pool::ConstantPool;
use script::Script;
use serde::Serialize;

/// A fully decoded ABC file: the seven constant pools plus every section
/// that references them.
#[derive(Debug, Clone, Serialize)]
pub struct AbcFile {
    pub minor: u16,
    pub major: u16,
    pub pool: ConstantPool,
    pub methods: Vec<Method>,
    pub metadata: Vec<Metadata>,
    pub instances: Vec<Instance>,
    pub classes: Vec<Class>,
    pub scripts: Vec<Script>,
    pub method_bodies: Vec<MethodBody>,
}

/// Parses a single ABC file's bytes (the payload of a `DoABC`/`DoABCDefine`
/// SWF tag) into its fully decoded form.
pub fn parse(data: &[u8]) -> Result<AbcFile> {
    let mut c = Cursor::new(data);

    let minor = c.read_u16()?;
    let major = c.read_u16()?;
    let pool = ConstantPool::read(&mut c)?;

    let method_count = c.read_u30()?;
    let mut methods = Vec::with_capacity(method_count as usize);
    for _ in 0..method_count {
        methods.push(Method::read(&mut c)?);
    }

    let metadata_count = c.read_u30()?;
    let mut metadata = Vec::with_capacity(metadata_count as usize);
    for _ in 0..metadata_count {
        metadata.push(Metadata::read(&mut c)?);
    }

    let class_count = c.read_u30()?;
    let mut instances = Vec::with_capacity(class_count as usize);
    for _ in 0..class_count {
        instances.push(Instance::read(&mut c)?);
    }
    let mut classes = Vec::with_capacity(class_count as usize);
    for _ in 0..class_count {
        classes.push(Class::read(&mut c)?);
    }

    let script_count = c.read_u30()?;
    let mut scripts = Vec::with_capacity(script_count as usize);
    for _ in 0..script_count {
        scripts.push(Script::read(&mut c)?);
    }

    let body_count = c.read_u30()?;
    let mut method_bodies = Vec::with_capacity(body_count as usize);
    for _ in 0..body_count {
        method_bodies.push(MethodBody::read(&mut c)?);
    }

    Ok(AbcFile { minor, major, pool, methods, metadata, instances, classes, scripts, method_bodies })
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn empty_file_has_only_sentinel_pools() {
        let data = [
            16, 0, // minor
            46, 0, // major
            0, // int count
            0, // uint count
            0, // double count
            0, // string count
            0, // namespace count
            0, // ns-set count
            0, // multiname count
            0, // method count
            0, // metadata count
            0, // class count
            0, // script count
            0, // body count
        ];
        let abc = parse(&data).unwrap();
        assert_eq!(abc.pool.ints, vec![0]);
        assert_eq!(abc.pool.uints, vec![0]);
        assert!(abc.pool.doubles[0].is_nan());
        assert_eq!(abc.pool.strings, vec![String::new()]);
        assert_eq!(abc.methods.len(), 0);
    }

    #[test]
    fn unknown_opcode_surfaces_from_disassembler() {
        let data = [
            16, 0, 46, 0, 0, 0, 0, 0, 0, 0, 0, // header + empty pools
            0, // method count
            0, // metadata count
            0, // class count
            0, // script count
            1, // body count
            0, 0, 0, 0, 0, // method, max_stack, local_count, scopes
            1, 0xFF, // code_length=1, code=[0xFF]
            0, 0, // exception_count, trait_count
        ];
        let abc = parse(&data).unwrap();
        let body = &abc.method_bodies[0];
        let mut dis = body.disassemble(&abc);
        assert!(dis.next().unwrap().is_err());
    }
}
