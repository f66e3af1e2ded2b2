//! Pure functions that turn pool indices into human-readable strings.
//!
//! These never mutate the parsed unit; they take `&AbcFile` as an explicit
//! context parameter since records hold indices, not back-pointers.

use crate::error::{Error, Result};
use crate::method::OptionDetail;
use crate::pool::{Multiname, NamespaceKind};
use crate::traits::{Trait, TraitData};
use crate::AbcFile;

/// Multinames may nest through `TypeName`; guard against pathological
/// depth rather than recursing without limit as the format this crate
/// supersedes does.
const MAX_RESOLVE_DEPTH: u32 = 64;

pub fn resolve_multiname(abc: &AbcFile, index: u32) -> Result<String> {
    resolve_multiname_depth(abc, index, 0)
}

fn resolve_multiname_depth(abc: &AbcFile, index: u32, depth: u32) -> Result<String> {
    if depth > MAX_RESOLVE_DEPTH {
        return Err(Error::BadValue { msg: "Multiname nesting too deep", val: index });
    }
    let multiname = abc
        .pool
        .multinames
        .get(index as usize)
        .ok_or(Error::BadValue { msg: "Multiname index out of range", val: index })?;

    Ok(match multiname {
        Multiname::QName { ns, name } | Multiname::QNameA { ns, name } => {
            let ns_str = if *ns == 0 {
                "*".to_string()
            } else {
                let namespace = abc
                    .pool
                    .namespaces
                    .get(*ns as usize)
                    .ok_or(Error::BadValue { msg: "Namespace index out of range", val: *ns })?;
                resolve_string(abc, namespace.name)?
            };
            let name_str = if *name == 0 { "*".to_string() } else { resolve_string(abc, *name)? };
            if ns_str.is_empty() {
                name_str
            } else {
                format!("{ns_str}.{name_str}")
            }
        }
        Multiname::RTQName { name } | Multiname::RTQNameA { name } => {
            if *name == 0 { "*".to_string() } else { resolve_string(abc, *name)? }
        }
        Multiname::RTQNameL | Multiname::RTQNameLA => String::new(),
        Multiname::Multiname { name, ns_set } | Multiname::MultinameA { name, ns_set } => {
            let set = abc
                .pool
                .namespace_sets
                .get(*ns_set as usize)
                .ok_or(Error::BadValue { msg: "Namespace set index out of range", val: *ns_set })?;
            let joined = set.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
            let name_str = resolve_string(abc, *name)?;
            format!("ns sets: {joined} name: {name_str}")
        }
        Multiname::MultinameL { ns_set } | Multiname::MultinameLA { ns_set } => {
            let set = abc
                .pool
                .namespace_sets
                .get(*ns_set as usize)
                .ok_or(Error::BadValue { msg: "Namespace set index out of range", val: *ns_set })?;
            let mut parts = Vec::with_capacity(set.len());
            for ns in set {
                let namespace = abc
                    .pool
                    .namespaces
                    .get(*ns as usize)
                    .ok_or(Error::BadValue { msg: "Namespace index out of range", val: *ns })?;
                let tag = namespace_kind_tag(namespace.kind);
                if namespace.name == 0 {
                    parts.push(format!("{tag}:0"));
                } else {
                    parts.push(format!("{tag}:{}", resolve_string(abc, namespace.name)?));
                }
            }
            format!("ns sets: {}", parts.join(", "))
        }
        Multiname::TypeName { name, params } => {
            let name_str = resolve_multiname_depth(abc, *name, depth + 1)?;
            let mut resolved_params = Vec::with_capacity(params.len());
            for p in params {
                resolved_params.push(resolve_multiname_depth(abc, *p, depth + 1)?);
            }
            format!("name: {name_str} params: {}", resolved_params.join(", "))
        }
    })
}

fn resolve_string(abc: &AbcFile, index: u32) -> Result<String> {
    abc.pool
        .strings
        .get(index as usize)
        .cloned()
        .ok_or(Error::BadValue { msg: "String index out of range", val: index })
}

pub(crate) fn namespace_kind_tag(kind: NamespaceKind) -> &'static str {
    match kind {
        NamespaceKind::Namespace => "Namespace",
        NamespaceKind::PackageNamespace => "PackageNamespace",
        NamespaceKind::PackageInternalNs => "PackageInternalNs",
        NamespaceKind::ProtectedNamespace => "ProtectedNamespace",
        NamespaceKind::ExplicitNamespace => "ExplicitNamespace",
        NamespaceKind::StaticProtectedNs => "StaticProtectedNs",
        NamespaceKind::PrivateNs => "PrivateNs",
    }
}

/// The `"<kind>: <name index>"` form used when an instruction's operand is
/// a raw namespace (the reference implementation does not resolve the
/// namespace's name to a string here, only its kind).
pub(crate) fn namespace_operand(ns: &crate::pool::Namespace) -> String {
    format!("{}: {}", namespace_kind_tag(ns.kind), ns.name)
}

/// A method's signature as `"<return type> <name>(<param types>)"`.
pub fn resolve_method_signature(abc: &AbcFile, index: u32) -> Result<String> {
    let method = abc
        .methods
        .get(index as usize)
        .ok_or(Error::BadValue { msg: "Method index out of range", val: index })?;

    let return_type =
        if method.return_type == 0 { "*".to_string() } else { resolve_multiname(abc, method.return_type)? };
    let name = if method.name == 0 { "NO_NAME".to_string() } else { resolve_string(abc, method.name)? };
    let mut params = Vec::with_capacity(method.param_types.len());
    for &param_type in &method.param_types {
        params.push(if param_type == 0 { "*".to_string() } else { resolve_multiname(abc, param_type)? });
    }
    Ok(format!("{return_type} {name}({})", params.join(", ")))
}

/// An exception record as `"<type>"` or `"<type> as <var name>"`.
pub fn resolve_exception(abc: &AbcFile, exc: &crate::method_body::ASException) -> Result<String> {
    let exc_type = if exc.exc_type == 0 { "*".to_string() } else { resolve_multiname(abc, exc.exc_type)? };
    if exc.var_name != 0 {
        Ok(format!("{exc_type} as {}", resolve_multiname(abc, exc.var_name)?))
    } else {
        Ok(exc_type)
    }
}

#[derive(Debug, Clone)]
pub enum ResolvedTrait {
    Slot { slot_id: u32, type_name: String },
    Const { slot_id: u32, type_name: String },
    Class { slot_id: u32, class_index: u32 },
    Function { slot_id: u32, method: u32 },
    Method { disp_id: u32, method: u32 },
    Getter { disp_id: u32, method: u32 },
    Setter { disp_id: u32, method: u32 },
}

pub fn resolve_trait(abc: &AbcFile, t: &Trait) -> Result<ResolvedTrait> {
    Ok(match &t.data {
        TraitData::Slot { slot_id, type_name, .. } => ResolvedTrait::Slot {
            slot_id: *slot_id,
            type_name: if *type_name == 0 { "*".to_string() } else { resolve_multiname(abc, *type_name)? },
        },
        TraitData::Const { slot_id, type_name, .. } => ResolvedTrait::Const {
            slot_id: *slot_id,
            type_name: if *type_name == 0 { "*".to_string() } else { resolve_multiname(abc, *type_name)? },
        },
        TraitData::Class { slot_id, class_index } => {
            ResolvedTrait::Class { slot_id: *slot_id, class_index: *class_index }
        }
        TraitData::Function { slot_id, method } => {
            ResolvedTrait::Function { slot_id: *slot_id, method: *method }
        }
        TraitData::Method { disp_id, method } => {
            ResolvedTrait::Method { disp_id: *disp_id, method: *method }
        }
        TraitData::Getter { disp_id, method } => {
            ResolvedTrait::Getter { disp_id: *disp_id, method: *method }
        }
        TraitData::Setter { disp_id, method } => {
            ResolvedTrait::Setter { disp_id: *disp_id, method: *method }
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Int(i32),
    Uint(u32),
    Double(f64),
    String(String),
    Raw(u32),
}

const CONST_UTF8: u8 = 0x01;
const CONST_INT: u8 = 0x03;
const CONST_UINT: u8 = 0x04;
const CONST_DOUBLE: u8 = 0x06;

pub fn resolve_optional(abc: &AbcFile, opt: &OptionDetail) -> Result<ResolvedValue> {
    Ok(match opt.kind {
        CONST_INT => ResolvedValue::Int(
            *abc.pool.ints.get(opt.val as usize).ok_or(Error::BadValue { msg: "Int index out of range", val: opt.val })?,
        ),
        CONST_UINT => ResolvedValue::Uint(
            *abc.pool.uints.get(opt.val as usize).ok_or(Error::BadValue { msg: "Uint index out of range", val: opt.val })?,
        ),
        CONST_DOUBLE => ResolvedValue::Double(
            *abc.pool.doubles.get(opt.val as usize).ok_or(Error::BadValue { msg: "Double index out of range", val: opt.val })?,
        ),
        CONST_UTF8 => ResolvedValue::String(resolve_string(abc, opt.val)?),
        _ => ResolvedValue::Raw(opt.val),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{Class, Instance};
    use crate::method::Method;
    use crate::metadata::Metadata;
    use crate::pool::{ConstantPool, Namespace};
    use crate::script::Script;
    use crate::method_body::MethodBody;

    fn minimal_abc(pool: ConstantPool) -> AbcFile {
        AbcFile {
            major: 46,
            minor: 16,
            pool,
            methods: Vec::<Method>::new(),
            metadata: Vec::<Metadata>::new(),
            instances: Vec::<Instance>::new(),
            classes: Vec::<Class>::new(),
            scripts: Vec::<Script>::new(),
            method_bodies: Vec::<MethodBody>::new(),
        }
    }

    #[test]
    fn qname_resolves_to_dotted_path() {
        let pool = ConstantPool {
            ints: vec![0],
            uints: vec![0],
            doubles: vec![f64::NAN],
            strings: vec![String::new(), "flash.display".to_string(), "MovieClip".to_string()],
            namespaces: vec![
                Namespace { kind: NamespaceKind::Namespace, name: 0 },
                Namespace { kind: NamespaceKind::PackageNamespace, name: 1 },
            ],
            namespace_sets: vec![Vec::new()],
            multinames: vec![
                Multiname::MultinameL { ns_set: 0 },
                Multiname::QName { ns: 1, name: 2 },
            ],
        };
        let abc = minimal_abc(pool);
        assert_eq!(resolve_multiname(&abc, 1).unwrap(), "flash.display.MovieClip");
    }
}
