use crate::opcode::OperandValue;
use crate::{parse, resolve::resolve_multiname};
use rstest::rstest;

fn empty_header() -> Vec<u8> {
    vec![16, 0, 46, 0, 0, 0, 0, 0, 0, 0, 0]
}

#[rstest]
#[case(&[0xE5, 0x8E, 0x26], 624485)]
#[case(&[0x00], 0)]
#[case(&[0x7F], 127)]
fn u30_scenarios(#[case] bytes: &[u8], #[case] expected: u32) {
    let mut c = crate::cursor::Cursor::new(bytes);
    assert_eq!(c.read_u30().unwrap(), expected);
}

#[test]
fn movieclip_qname_resolves_with_dotted_namespace() {
    use crate::pool::{ConstantPool, Multiname, Namespace, NamespaceKind};

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
    let abc = crate::AbcFile {
        minor: 16,
        major: 46,
        pool,
        methods: Vec::new(),
        metadata: Vec::new(),
        instances: Vec::new(),
        classes: Vec::new(),
        scripts: Vec::new(),
        method_bodies: Vec::new(),
    };
    assert_eq!(resolve_multiname(&abc, 1).unwrap(), "flash.display.MovieClip");
}

#[test]
fn lookupswitch_disassembles_with_case_offsets() {
    let mut data = empty_header();
    data.extend([0, 0, 0, 0]); // method, metadata, class, script counts
    data.push(1); // body count
    data.extend([0, 0, 0, 0, 0]); // method, max_stack, local_count, scopes
    let code = [
        0x1B, 0x10, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x02, 0x00, 0x00, 0x03, 0x00, 0x00,
    ];
    data.push(code.len() as u8);
    data.extend(code);
    data.extend([0, 0]); // exception_count, trait_count

    let abc = parse(&data).unwrap();
    let body = &abc.method_bodies[0];
    let ops: Vec<_> = body.disassemble(&abc).collect::<Result<_, _>>().unwrap();
    assert_eq!(ops.len(), 1);
    let op = &ops[0];
    assert_eq!(op.name, "lookupswitch");
    assert_eq!(
        op.operands,
        vec![
            OperandValue::S24(16),
            OperandValue::U32(2),
            OperandValue::S24(1),
            OperandValue::S24(2),
            OperandValue::S24(3),
        ]
    );

    let stripped = body.strip_operands().unwrap();
    assert_eq!(stripped, vec![0x1B]);
}

/// A small hand-built ABC file: one string, one namespace, and a method
/// body whose code pushes both before returning.
fn pushstring_and_namespace_abc() -> Vec<u8> {
    let mut data = vec![16, 0, 46, 0]; // minor, major
    data.push(0); // int count
    data.push(0); // uint count
    data.push(0); // double count
    data.push(2); // string count: sentinel + "hello"
    data.push(5); // u30 length of "hello"
    data.extend(b"hello");
    data.push(2); // namespace count: sentinel + one entry
    data.push(0x16); // PackageNamespace
    data.push(1); // name -> string index 1 ("hello")
    data.push(0); // ns-set count
    data.push(0); // multiname count
    data.extend([0, 0, 0, 0]); // method, metadata, class, script counts
    data.push(1); // body count
    data.extend([0, 0, 0, 0, 0]); // method, max_stack, local_count, scopes
    let code = [0x2C, 0x01, 0x31, 0x01, 0x47]; // pushstring 1; pushnamespace 1; returnvoid
    data.push(code.len() as u8);
    data.extend(code);
    data.extend([0, 0]); // exception_count, trait_count
    data
}

#[test]
fn decoded_abc_file_matches_snapshot() {
    let abc = parse(&pushstring_and_namespace_abc()).unwrap();
    insta::with_settings!({sort_maps => true}, {
        insta::assert_yaml_snapshot!(abc);
    });
}

#[test]
fn disassembly_resolves_string_and_namespace_operands() {
    let abc = parse(&pushstring_and_namespace_abc()).unwrap();
    let body = &abc.method_bodies[0];
    let ops: Vec<_> = body.disassemble(&abc).collect::<Result<_, _>>().unwrap();
    insta::assert_yaml_snapshot!(ops);
}

#[test]
fn unknown_opcode_reports_bad_opcode() {
    let mut data = empty_header();
    data.extend([0, 0, 0, 0]);
    data.push(1);
    data.extend([0, 0, 0, 0, 0]);
    data.push(1);
    data.push(0xFF);
    data.extend([0, 0]);

    let abc = parse(&data).unwrap();
    let body = &abc.method_bodies[0];
    let mut dis = body.disassemble(&abc);
    match dis.next().unwrap() {
        Err(crate::error::Error::BadOpcode { byte: 0xFF }) => {}
        other => panic!("expected BadOpcode, got {other:?}"),
    }
}
