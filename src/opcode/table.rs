use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    U8,
    U30,
    S24,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    String,
    Uint,
    Int,
    Double,
    Multiname,
    Namespace,
    MethodInfo,
    Exception,
    MultinameAndArg,
    MethodInfoAndArg,
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub name: &'static str,
    pub operands: &'static [Decoder],
    pub handler: Option<Handler>,
}

const fn op(name: &'static str, operands: &'static [Decoder]) -> OpcodeInfo {
    OpcodeInfo { name, operands, handler: None }
}

const fn op_h(name: &'static str, operands: &'static [Decoder], handler: Handler) -> OpcodeInfo {
    OpcodeInfo { name, operands, handler: Some(handler) }
}

static U30: &[Decoder] = &[Decoder::U30];
static U8_1: &[Decoder] = &[Decoder::U8];
static S24: &[Decoder] = &[Decoder::S24];
static U30_U30: &[Decoder] = &[Decoder::U30, Decoder::U30];
static NONE: &[Decoder] = &[];
static LOOKUPSWITCH_BASE: &[Decoder] = &[Decoder::S24, Decoder::U30];

/// The 256-entry opcode table, lazily built once. Entries not present here
/// are unrecognised opcodes and disassembly reports `BadOpcode` for them.
///
/// Matches the known AVM2 instruction set, documented and undocumented
/// alike (the undocumented ones are named with an `OP_` prefix).
static OPCODES: OnceLock<[Option<OpcodeInfo>; 256]> = OnceLock::new();

pub fn lookup(byte: u8) -> Option<OpcodeInfo> {
    OPCODES.get_or_init(build_table)[byte as usize]
}

fn build_table() -> [Option<OpcodeInfo>; 256] {
    let mut t: [Option<OpcodeInfo>; 256] = [None; 256];
    let mut set = |byte: u8, info: OpcodeInfo| {
        t[byte as usize] = Some(info);
    };

    // Undocumented opcodes observed in real SWFs, not in Adobe's AVM2
    // overview.
    set(0x01, op("OP_bkpt", NONE));
    set(0x22, op("OP_pushconstant", NONE));
    set(0x35, op("OP_li8", NONE));
    set(0x36, op("OP_li16", NONE));
    set(0x37, op("OP_li32", NONE));
    set(0x38, op("OP_lf32", NONE));
    set(0x39, op("OP_lf64", NONE));
    set(0x3A, op("OP_si8", NONE));
    set(0x3B, op("OP_si16", NONE));
    set(0x3C, op("OP_si32", NONE));
    set(0x3D, op("OP_sf32", NONE));
    set(0x3E, op("OP_sf64", NONE));
    set(0x4B, op("OP_callsuperid", NONE));
    set(0x4D, op("OP_callinterface", NONE));
    set(0x50, op("OP_sxi1", NONE));
    set(0x51, op("OP_sxi8", NONE));
    set(0x52, op("OP_sxi16", NONE));
    set(0x53, op("OP_applytype", U30));
    set(0x5F, op("OP_finddef", U30));
    set(0x67, op("OP_getouterscope", NONE));
    set(0x6B, op("OP_deletepropertylate", NONE));
    set(0x81, op("OP_coerce_b", NONE));
    set(0x83, op("OP_coerce_i", NONE));
    set(0x84, op("OP_coerce_d", NONE));
    set(0x88, op("OP_coerce_u", NONE));
    set(0x89, op("OP_coerce_o", NONE));
    set(0x9A, op("OP_concat", NONE));
    set(0x9B, op("OP_add_d", NONE));
    set(0xF2, op("OP_bkptline", U30));
    set(0xF3, op("OP_timestamp", NONE));

    // Documented instructions.
    set(0xA0, op("add", NONE));
    set(0xC5, op("add_i", NONE));
    set(0x86, op("astype", NONE));
    set(0x87, op("astypelate", NONE));
    set(0xA8, op("bitand", NONE));
    set(0x97, op("bitnot", NONE));
    set(0xA9, op("bitor", NONE));
    set(0xAA, op("bitxor", NONE));
    set(0x41, op("call", U30));
    set(0x43, op("callmethod", U30_U30));
    set(0x46, op_h("callproperty", U30_U30, Handler::MultinameAndArg));
    set(0x4C, op_h("callproplex", U30_U30, Handler::MultinameAndArg));
    set(0x4F, op_h("callpropvoid", U30_U30, Handler::MultinameAndArg));
    set(0x44, op_h("callstatic", U30_U30, Handler::MethodInfoAndArg));
    set(0x45, op_h("callsuper", U30_U30, Handler::MultinameAndArg));
    set(0x4E, op_h("callsupervoid", U30_U30, Handler::MultinameAndArg));
    set(0x78, op("checkfilter", NONE));
    set(0x80, op_h("coerce", U30, Handler::Multiname));
    set(0x82, op("coerce_a", NONE));
    set(0x85, op("coerce_s", NONE));
    set(0x42, op("construct", U30));
    set(0x4A, op_h("constructprop", U30_U30, Handler::MultinameAndArg));
    set(0x49, op("constructsuper", U30));
    set(0x76, op("convert_b", NONE));
    set(0x73, op("convert_i", NONE));
    set(0x75, op("convert_d", NONE));
    set(0x77, op("convert_o", NONE));
    set(0x74, op("convert_u", NONE));
    set(0x70, op("convert_s", NONE));
    set(0xEF, op("debug", &[Decoder::U8, Decoder::U30, Decoder::U8, Decoder::U30]));
    set(0xF1, op_h("debugfile", U30, Handler::String));
    set(0xF0, op("debugline", U30));
    set(0x94, op("declocal", U30));
    set(0xC3, op("declocal_i", U30));
    set(0x93, op("decrement", NONE));
    set(0xC1, op("decrement_i", NONE));
    set(0x6A, op_h("deleteproperty", U30, Handler::Multiname));
    set(0xA3, op("divide", NONE));
    set(0x2A, op("dup", NONE));
    set(0x06, op_h("dxns", U30, Handler::String));
    set(0x07, op("dxnslate", NONE));
    set(0xAB, op("equals", NONE));
    set(0x72, op("esc_xattr", NONE));
    set(0x71, op("esc_xelem", NONE));
    set(0x5E, op_h("findproperty", U30, Handler::Multiname));
    set(0x5D, op_h("findpropstrict", U30, Handler::Multiname));
    set(0x59, op_h("getdescendants", U30, Handler::Multiname));
    set(0x64, op("getglobalscope", NONE));
    set(0x6E, op("getglobalslot", U30));
    set(0x60, op_h("getlex", U30, Handler::Multiname));
    set(0x62, op("getlocal", U30));
    set(0xD0, op("getlocal_0", NONE));
    set(0xD1, op("getlocal_1", NONE));
    set(0xD2, op("getlocal_2", NONE));
    set(0xD3, op("getlocal_3", NONE));
    set(0x66, op_h("getproperty", U30, Handler::Multiname));
    set(0x65, op("getscopeobject", U8_1));
    set(0x6C, op("getslot", U30));
    set(0x04, op_h("getsuper", U30, Handler::Multiname));
    set(0xAF, op("greaterthan", NONE));
    set(0xB0, op("greaterequals", NONE));
    set(0x1F, op("hasnext", NONE));
    set(0x32, op("hasnext2", U30_U30));
    set(0x13, op("ifeq", S24));
    set(0x12, op("iffalse", S24));
    set(0x18, op("ifge", S24));
    set(0x17, op("ifgt", S24));
    set(0x16, op("ifle", S24));
    set(0x15, op("iflt", S24));
    set(0x0F, op("ifnge", S24));
    set(0x0E, op("ifngt", S24));
    set(0x0D, op("ifnle", S24));
    set(0x0C, op("ifnlt", S24));
    set(0x14, op("ifne", S24));
    set(0x19, op("ifstricteq", S24));
    set(0x1A, op("ifstrictne", S24));
    set(0x11, op("iftrue", S24));
    set(0xB4, op("in", NONE));
    set(0x92, op("inclocal", U30));
    set(0xC2, op("inclocal_i", U30));
    set(0x91, op("increment", NONE));
    set(0xC0, op("increment_i", NONE));
    set(0x68, op_h("initproperty", U30, Handler::Multiname));
    set(0xB1, op("instanceof", NONE));
    set(0xB2, op_h("istype", U30, Handler::Multiname));
    set(0xB3, op("istypelate", NONE));
    set(0x10, op("jump", S24));
    set(0x08, op("kill", U30));
    set(0x09, op("label", NONE));
    set(0xAE, op("lessequals", NONE));
    set(0xAD, op("lessthan", NONE));
    set(0x34, op("pushdnan", NONE));
    // Variable length: default_offset, case_count, then case_count+1 case
    // offsets handled specially by the disassembler.
    set(0x1B, op("lookupswitch", LOOKUPSWITCH_BASE));
    set(0xA5, op("lshift", NONE));
    set(0xA4, op("modulo", NONE));
    set(0xA2, op("multiply", NONE));
    set(0xC7, op("multiply_i", NONE));
    set(0x90, op("negate", NONE));
    set(0xC4, op("negate_i", NONE));
    set(0x57, op("newactivation", NONE));
    set(0x56, op("newarray", U30));
    set(0x5A, op_h("newcatch", U30, Handler::Exception));
    set(0x58, op("newclass", U30));
    set(0x40, op_h("newfunction", U30, Handler::MethodInfo));
    set(0x55, op("newobject", U30));
    set(0x1E, op("nextname", NONE));
    set(0x23, op("nextvalue", NONE));
    set(0x02, op("nop", NONE));
    set(0x96, op("not", NONE));
    set(0x29, op("pop", NONE));
    set(0x1D, op("popscope", NONE));
    set(0x24, op("pushbyte", U8_1));
    set(0x2F, op_h("pushdouble", U30, Handler::Double));
    set(0x27, op("pushfalse", NONE));
    set(0x2D, op_h("pushint", U30, Handler::Int));
    set(0x31, op_h("pushnamespace", U30, Handler::Namespace));
    set(0x28, op("pushnan", NONE));
    set(0x20, op("pushnull", NONE));
    set(0x30, op("pushscope", NONE));
    set(0x25, op("pushshort", U30));
    set(0x2C, op_h("pushstring", U30, Handler::String));
    set(0x26, op("pushtrue", NONE));
    set(0x2E, op_h("pushuint", U30, Handler::Uint));
    set(0x21, op("pushundefined", NONE));
    set(0x1C, op("pushwith", NONE));
    set(0x48, op("returnvalue", NONE));
    set(0x47, op("returnvoid", NONE));
    set(0xA6, op("rshift", NONE));
    set(0x63, op("setlocal", U30));
    set(0xD4, op("setlocal_0", NONE));
    set(0xD5, op("setlocal_1", NONE));
    set(0xD6, op("setlocal_2", NONE));
    set(0xD7, op("setlocal_3", NONE));
    set(0x6F, op("setglobalslot", U30));
    set(0x61, op_h("setproperty", U30, Handler::Multiname));
    set(0x6D, op("setslot", U30));
    set(0x05, op_h("setsuper", U30, Handler::Multiname));
    set(0xAC, op("strictequals", NONE));
    set(0xA1, op("subtract", NONE));
    set(0xC6, op("subtract_i", NONE));
    set(0x2B, op("swap", NONE));
    set(0x03, op("throw", NONE));
    set(0x95, op("typeof", NONE));
    set(0xA7, op("urshift", NONE));

    t
}
