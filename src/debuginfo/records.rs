//! # Debug-Info Entities
//!
//! The typed records decoded from a cc65 `.dbg` file. Every entity is keyed
//! by the small integer id assigned by the toolchain; cross-references
//! between entities use those ids.

/// A source file referenced by the debug info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Toolchain-assigned id.
    pub id: u32,
    /// File name as recorded (usually relative to the compile directory).
    pub name: String,
    /// Size in bytes at compile time, when recorded.
    pub size: Option<u64>,
    /// True when the owning module came from a library; frames in library
    /// code are suppressed from stack traces.
    pub is_library: bool,
}

/// A linker segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Toolchain-assigned id.
    pub id: u32,
    /// Segment name, e.g. `CODE` or `RODATA`.
    pub name: String,
    /// Absolute start address.
    pub start: u32,
    /// Size in bytes.
    pub size: u32,
}

/// A contiguous range of output generated by one source construct.
///
/// Spans nest; one machine address can belong to several spans. The range
/// is half-open: `[abs_start, abs_start + size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Toolchain-assigned id.
    pub id: u32,
    /// Owning segment id.
    pub seg: u32,
    /// Offset from the segment start.
    pub start: u32,
    /// Size in bytes.
    pub size: u32,
    /// Absolute start address, `segment.start + start`; computed during
    /// finalize.
    pub abs_start: u32,
}

impl Span {
    /// True if the absolute address lies inside this span.
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.abs_start && addr < self.abs_start + self.size
    }
}

/// A source-line record, tying zero or more spans to a file and line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Owning file id.
    pub file: u32,
    /// 1-based source line number.
    pub line: u32,
    /// Spans generated by this line; may be empty.
    pub spans: Vec<u32>,
    /// Line type: 1 marks a high-level (C) line, anything else assembly.
    pub line_type: u32,
}

impl Line {
    /// True for lines originating from C source.
    pub fn is_c(&self) -> bool {
        self.line_type == 1
    }
}

/// A symbol (label or equate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Toolchain-assigned id.
    pub id: u32,
    /// Symbol name, e.g. `_main`.
    pub name: String,
    /// Value; an address for labels.
    pub addr: u32,
    /// Size in bytes, when recorded.
    pub size: Option<u32>,
    /// Symbol type: `lab` (label) or `equ` (equate), when recorded.
    pub sym_type: Option<String>,
    /// Owning segment, when the symbol is tied to one.
    pub seg: Option<u32>,
}

impl Symbol {
    /// True for label symbols.
    pub fn is_label(&self) -> bool {
        self.sym_type.as_deref() == Some("lab")
    }
}

/// A lexical scope. Scopes form a forest through `parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Toolchain-assigned id.
    pub id: u32,
    /// Scope name; functions carry the assembly-level name (`_main`).
    pub name: String,
    /// Parent scope id; absent for module-level scopes.
    pub parent: Option<u32>,
    /// Scope type; `scope` denotes a function scope.
    pub scope_type: Option<String>,
    /// Code size covered, when recorded.
    pub size: Option<u32>,
    /// Spans marking the scope's extent.
    pub spans: Vec<u32>,
    /// Owning module, when recorded.
    pub module: Option<u32>,
}

impl Scope {
    /// True for function scopes.
    pub fn is_function(&self) -> bool {
        self.scope_type.as_deref() == Some("scope")
    }
}

/// Storage class of a C symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageClass {
    /// Stack-allocated, addressed relative to the frame pointer.
    #[default]
    Auto,
    /// Statically allocated.
    Static,
    /// Kept in the cc65 register bank.
    Register,
    /// Defined in another translation unit.
    Extern,
}

impl StorageClass {
    /// Parses the `sc=` property value.
    pub fn parse(value: &str) -> StorageClass {
        match value {
            "static" => StorageClass::Static,
            "reg" | "register" => StorageClass::Register,
            "ext" | "extern" => StorageClass::Extern,
            _ => StorageClass::Auto,
        }
    }
}

/// A C-level symbol (variable or parameter) inside a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSymbol {
    /// Toolchain-assigned id.
    pub id: u32,
    /// C-level name, without the assembly underscore prefix.
    pub name: String,
    /// Owning scope id.
    pub scope: u32,
    /// Type id, when recorded.
    pub type_id: Option<u32>,
    /// Storage class.
    pub storage: StorageClass,
    /// Signed offset from the C frame pointer; parameters sit at positive
    /// offsets, locals at negative ones.
    pub offset: i32,
}

/// Coarse classification of a decoded type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// No type bytes.
    Void,
    /// A scalar integer or character type.
    Integral,
    /// A pointer; two bytes on the 6502.
    Pointer,
    /// An array with an element count.
    Array,
    /// A struct or union.
    Struct,
    /// A function type.
    Function,
    /// Anything the decoder does not classify.
    Other,
}

/// A decoded `type` record.
///
/// The record's value is a hex-encoded generic-type byte string. Only the
/// coarse shape matters to the debugger (pointers and arrays display as
/// addresses, integrals by their width), so decoding classifies the
/// leading constructor byte and keeps the raw bytes for anything deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Toolchain-assigned id.
    pub id: u32,
    /// Raw generic-type bytes.
    pub raw: Vec<u8>,
    /// Classified outer constructor.
    pub kind: TypeKind,
    /// Total size in bytes, when derivable.
    pub size: Option<u32>,
}

impl TypeInfo {
    /// Builds a TypeInfo from the raw generic-type bytes.
    pub fn from_raw(id: u32, raw: Vec<u8>) -> TypeInfo {
        let (kind, size) = decode_type_bytes(&raw);
        TypeInfo {
            id,
            raw,
            kind,
            size,
        }
    }
}

/// Classifies a generic-type byte string by its leading constructor byte:
/// $80-class bytes introduce pointers, $A0 arrays (a 32-bit element count
/// follows, then the element type), $C0 structs/unions, $E0 functions.
/// Bytes below $80 are scalars whose low bits carry the width. Unknown
/// shapes classify as `Other` rather than failing.
fn decode_type_bytes(raw: &[u8]) -> (TypeKind, Option<u32>) {
    let Some(&lead) = raw.first() else {
        return (TypeKind::Void, None);
    };

    match lead & 0xE0 {
        0x80 => (TypeKind::Pointer, Some(2)),
        0xA0 => {
            if raw.len() >= 5 {
                let count =
                    u32::from_be_bytes([raw[1], raw[2], raw[3], raw[4]]);
                let (_, elem_size) = decode_type_bytes(&raw[5..]);
                (TypeKind::Array, elem_size.map(|s| s.saturating_mul(count)))
            } else {
                (TypeKind::Array, None)
            }
        }
        0xC0 => (TypeKind::Struct, None),
        0xE0 => (TypeKind::Function, None),
        _ => {
            let width = (lead & 0x07) as u32;
            if width == 0 {
                (TypeKind::Integral, Some(1))
            } else if width <= 4 {
                (TypeKind::Integral, Some(width))
            } else {
                (TypeKind::Other, None)
            }
        }
    }
}

/// A compiled module (object file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Toolchain-assigned id.
    pub id: u32,
    /// Module name.
    pub name: String,
    /// Main source file id.
    pub file: u32,
    /// Owning library id, when the module came out of one.
    pub lib: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_is_half_open() {
        let span = Span {
            id: 1,
            seg: 1,
            start: 0,
            size: 16,
            abs_start: 0x1000,
        };
        assert!(span.contains(0x1000));
        assert!(span.contains(0x100F));
        assert!(!span.contains(0x1010));
        assert!(!span.contains(0x0FFF));
    }

    #[test]
    fn test_storage_class_parse() {
        assert_eq!(StorageClass::parse("auto"), StorageClass::Auto);
        assert_eq!(StorageClass::parse("static"), StorageClass::Static);
        assert_eq!(StorageClass::parse("reg"), StorageClass::Register);
        assert_eq!(StorageClass::parse("ext"), StorageClass::Extern);
    }

    #[test]
    fn test_type_decoding() {
        assert_eq!(TypeInfo::from_raw(0, vec![]).kind, TypeKind::Void);

        let ptr = TypeInfo::from_raw(1, vec![0x80, 0x02]);
        assert_eq!(ptr.kind, TypeKind::Pointer);
        assert_eq!(ptr.size, Some(2));

        let int16 = TypeInfo::from_raw(2, vec![0x02]);
        assert_eq!(int16.kind, TypeKind::Integral);
        assert_eq!(int16.size, Some(2));

        // array of 8 two-byte scalars
        let arr = TypeInfo::from_raw(3, vec![0xA0, 0, 0, 0, 8, 0x02]);
        assert_eq!(arr.kind, TypeKind::Array);
        assert_eq!(arr.size, Some(16));
    }
}
