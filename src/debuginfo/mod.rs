//! # Debug-Info Model
//!
//! Parses the textual `.dbg` file the cc65 toolchain emits next to a
//! program image and answers the queries the debugger needs: machine
//! address to source line, address to lexical scope, scope to local
//! variables, and address or name to symbol.
//!
//! The model is loaded once at session start and immutable afterwards.
//! Parsing is a single pass over the records followed by a finalize phase
//! that computes span addresses, builds the interval index, and marks
//! library files.

mod intervals;
mod parser;
mod records;

pub use records::{
    CSymbol, Line, Module, Scope, Segment, SourceFile, Span, StorageClass, Symbol, TypeInfo,
    TypeKind,
};

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use log::warn;

use intervals::IntervalIndex;

/// The immutable debug-info database.
#[derive(Debug, Default)]
pub struct DebugInfo {
    files: HashMap<u32, SourceFile>,
    segments: HashMap<u32, Segment>,
    spans: HashMap<u32, Span>,
    lines: Vec<Line>,
    symbols: HashMap<u32, Symbol>,
    scopes: HashMap<u32, Scope>,
    csymbols: HashMap<u32, CSymbol>,
    types: HashMap<u32, TypeInfo>,
    modules: HashMap<u32, Module>,

    // Derived indices, built by finalize.
    index: IntervalIndex,
    span_lines: HashMap<u32, Vec<usize>>,
    span_scopes: HashMap<u32, Vec<u32>>,
    symbol_by_addr: HashMap<u32, u32>,
    symbol_by_name: HashMap<String, u32>,
}

impl DebugInfo {
    /// Parses debug info from text. Malformed records are skipped with a
    /// warning; unknown record kinds are skipped silently. Never fails:
    /// an unparsable file yields an empty database.
    pub fn parse(text: &str) -> DebugInfo {
        let mut info = DebugInfo::default();

        for (idx, raw_line) in text.lines().enumerate() {
            let lineno = idx + 1;
            let Some(record) = parser::parse_line(raw_line) else {
                if !raw_line.trim().is_empty() {
                    warn!("dbgfile line {lineno}: unparsable record skipped");
                }
                continue;
            };

            let ok = match record.kind.as_str() {
                "file" => info.add_file(&record),
                "seg" => info.add_segment(&record),
                "span" => info.add_span(&record),
                "line" => info.add_line(&record),
                "sym" => info.add_symbol(&record),
                "scope" => info.add_scope(&record),
                "csym" => info.add_csymbol(&record),
                "type" => info.add_type(&record),
                "mod" => info.add_module(&record),
                // `lib` records only matter through the module that
                // references them; other kinds (version, info, ...) are
                // not modeled.
                _ => true,
            };
            if !ok {
                warn!(
                    "dbgfile line {lineno}: malformed {} record skipped",
                    record.kind
                );
            }
        }

        info.finalize();
        info
    }

    /// Reads and parses a `.dbg` file from disk.
    pub fn parse_file(path: &Path) -> std::io::Result<DebugInfo> {
        Ok(DebugInfo::parse(&std::fs::read_to_string(path)?))
    }

    // ========== Record ingestion ==========

    fn add_file(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(name)) = (record.num("id"), record.text("name")) else {
            return false;
        };
        self.files.insert(
            id,
            SourceFile {
                id,
                name,
                size: record.num64("size"),
                is_library: false,
            },
        );
        true
    }

    fn add_segment(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(name), Some(start), Some(size)) = (
            record.num("id"),
            record.text("name"),
            record.num("start"),
            record.num("size"),
        ) else {
            return false;
        };
        self.segments.insert(
            id,
            Segment {
                id,
                name,
                start,
                size,
            },
        );
        true
    }

    fn add_span(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(seg), Some(start), Some(size)) = (
            record.num("id"),
            record.num("seg"),
            record.num("start"),
            record.num("size"),
        ) else {
            return false;
        };
        self.spans.insert(
            id,
            Span {
                id,
                seg,
                start,
                size,
                abs_start: 0, // filled by finalize
            },
        );
        true
    }

    fn add_line(&mut self, record: &parser::Record) -> bool {
        let (Some(file), Some(line)) = (record.num("file"), record.num("line")) else {
            return false;
        };
        // A line without spans is still recorded.
        let spans = record.id_list("span").unwrap_or_default();
        self.lines.push(Line {
            file,
            line,
            spans,
            line_type: record.num("type").unwrap_or(0),
        });
        true
    }

    fn add_symbol(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(name), Some(addr)) =
            (record.num("id"), record.text("name"), record.num("val"))
        else {
            return false;
        };
        self.symbols.insert(
            id,
            Symbol {
                id,
                name,
                addr,
                size: record.num("size"),
                sym_type: record.text("type"),
                seg: record.num("seg"),
            },
        );
        true
    }

    fn add_scope(&mut self, record: &parser::Record) -> bool {
        let Some(id) = record.num("id") else {
            return false;
        };
        self.scopes.insert(
            id,
            Scope {
                id,
                name: record.text("name").unwrap_or_default(),
                parent: record.num("parent"),
                scope_type: record.text("type"),
                size: record.num("size"),
                spans: record.id_list("span").unwrap_or_default(),
                module: record.num("mod"),
            },
        );
        true
    }

    fn add_csymbol(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(name), Some(scope)) =
            (record.num("id"), record.text("name"), record.num("scope"))
        else {
            return false;
        };
        self.csymbols.insert(
            id,
            CSymbol {
                id,
                name,
                scope,
                type_id: record.num("type"),
                storage: StorageClass::parse(record.get("sc").unwrap_or("auto")),
                offset: record.signed("offs").unwrap_or(0),
            },
        );
        true
    }

    fn add_type(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(val)) = (record.num("id"), record.get("val")) else {
            return false;
        };
        let Some(raw) = decode_hex(val) else {
            return false;
        };
        self.types.insert(id, TypeInfo::from_raw(id, raw));
        true
    }

    fn add_module(&mut self, record: &parser::Record) -> bool {
        let (Some(id), Some(name), Some(file)) =
            (record.num("id"), record.text("name"), record.num("file"))
        else {
            return false;
        };
        self.modules.insert(
            id,
            Module {
                id,
                name,
                file,
                lib: record.num("lib"),
            },
        );
        true
    }

    /// Computes span addresses, builds the derived indices, and marks
    /// files that belong to library modules.
    fn finalize(&mut self) {
        // (a) absolute span addresses
        let mut dropped = Vec::new();
        for span in self.spans.values_mut() {
            match self.segments.get(&span.seg) {
                Some(seg) => span.abs_start = seg.start + span.start,
                None => dropped.push(span.id),
            }
        }
        for id in dropped {
            warn!("span {id} references an unknown segment; dropped");
            self.spans.remove(&id);
        }

        // (b) interval index over all spans
        self.index = IntervalIndex::build(
            self.spans
                .values()
                .map(|s| (s.id, s.abs_start, s.size)),
        );

        // span -> lines
        for (idx, line) in self.lines.iter().enumerate() {
            for span in &line.spans {
                self.span_lines.entry(*span).or_default().push(idx);
            }
        }

        // (c) span -> scopes
        for scope in self.scopes.values() {
            for span in &scope.spans {
                self.span_scopes.entry(*span).or_default().push(scope.id);
            }
        }

        // address -> preferred symbol: labels beat equates, and a symbol
        // tied to a segment beats one that is not
        for sym in self.symbols.values() {
            let better = match self.symbol_by_addr.get(&sym.addr) {
                None => true,
                Some(cur_id) => match self.symbols.get(cur_id) {
                    None => true,
                    Some(cur) => {
                        (sym.is_label(), sym.seg.is_some()) > (cur.is_label(), cur.seg.is_some())
                    }
                },
            };
            if better {
                self.symbol_by_addr.insert(sym.addr, sym.id);
            }
        }
        for sym in self.symbols.values() {
            self.symbol_by_name
                .entry(sym.name.clone())
                .or_insert(sym.id);
        }

        // (d) library marking
        for module in self.modules.values() {
            if module.lib.is_some() {
                if let Some(file) = self.files.get_mut(&module.file) {
                    file.is_library = true;
                }
            }
        }
    }

    // ========== Queries ==========

    /// All spans containing `addr`, most specific (smallest) first.
    pub fn spans_at(&self, addr: u16) -> Vec<&Span> {
        let mut spans: Vec<&Span> = self
            .index
            .containing(addr as u32)
            .into_iter()
            .filter_map(|id| self.spans.get(&id))
            .collect();
        spans.sort_by_key(|s| (s.size, s.abs_start, s.id));
        spans
    }

    /// The preferred symbol defined exactly at `addr`.
    pub fn symbol_for(&self, addr: u16) -> Option<&Symbol> {
        self.symbol_by_addr
            .get(&(addr as u32))
            .and_then(|id| self.symbols.get(id))
    }

    /// The first symbol with the given name.
    pub fn symbol_by_name(&self, name: &str) -> Option<&Symbol> {
        self.symbol_by_name
            .get(name)
            .and_then(|id| self.symbols.get(id))
    }

    /// The best source line for an address.
    ///
    /// Candidates are the lines attached to the smallest containing span
    /// that has line attachments (spans of equal size pool their lines);
    /// among candidates a C line (type 1) wins, else the first.
    pub fn line_for(&self, addr: u16) -> Option<&Line> {
        let spans = self.spans_at(addr);
        let mut i = 0;
        while i < spans.len() {
            let size = spans[i].size;
            let mut candidates: Vec<&Line> = Vec::new();
            while i < spans.len() && spans[i].size == size {
                if let Some(line_ids) = self.span_lines.get(&spans[i].id) {
                    candidates.extend(line_ids.iter().map(|&idx| &self.lines[idx]));
                }
                i += 1;
            }
            if !candidates.is_empty() {
                return candidates
                    .iter()
                    .find(|l| l.is_c())
                    .copied()
                    .or_else(|| candidates.first().copied());
            }
        }
        None
    }

    /// Every line attached to a span containing `addr`, most specific
    /// span first.
    pub fn all_lines_for(&self, addr: u16) -> Vec<&Line> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for span in self.spans_at(addr) {
            if let Some(line_ids) = self.span_lines.get(&span.id) {
                for &idx in line_ids {
                    if seen.insert(idx) {
                        result.push(&self.lines[idx]);
                    }
                }
            }
        }
        result
    }

    /// The scopes attached to the most specific span at `addr` that has
    /// any scope attachment. Walk [`DebugInfo::scope_chain`] from one of
    /// these for the full active chain.
    pub fn scopes_for(&self, addr: u16) -> Vec<&Scope> {
        for span in self.spans_at(addr) {
            if let Some(scope_ids) = self.span_scopes.get(&span.id) {
                return scope_ids
                    .iter()
                    .filter_map(|id| self.scopes.get(id))
                    .collect();
            }
        }
        Vec::new()
    }

    /// The scope chain from `leaf` to the root, leaf first.
    pub fn scope_chain(&self, leaf: u32) -> Vec<&Scope> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.scopes.get(&leaf);
        while let Some(scope) = current {
            if !visited.insert(scope.id) {
                warn!("scope {leaf} has a cyclic parent chain");
                break;
            }
            chain.push(scope);
            current = scope.parent.and_then(|id| self.scopes.get(&id));
        }
        chain
    }

    /// Every C symbol declared directly in the scope.
    pub fn variables_for(&self, scope_id: u32) -> Vec<&CSymbol> {
        let mut vars: Vec<&CSymbol> = self
            .csymbols
            .values()
            .filter(|c| c.scope == scope_id)
            .collect();
        vars.sort_by_key(|c| c.id);
        vars
    }

    /// The scope's frame size: its declared size, or the summed sizes of
    /// its positive-offset auto symbols (the incoming parameter bytes)
    /// when no size was declared. Parameters without type information
    /// count as two bytes, the cc65 default argument width.
    pub fn frame_size(&self, scope_id: u32) -> u32 {
        if let Some(size) = self.scopes.get(&scope_id).and_then(|s| s.size) {
            return size;
        }
        self.csymbols
            .values()
            .filter(|c| c.scope == scope_id && c.storage == StorageClass::Auto && c.offset >= 0)
            .map(|c| {
                c.type_id
                    .and_then(|id| self.types.get(&id))
                    .and_then(|t| t.size)
                    .unwrap_or(2)
            })
            .sum()
    }

    /// The lowest code address generated for a source line, used to plant
    /// breakpoints.
    pub fn address_for_line(&self, file_id: u32, line: u32) -> Option<u16> {
        self.lines
            .iter()
            .filter(|l| l.file == file_id && l.line == line)
            .flat_map(|l| l.spans.iter())
            .filter_map(|span_id| self.spans.get(span_id))
            .map(|s| s.abs_start)
            .filter(|&a| a <= 0xFFFF)
            .min()
            .map(|a| a as u16)
    }

    /// Looks up a file by exact recorded name, or by file-name component
    /// when no exact match exists.
    pub fn file_by_name(&self, name: &str) -> Option<&SourceFile> {
        if let Some(file) = self.files.values().find(|f| f.name == name) {
            return Some(file);
        }
        let wanted = Path::new(name).file_name()?;
        self.files
            .values()
            .find(|f| Path::new(&f.name).file_name() == Some(wanted))
    }

    /// File accessor.
    pub fn file(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(&id)
    }

    /// Segment accessor.
    pub fn segment(&self, id: u32) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// Looks up a segment by name.
    pub fn segment_by_name(&self, name: &str) -> Option<&Segment> {
        self.segments.values().find(|s| s.name == name)
    }

    /// Scope accessor.
    pub fn scope(&self, id: u32) -> Option<&Scope> {
        self.scopes.get(&id)
    }

    /// Span accessor.
    pub fn span(&self, id: u32) -> Option<&Span> {
        self.spans.get(&id)
    }

    /// Type accessor.
    pub fn type_info(&self, id: u32) -> Option<&TypeInfo> {
        self.types.get(&id)
    }

    /// Module accessor.
    pub fn module(&self, id: u32) -> Option<&Module> {
        self.modules.get(&id)
    }

    /// Iterates all segments.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.values()
    }
}

/// Locates the debug-info file for a program image: `<path>.dbg` first,
/// then the path with its extension replaced by `.dbg`.
pub fn resolve_debug_file(program: &Path) -> Option<PathBuf> {
    let mut appended = program.as_os_str().to_owned();
    appended.push(".dbg");
    let appended = PathBuf::from(appended);
    if appended.exists() {
        return Some(appended);
    }

    if program.extension().is_some() {
        let replaced = program.with_extension("dbg");
        if replaced.exists() {
            return Some(replaced);
        }
    }
    None
}

/// Decodes a hex-encoded byte string; `None` on odd length or non-hex
/// characters.
fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 || !text.is_ascii() {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
version major=2,minor=0
file id=1,name=\"test.c\",size=100
file id=2,name=\"lib/conio.s\",size=40
seg id=1,name=\"CODE\",start=0x1000,size=256
span id=1,seg=1,start=0,size=100
span id=2,seg=1,start=50,size=10
line file=1,line=10,span=1
line file=1,line=20,span=2
sym id=1,name=\"_main\",addrsize=absolute,size=40,seg=1,type=lab,val=0x1000
sym id=2,name=\"limit\",addrsize=absolute,type=equ,val=0x1000
scope id=1,name=\"_main\",mod=1,type=scope,size=40,span=1
csym id=1,name=\"argc\",scope=1,type=1,sc=auto,offs=2
csym id=2,name=\"i\",scope=1,type=1,sc=auto,offs=-2
type id=1,val=\"02\"
mod id=1,name=\"test\",file=1
mod id=2,name=\"conio\",file=2,lib=1
lib id=1,name=\"c64.lib\"
";

    #[test]
    fn test_parse_counts() {
        let info = DebugInfo::parse(SAMPLE);
        assert!(info.file(1).is_some());
        assert!(info.segment(1).is_some());
        assert!(info.span(1).is_some());
        assert!(info.scope(1).is_some());
        assert!(info.type_info(1).is_some());
    }

    #[test]
    fn test_span_abs_start() {
        let info = DebugInfo::parse(SAMPLE);
        assert_eq!(info.span(2).unwrap().abs_start, 0x1032);
    }

    #[test]
    fn test_library_marking() {
        let info = DebugInfo::parse(SAMPLE);
        assert!(!info.file(1).unwrap().is_library);
        assert!(info.file(2).unwrap().is_library);
    }

    #[test]
    fn test_symbol_preference() {
        let info = DebugInfo::parse(SAMPLE);
        // lab with seg beats equ at the same address
        assert_eq!(info.symbol_for(0x1000).unwrap().name, "_main");
    }

    #[test]
    fn test_malformed_record_skipped() {
        let info = DebugInfo::parse("seg id=1\nfile id=1,name=\"a.c\"\n");
        assert!(info.segment(1).is_none());
        assert!(info.file(1).is_some());
    }

    #[test]
    fn test_frame_size_from_declared() {
        let info = DebugInfo::parse(SAMPLE);
        assert_eq!(info.frame_size(1), 40);
    }

    #[test]
    fn test_frame_size_from_params() {
        let text = "\
seg id=1,name=\"CODE\",start=0x1000,size=16
scope id=1,name=\"_f\",type=scope
csym id=1,name=\"a\",scope=1,sc=auto,offs=0
csym id=2,name=\"b\",scope=1,sc=auto,offs=2
csym id=3,name=\"loc\",scope=1,sc=auto,offs=-2
";
        let info = DebugInfo::parse(text);
        // two untyped parameters at two bytes each
        assert_eq!(info.frame_size(1), 4);
    }
}
