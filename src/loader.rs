//! # Program Loader
//!
//! Places a program image into simulator memory. Images produced by ld65's
//! sim65 target carry a 12-byte header selecting the CPU variant, the
//! zero-page location of the cc65 software-stack pointer, and the load and
//! reset addresses; raw images load at $0200 and start there.
//!
//! The loader also pre-fills the paravirtualization hook page ($FFF0-$FFF9)
//! with RTS so an unhandled trap returns cleanly to its caller.

use log::warn;
use thiserror::Error;

use crate::cpu::RESET_VECTOR;
use crate::host::{PARAVIRT_BASE, PARAVIRT_TOP};
use crate::opcodes::CpuType;
use crate::MemoryBus;

/// Magic bytes opening a sim65 program header.
pub const SIM65_MAGIC: &[u8; 5] = b"sim65";

/// Total sim65 header length; the payload starts here.
pub const SIM65_HEADER_LEN: usize = 12;

/// Load address used for images without a header.
pub const DEFAULT_LOAD_ADDR: u16 = 0x0200;

/// Errors raised while placing a program image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The image carries the sim65 magic but is shorter than a header.
    #[error("sim65 header truncated: image is only {len} bytes")]
    TruncatedHeader {
        /// Total image length.
        len: usize,
    },

    /// The header names a CPU type the simulator does not provide.
    #[error("unsupported sim65 CPU type {0}")]
    UnsupportedCpu(u8),

    /// The payload does not fit between the load address and the top of
    /// the 64 KiB address space.
    #[error("payload of {size} bytes does not fit at ${load_addr:04X}")]
    TooLarge {
        /// Requested load address.
        load_addr: u16,
        /// Payload size in bytes.
        size: usize,
    },
}

/// Result of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedProgram {
    /// Address the payload was written to.
    pub load_addr: u16,
    /// Initial program counter, also written to the reset vector.
    pub reset_addr: u16,
    /// Zero-page base of the 16-bit software-stack pointer.
    pub sp_addr: u8,
    /// CPU variant requested by the image.
    pub cpu_type: CpuType,
}

/// Loads a program image into memory.
///
/// If the image starts with `"sim65"` the 12-byte header is interpreted as
/// laid out below and the payload follows it; otherwise the whole slice is
/// the payload, loaded at [`DEFAULT_LOAD_ADDR`] (or `forced_addr`), with
/// the reset address equal to the load address and the CPU defaulting to
/// the NMOS 6502.
///
/// | Offset | Width | Meaning                          |
/// |--------|-------|----------------------------------|
/// | 0      | 5     | magic `"sim65"`                  |
/// | 5      | 1     | format version                   |
/// | 6      | 1     | CPU: 0 = 6502, 1 = 65C02         |
/// | 7      | 1     | software-stack ZP base           |
/// | 8      | 2     | load address (little-endian)     |
/// | 10     | 2     | reset address (little-endian)    |
///
/// `forced_addr` overrides the load address from either source. The reset
/// vector at $FFFC is set to the reset address, and the hook page is
/// pre-filled with RTS.
pub fn load_program<M: MemoryBus>(
    memory: &mut M,
    image: &[u8],
    forced_addr: Option<u16>,
) -> Result<LoadedProgram, LoadError> {
    let (payload, mut load_addr, reset_addr, sp_addr, cpu_type) =
        if image.starts_with(SIM65_MAGIC) {
            if image.len() < SIM65_HEADER_LEN {
                return Err(LoadError::TruncatedHeader { len: image.len() });
            }
            let version = image[5];
            if version != 2 {
                warn!("sim65 header version {version} (expected 2); loading anyway");
            }
            let cpu_type = match image[6] {
                0 => CpuType::Mos6502,
                1 => CpuType::Wdc65C02,
                other => return Err(LoadError::UnsupportedCpu(other)),
            };
            let sp_addr = image[7];
            let load_addr = u16::from_le_bytes([image[8], image[9]]);
            let reset_addr = u16::from_le_bytes([image[10], image[11]]);
            (
                &image[SIM65_HEADER_LEN..],
                load_addr,
                Some(reset_addr),
                sp_addr,
                cpu_type,
            )
        } else {
            (image, DEFAULT_LOAD_ADDR, None, 0x00, CpuType::Mos6502)
        };

    if let Some(addr) = forced_addr {
        load_addr = addr;
    }
    // Headerless images start where they load.
    let reset_addr = reset_addr.unwrap_or(load_addr);

    if load_addr as usize + payload.len() > 0x10000 {
        return Err(LoadError::TooLarge {
            load_addr,
            size: payload.len(),
        });
    }

    for addr in PARAVIRT_BASE..=PARAVIRT_TOP {
        memory.write(addr, 0x60); // RTS
    }
    memory.load(load_addr, payload);
    memory.write_word(RESET_VECTOR, reset_addr);

    Ok(LoadedProgram {
        load_addr,
        reset_addr,
        sp_addr,
        cpu_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_raw_image_defaults() {
        let mut mem = FlatMemory::new();
        let loaded = load_program(&mut mem, &[0xA9, 0x01, 0x60], None).unwrap();

        assert_eq!(loaded.load_addr, 0x0200);
        assert_eq!(loaded.reset_addr, 0x0200);
        assert_eq!(loaded.cpu_type, CpuType::Mos6502);
        assert_eq!(mem.read(0x0200), 0xA9);
        assert_eq!(mem.read_word(RESET_VECTOR), 0x0200);
    }

    #[test]
    fn test_sim65_header() {
        let mut mem = FlatMemory::new();
        let mut image = Vec::new();
        image.extend_from_slice(b"sim65");
        image.push(2); // version
        image.push(1); // 65C02
        image.push(0x02); // sp-zp
        image.extend_from_slice(&0x0200u16.to_le_bytes());
        image.extend_from_slice(&0x0210u16.to_le_bytes());
        image.extend_from_slice(&[0xEA, 0xEA]);

        let loaded = load_program(&mut mem, &image, None).unwrap();
        assert_eq!(loaded.load_addr, 0x0200);
        assert_eq!(loaded.reset_addr, 0x0210);
        assert_eq!(loaded.sp_addr, 0x02);
        assert_eq!(loaded.cpu_type, CpuType::Wdc65C02);
        assert_eq!(mem.read(0x0200), 0xEA);
    }

    #[test]
    fn test_forced_address_overrides_header() {
        let mut mem = FlatMemory::new();
        let mut image = Vec::new();
        image.extend_from_slice(b"sim65");
        image.extend_from_slice(&[2, 0, 0x02]);
        image.extend_from_slice(&0x0200u16.to_le_bytes());
        image.extend_from_slice(&0x0200u16.to_le_bytes());
        image.push(0x42);

        let loaded = load_program(&mut mem, &image, Some(0x4000)).unwrap();
        assert_eq!(loaded.load_addr, 0x4000);
        assert_eq!(mem.read(0x4000), 0x42);
    }

    #[test]
    fn test_truncated_header_rejected() {
        let mut mem = FlatMemory::new();
        assert!(matches!(
            load_program(&mut mem, b"sim65\x02", None),
            Err(LoadError::TruncatedHeader { len: 7 })
        ));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let mut mem = FlatMemory::new();
        let image = vec![0u8; 0x300];
        assert!(matches!(
            load_program(&mut mem, &image, Some(0xFE00)),
            Err(LoadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_hook_page_prefilled_with_rts() {
        let mut mem = FlatMemory::new();
        load_program(&mut mem, &[0xEA], None).unwrap();
        for addr in PARAVIRT_BASE..=PARAVIRT_TOP {
            assert_eq!(mem.read(addr), 0x60);
        }
    }
}
