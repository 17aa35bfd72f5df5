// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs small programs through the public API
use chirp_core::*;

fn run(program: &[u8], steps: usize) -> Result<CPU> {
    let mut cpu = CPU::new();
    cpu.load_program_bytes(program)?;
    for _ in 0..steps {
        cpu.step()?;
    }
    Ok(cpu)
}

#[test]
fn load_and_add() -> Result<()> {
    let cpu = run(&[0x60, 0x0a, 0x70, 0x05], 2)?;
    assert_eq!(15, cpu.v()[0]);
    assert_eq!(0x204, cpu.pc());
    assert_eq!(2, cpu.cycle());
    Ok(())
}

#[test]
fn draw_glyph_zero() -> Result<()> {
    let cpu = run(&[0xa0, 0x50, 0xd0, 0x05], 2)?;
    let screen = cpu.screen();
    for (row, byte) in FONT[..5].iter().enumerate() {
        for col in 0..8 {
            assert_eq!(Some(byte & (0x80 >> col) != 0), screen.get(col, row));
        }
    }
    // Nothing else got drawn
    let lit = screen.pixels().iter().filter(|px| **px).count();
    let expected: u32 = FONT[..5].iter().map(|b| b.count_ones()).sum();
    assert_eq!(expected as usize, lit);
    assert_eq!(0, cpu.v()[0xf]);
    Ok(())
}

#[test]
fn draw_twice_erases() -> Result<()> {
    let cpu = run(&[0xa0, 0x50, 0xd0, 0x05, 0xd0, 0x05], 3)?;
    assert!(cpu.screen().pixels().iter().all(|px| !px));
    assert_eq!(1, cpu.v()[0xf]);
    Ok(())
}

#[test]
fn wait_for_key() -> Result<()> {
    let mut cpu = run(&[0xf3, 0x0a], 0)?;
    cpu.step()?;
    assert_eq!(0x200, cpu.pc());
    cpu.set_key_state(0x7, true)?;
    cpu.step()?;
    assert_eq!(0x202, cpu.pc());
    assert_eq!(0x7, cpu.v()[3]);
    Ok(())
}

#[test]
fn subroutine() -> Result<()> {
    let mut cpu = run(
        &[
            0x22, 0x06, // call 206
            0x61, 0x02, // mov #02, v1
            0x12, 0x04, // jmp 204
            0x60, 0x01, // mov #01, v0
            0x00, 0xee, // ret
        ],
        3,
    )?;
    assert_eq!(0x202, cpu.pc());
    assert!(cpu.stack().is_empty());
    cpu.step()?;
    assert_eq!([1, 2], cpu.v()[..2]);
    Ok(())
}

#[test]
fn unimplemented_is_skipped() -> Result<()> {
    let mut cpu = run(&[0x80, 0x0f, 0x60, 0x33], 0)?;
    match cpu.step() {
        Err(e) if !e.is_fatal() => (),
        other => panic!("expected a warning, got {other:?}"),
    }
    cpu.step()?;
    assert_eq!(0x33, cpu.v()[0]);
    Ok(())
}

#[test]
fn underflow_is_fatal() {
    let mut cpu = CPU::new();
    cpu.load_program_bytes(&[0x60, 0x01, 0x00, 0xee]).unwrap();
    cpu.step().unwrap();
    let before = cpu.clone();
    let error = cpu.step().unwrap_err();
    assert!(error.is_fatal());
    assert_eq!(before, cpu);
}

#[test]
fn timers() -> Result<()> {
    let mut cpu = run(&[0x60, 0x03, 0xf0, 0x15, 0xf0, 0x18], 3)?;
    assert_eq!((3, 3), (cpu.delay(), cpu.sound()));
    assert!(cpu.is_sounding());
    for _ in 0..3 {
        cpu.tick_timers();
    }
    assert_eq!((0, 0), (cpu.delay(), cpu.sound()));
    assert!(!cpu.is_sounding());
    Ok(())
}

#[test]
fn superchip_mode() -> Result<()> {
    let mut cpu = CPU::with_mode("schip".parse()?);
    cpu.load_program_bytes(&[
        0x61, 0x81, // mov #81, v1
        0x62, 0x00, // mov #00, v2
        0x81, 0x26, // shr v1 (quirk: in place)
    ])?;
    cpu.step()?.step()?.step()?;
    assert_eq!((0x40, 1), (cpu.v()[1], cpu.v()[0xf]));
    Ok(())
}

#[test]
fn snapshot_and_rewind() -> Result<()> {
    let mut cpu = run(&[0x70, 0x01, 0x12, 0x00], 0)?;
    let mut snapshot = CPU::default();
    cpu.step()?;
    snapshot.copy_state_from(&cpu);
    for _ in 0..10 {
        cpu.step()?;
    }
    assert_eq!(6, cpu.v()[0]);
    cpu.copy_state_from(&snapshot);
    assert_eq!(1, cpu.v()[0]);
    assert_eq!(snapshot, cpu);
    Ok(())
}

#[test]
fn program_too_large() {
    let mut cpu = CPU::new();
    let error = cpu.load_program_bytes(&[0xff; 0xe01]).unwrap_err();
    assert!(matches!(error, Error::InvalidAddressRange { .. }));
    // Program space is untouched
    assert!(cpu.memory()[0x200..].iter().all(|&b| b == 0));
}

#[test]
fn load_missing_file() {
    let mut cpu = CPU::new();
    assert!(matches!(
        cpu.load_program("this/file/does/not/exist.ch8"),
        Err(Error::IoError(_))
    ));
}

mod mode {
    use super::*;
    #[test]
    fn parse() {
        for name in ["chip8", "Chip-8", "CHIP8"] {
            assert_eq!(Mode::Chip8, name.parse().unwrap());
        }
        for name in ["schip", "SuperChip", "chip48", "chip-48"] {
            assert_eq!(Mode::SChip, name.parse().unwrap());
        }
    }
    #[test]
    fn invalid() {
        let error = "xo-chip".parse::<Mode>().unwrap_err();
        assert_eq!("no suitable conversion of \"xo-chip\" into Mode", error.to_string());
    }
}
