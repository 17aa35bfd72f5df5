// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

use super::*;

#[test]
fn banner_chip8() {
    let banner = banner(&Flags::default());
    assert!(banner.starts_with("Chip8\n"));
    assert!(banner.contains("Charset 050..0a0\n"));
    assert!(banner.contains("Program 200..1000\n"));
}

#[test]
fn banner_shows_quirks() {
    let mut flags = Flags::default();
    flags.set_mode(Mode::SChip);
    let banner = banner(&flags);
    assert!(banner.starts_with("SChip Quirks {"));
    assert!(banner.contains("shift: true"));
}

#[test]
fn arguments() {
    let options = Arguments::parse_args_default(&["--press", "a", "--press", "F", "-v", "rom.ch8"])
        .expect("These arguments should parse");
    assert_eq!(options.keys, [0xa, 0xf]);
    assert!(options.shift);
    assert_eq!(options.speed, 10);
    assert_eq!(options.file, PathBuf::from("rom.ch8"));
}
