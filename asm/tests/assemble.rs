use c02asm::{assemble, Category, Config, Error, Image, Source};

fn asm(code: &str) -> Result<Image, Vec<Error>> {
    let source = Source::new("test.asm", code);
    let result = assemble(&source, &Config::default());
    if let Err(errors) = &result {
        for e in errors {
            e.print_diag(Some(&source));
        }
    }
    result
}

fn assert(code: &str, expects: Vec<u8>) {
    let image = asm(code).unwrap();
    println!("{}", code);
    for b in &image.bytes {
        print!("{:02X} ", b);
    }
    println!();
    assert_eq!(image.bytes, expects);
}

macro_rules! case {
    ($name:ident, $code:expr, $expects:expr) => {
        #[test]
        fn $name() {
            assert($code, $expects);
        }
    };
}

case!(nop, "* = $0600\nNOP", vec![0xEA]);
case!(
    end_to_end,
    "* = $0600\nloop: LDA #$01\n      STA $02\n      JMP loop",
    vec![0xA9, 0x01, 0x85, 0x02, 0x4C, 0x00, 0x06]
);
case!(
    forward_reference,
    "JMP target\nNOP\ntarget: NOP",
    vec![0x4C, 0x04, 0x06, 0xEA, 0xEA]
);
case!(
    branches,
    "loop: DEX\nBNE loop\nBRA done\nNOP\ndone: RTS",
    vec![0xCA, 0xD0, 0xFD, 0x80, 0x01, 0xEA, 0x60]
);
case!(
    bit_branch,
    "top: BBS0 $10, top\nRMB7 $10",
    vec![0x8F, 0x10, 0xFD, 0x77, 0x10]
);
case!(
    label_halves,
    "* = $0600\nLDA #<data\nLDX #>data\n* = $0700\ndata: .byte 1",
    {
        let mut v = vec![0xA9, 0x00, 0xA2, 0x07];
        v.resize(0x100, 0);
        v.push(1);
        v
    }
);
case!(
    data,
    ".byte \"Hi\", 0\n.word $1234, 5",
    vec![0x48, 0x69, 0x00, 0x34, 0x12, 0x05, 0x00]
);
case!(
    overwrite,
    ".byte 1, 2, 3\n* = $0601\n.byte 9",
    vec![1, 9, 3]
);
case!(
    below_origin_is_dropped,
    "* = $05FF\n.byte $AA, $BB",
    vec![0xBB]
);
case!(
    jmp_indirect,
    "JMP ($1234)\nJMP (table,X)\ntable: .word 0",
    vec![0x6C, 0x34, 0x12, 0x7C, 0x06, 0x06, 0x00, 0x00]
);
case!(
    comments_and_blank_lines,
    "; header\n\n   \nINX ; one\n  \tINY",
    vec![0xE8, 0xC8]
);

#[test]
fn macro_idempotence() {
    let with = asm(".define ptr $20\n.define count 8\nLDY #count\nloop: LDA (ptr),Y\nDEY\nBNE loop").unwrap();
    let without = asm("LDY #8\nloop: LDA ($20),Y\nDEY\nBNE loop").unwrap();
    assert_eq!(with.bytes, without.bytes);
}

#[test]
fn literal_equivalence() {
    let images: Vec<Vec<u8>> = ["$10", "%00010000", "020", "16"]
        .iter()
        .map(|lit| asm(&format!("LDA {lit}\n.byte {lit}")).unwrap().bytes)
        .collect();
    for image in &images {
        assert_eq!(image, &vec![0xA5, 0x10, 0x10]);
    }
}

#[test]
fn origin_is_configurable() {
    let source = Source::new("test.asm", "start: JMP start");
    let image = assemble(&source, &Config::with_origin(0x8000)).unwrap();
    assert_eq!(image.origin, 0x8000);
    assert_eq!(image.bytes, vec![0x4C, 0x00, 0x80]);
}

#[test]
fn branch_out_of_range() {
    let mut code = String::from("BEQ far\n");
    for _ in 0..130 {
        code.push_str("NOP\n");
    }
    code.push_str("far: RTS\n");
    let errors = asm(&code).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], Error::BranchOutOfRange(pos, name, 130) if pos.row == 1 && name == "far"));
    assert_eq!(errors[0].category(), Category::Semantic);

    let mut code = String::from("back: RTS\n");
    for _ in 0..125 {
        code.push_str("NOP\n");
    }
    code.push_str("BRA back\n");
    let image = asm(&code).unwrap();
    // -128: the farthest backward branch
    assert_eq!(image.bytes[127], 0x80);
}

#[test]
fn stages_report_categories() {
    let errors = asm("LDA $FFX").unwrap_err();
    assert_eq!(errors[0].category(), Category::Lexical);

    let errors = asm("LDA nowhere").unwrap_err();
    assert_eq!(errors[0].category(), Category::Semantic);
}

#[test]
fn address_overflow() {
    for code in ["* = $FFFE\nJMP $1234", "* = $FFFF\n.word $1234"] {
        let errors = asm(code).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Error::AddressOverflow(pos) if pos.row == 2));
        assert_eq!(errors[0].category(), Category::Semantic);
    }

    let image = asm("* = $FFFD\nJMP $1234").unwrap();
    assert_eq!(image.get(0xFFFD), Some(0x4C));
    assert_eq!(image.get(0xFFFF), Some(0x12));
}
