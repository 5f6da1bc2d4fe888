use crate::linker::Image;
use crate::source::Source;
use arch::Inst;
use color_print::cformat;

const SHOWN_BYTES: usize = 4;

/// Listing of every emitting source row: address, bytes, source text and disassembly.
pub fn print_dump(source: &Source, image: &Image) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(21),
        source.name(),
        "-".repeat(45usize.saturating_sub(source.name().len()))
    );
    for span in &image.spans {
        let bytes: Vec<Option<u8>> = (0..span.len)
            .map(|i| image.get(span.addr.wrapping_add(i as u16)))
            .collect();

        let mut hex = bytes
            .iter()
            .take(SHOWN_BYTES)
            .map(|b| match b {
                Some(b) => format!("{:02X}", b),
                None => "..".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        if bytes.len() > SHOWN_BYTES {
            hex.push('+');
        }

        let disasm = match (span.code, bytes.first()) {
            (true, Some(Some(code))) => {
                let operand: Vec<u8> = bytes[1..].iter().map(|b| b.unwrap_or(0)).collect();
                Inst::decode(*code)
                    .map(|inst| inst.cformat(span.addr, &operand))
                    .unwrap_or_default()
            }
            _ => String::new(),
        };

        let raw = source.raw(span.row).unwrap_or("").trim();
        println!(
            "{}",
            cformat!(
                "[<c>{:04X}</>] {:<12} | {:>4}: {:<32} {}",
                span.addr,
                hex,
                span.row,
                raw,
                disasm
            )
        );
    }
    println!("{}+{}", "-".repeat(21), "-".repeat(53));
}
