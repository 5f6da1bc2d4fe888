use crate::error::Error;
use std::path::Path;

/// A program text split into numbered lines.
/// Rows are 1-based physical line numbers; blank lines are dropped but keep their numbering.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    raw: Vec<String>,
}

impl Source {
    pub fn new(name: &str, text: &str) -> Self {
        Source {
            name: name.to_string(),
            raw: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| Error::FileOpen(name.clone(), e))?;
        Ok(Source::new(&name, &text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blank lines as `(row, text)`.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.raw
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(idx, l)| (idx + 1, l.as_str()))
    }

    pub fn raw(&self, row: usize) -> Option<&str> {
        row.checked_sub(1)
            .and_then(|idx| self.raw.get(idx))
            .map(|s| s.as_str())
    }
}

#[test]
fn test() {
    let src = Source::new("t.asm", "  NOP\n\n   \nRTS ; end\n");
    let lines: Vec<_> = src.lines().collect();
    assert_eq!(lines, vec![(1, "  NOP"), (4, "RTS ; end")]);
    assert_eq!(src.raw(4), Some("RTS ; end"));
    assert_eq!(src.raw(0), None);
    assert_eq!(src.raw(9), None);
}
