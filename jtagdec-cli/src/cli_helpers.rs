use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use color_eyre::eyre::{OptionExt, ensure};
use jtagdec_io::Span;

/// Sample window, `START:END` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    pub fn span(self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl FromStr for Window {
    type Err = color_eyre::eyre::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (start, end) = s.split_once(':').ok_or_eyre("no ':'")?;
        let start = start.parse()?;
        let end = end.parse()?;
        ensure!(start <= end, "window ends before it starts");
        Ok(Self { start, end })
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
