//! Source buffer statistics

use serde::{Deserialize, Serialize};

/// Line, character and byte counts of a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeStats {
    /// `\n`-separated segments (an empty buffer counts as one line)
    pub lines: usize,
    /// UTF-16 code units, as an editor counts characters
    pub chars: usize,
    /// UTF-8 bytes
    pub bytes: u64,
}

/// Count lines, characters and bytes of `text`
pub fn analyze(text: &str) -> CodeStats {
    CodeStats {
        lines: text.split('\n').count(),
        chars: text.encode_utf16().count(),
        bytes: text.len() as u64,
    }
}
