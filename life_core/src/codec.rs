// codec.rs - Run-length save format for grid cells
//
// A cell sequence is written as alternating run lengths, dead first, each
// run as one base64 symbol when below 64 or as '=' plus two symbols (high
// and low six bits) otherwise. Runs are capped at 4095; a longer run is
// split by a zero-length run of the other value so parity is preserved.

/// Symbols for run lengths 0..64, in standard base64 order.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Longest run a single token can carry.
pub const MAX_RUN: usize = 4095;

/// Marks a two-symbol run length.
pub const ESCAPE: char = '=';

/// Reasons a save string fails strict validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A character outside the alphabet where a run length was expected.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// The input ended inside a two-symbol run length.
    #[error("escape at position {position} is missing its run length")]
    TruncatedEscape { position: usize },
}

fn symbol(value: usize) -> char {
    char::from(ALPHABET[value & 63])
}

fn value_of(symbol: char) -> Option<usize> {
    let value = match symbol {
        'A'..='Z' => u32::from(symbol) - u32::from('A'),
        'a'..='z' => u32::from(symbol) - u32::from('a') + 26,
        '0'..='9' => u32::from(symbol) - u32::from('0') + 52,
        '+' => 62,
        '/' => 63,
        _ => return None,
    };
    Some(value as usize)
}

fn push_run(out: &mut String, run: usize) {
    if run < 64 {
        out.push(symbol(run));
    } else {
        out.push(ESCAPE);
        out.push(symbol(run >> 6));
        out.push(symbol(run & 63));
    }
}

/// Encode a cell sequence.
///
/// Always produces at least one symbol: an empty sequence is a single
/// zero-length dead run (`"A"`).
pub fn encode(cells: &[bool]) -> String {
    let mut out = String::new();
    let mut current = false;
    let mut run = 0;

    for &cell in cells {
        if cell != current {
            push_run(&mut out, run);
            run = 0;
            current = cell;
        } else if run == MAX_RUN {
            push_run(&mut out, MAX_RUN);
            push_run(&mut out, 0);
            run = 0;
        }
        run += 1;
    }
    push_run(&mut out, run);

    out
}

/// One run length read from a save string.
struct Token {
    length: usize,
    fault: Option<CodecError>,
}

/// Reads run lengths left to right. Bad symbols count as zero and are
/// reported in `fault`, so callers choose between leniency and rejection.
struct Runs<'a> {
    chars: std::iter::Enumerate<std::str::Chars<'a>>,
}

impl<'a> Runs<'a> {
    fn new(encoded: &'a str) -> Self {
        Self { chars: encoded.chars().enumerate() }
    }

    fn digit(&mut self, escape_at: usize, fault: &mut Option<CodecError>) -> usize {
        match self.chars.next() {
            Some((position, c)) => value_of(c).unwrap_or_else(|| {
                fault.get_or_insert(CodecError::InvalidSymbol { symbol: c, position });
                0
            }),
            None => {
                fault.get_or_insert(CodecError::TruncatedEscape { position: escape_at });
                0
            }
        }
    }
}

impl Iterator for Runs<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (position, c) = self.chars.next()?;
        let mut fault = None;

        let length = if c == ESCAPE {
            let high = self.digit(position, &mut fault);
            let low = self.digit(position, &mut fault);
            (high << 6) + low
        } else {
            value_of(c).unwrap_or_else(|| {
                fault = Some(CodecError::InvalidSymbol { symbol: c, position });
                0
            })
        };

        Some(Token { length, fault })
    }
}

/// Write alternating runs into `target`, dead first. Returns how many cells
/// were written; anything past the end of `target` is dropped.
fn fill(lengths: impl IntoIterator<Item = usize>, target: &mut [bool]) -> usize {
    let mut pos = 0;
    let mut current = false;

    for length in lengths {
        let end = (pos + length).min(target.len());
        target[pos..end].fill(current);
        pos = end;
        current = !current;
    }

    pos
}

/// Decode a save string into `target`.
///
/// Never fails: unknown symbols and a truncated escape read as zero-length
/// runs, so a damaged string degrades instead of being rejected. Cells past
/// the decoded data keep their previous values. Returns the number of cells
/// written.
pub fn decode(encoded: &str, target: &mut [bool]) -> usize {
    fill(Runs::new(encoded).map(|token| token.length), target)
}

/// Like [`decode`], but rejects malformed input before touching `target`.
pub fn decode_strict(encoded: &str, target: &mut [bool]) -> Result<usize, CodecError> {
    let lengths = Runs::new(encoded)
        .map(|token| match token.fault {
            Some(fault) => Err(fault),
            None => Ok(token.length),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(fill(lengths, target))
}
