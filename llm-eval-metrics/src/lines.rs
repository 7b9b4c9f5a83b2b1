//! Turning raw text into aligned, equal-width line sequences.

/// Characters that end a line: `\n`, `\r`, vertical tab, form feed, the
/// information separators `\x1c`..`\x1e`, NEL, and the Unicode line and
/// paragraph separators.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Non-blank, trimmed lines of a text, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Split on line boundaries, trim each line and drop the blank ones.
    ///
    /// `\r\n` produces an empty segment between the two characters, which is
    /// discarded with the other blank lines.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split(is_line_boundary)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn into_inner(self) -> Vec<String> {
        self.lines
    }
}

/// Two line sequences cut to the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedPair {
    predicted: Vec<String>,
    reference: Vec<String>,
}

impl AlignedPair {
    /// Positional prefix alignment: both sides keep `min(m, n)` lines and any
    /// tail of the longer side is dropped.
    pub fn align(predicted: LineSequence, reference: LineSequence) -> Self {
        let len = predicted.len().min(reference.len());
        let mut predicted = predicted.into_inner();
        let mut reference = reference.into_inner();
        predicted.truncate(len);
        reference.truncate(len);
        Self {
            predicted,
            reference,
        }
    }

    pub fn len(&self) -> usize {
        self.predicted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicted.is_empty()
    }

    pub fn predicted(&self) -> &[String] {
        &self.predicted
    }

    pub fn reference(&self) -> &[String] {
        &self.reference
    }

    /// Right-pad every line on both sides to the widest line, in chars.
    ///
    /// Known quirk: lines are never compared at their natural length, so a
    /// short line paired with a long one is measured against trailing spaces.
    pub fn pad(self) -> PaddedPair {
        let width = self
            .predicted
            .iter()
            .chain(&self.reference)
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let pad = |lines: Vec<String>| -> Vec<String> {
            lines
                .into_iter()
                .map(|line| format!("{:<width$}", line, width = width))
                .collect()
        };

        PaddedPair {
            predicted: pad(self.predicted),
            reference: pad(self.reference),
            width,
        }
    }
}

/// An aligned pair whose lines all share the same width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaddedPair {
    predicted: Vec<String>,
    reference: Vec<String>,
    width: usize,
}

impl PaddedPair {
    pub fn len(&self) -> usize {
        self.predicted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicted.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn predicted(&self) -> &[String] {
        &self.predicted
    }

    pub fn reference(&self) -> &[String] {
        &self.reference
    }

    /// References wrapped one-per-candidate, the shape BLEU scorers take.
    pub fn single_references(&self) -> Vec<Vec<String>> {
        self.reference.iter().map(|r| vec![r.clone()]).collect()
    }
}

/// Parse, align and pad two raw texts.
pub fn normalize(predicted: &str, reference: &str) -> PaddedPair {
    AlignedPair::align(LineSequence::parse(predicted), LineSequence::parse(reference)).pad()
}
