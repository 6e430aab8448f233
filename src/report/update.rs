//! Progress update formatting: padded index labels and two-decimal percentages.

/// Left-pad the decimal representation of `count` with `0` to the digit width
/// of `total`. A count wider than the total is returned unpadded, never
/// truncated.
pub fn index_label(count: u64, total: u64) -> String {
    let width = decimal_width(total);
    format!("{count:0width$}")
}

fn decimal_width(n: u64) -> usize {
    n.to_string().len()
}

/// `count / total * 100` with exactly two fractional digits.
///
/// Ties round half away from zero: `count=1, total=800` yields `"0.13"`.
pub fn percentage_text(count: u64, total: u64) -> String {
    let raw = count as f64 / total as f64 * 100.0;
    // f64::round rounds half away from zero.
    let rounded = (raw * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// A single progress notification, created fresh per call and not persisted.
///
/// A non-positive total is clamped up to 1 so an empty batch neither divides
/// by zero nor reads as "no work".
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    total: u64,
    count: u64,
    message: String,
    backline: u32,
}

impl ProgressUpdate {
    pub fn new(total: i64, count: u64, message: impl Into<String>, backline: u32) -> Self {
        Self {
            total: total.max(1) as u64,
            count,
            message: message.into(),
            backline,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn backline(&self) -> u32 {
        self.backline
    }

    pub fn index_label(&self) -> String {
        index_label(self.count, self.total)
    }

    pub fn percentage_text(&self) -> String {
        percentage_text(self.count, self.total)
    }

    /// The console line for this update: `"[{index}/{total}] {message}"`.
    pub fn formatted_message(&self) -> String {
        format!("[{}/{}] {}", self.index_label(), self.total, self.message)
    }
}
