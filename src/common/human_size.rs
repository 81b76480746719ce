// HumanSize trait and implementations
#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Sizes are scaled by 1024 until they fit the unit, stopping at TB.
const UNITS: [&str; 5] = [
    "B",
    "KB",
    "MB",
    "GB",
    "TB",
];

/// `HumanSize` trait.
pub trait HumanSize {
    /// Return `self` as a human friendly size.
    fn humansize(&self) -> String;
}

/// `HumanSize` trait implementation for an optional byte count.
impl HumanSize for Option<f64> {
    /// A missing size is shown as zero bytes.
    fn humansize(&self) -> String {
        let mut size = match self {
            Some(size) => *size,
            None       => return "0.0 B".to_string(),
        };

        let mut unit = 0;

        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }

        format!("{:.2} {}", size, UNITS[unit])
    }
}
