//! Size accounting for pipeline runs

use serde::{Deserialize, Serialize};

/// Byte sizes of a source buffer and the artifact produced from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMetrics {
    /// Source size before minification (bytes)
    pub input_bytes: u64,
    /// Artifact size (bytes)
    pub output_bytes: u64,
}

impl SizeMetrics {
    /// Measure two buffers
    pub fn measure(input: &str, output: &str) -> Self {
        Self {
            input_bytes: input.len() as u64,
            output_bytes: output.len() as u64,
        }
    }

    /// Signed size change in bytes (positive = smaller output)
    pub fn reduction_bytes(&self) -> i64 {
        self.input_bytes as i64 - self.output_bytes as i64
    }

    /// Size change as a rounded percentage, clamped at zero
    ///
    /// Obfuscated output is normally larger than its source, so this is
    /// usually 0. The result is always within `0..=100`.
    pub fn ratio_percent(&self) -> u8 {
        if self.input_bytes == 0 {
            return 0;
        }
        let percent = (self.reduction_bytes() as f64 / self.input_bytes as f64) * 100.0;
        percent.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_rounds_reduction() {
        let metrics = SizeMetrics {
            input_bytes: 1000,
            output_bytes: 333,
        };
        assert_eq!(metrics.reduction_bytes(), 667);
        assert_eq!(metrics.ratio_percent(), 67);
    }

    #[test]
    fn test_ratio_clamps_growth_to_zero() {
        let metrics = SizeMetrics {
            input_bytes: 10,
            output_bytes: 400,
        };
        assert_eq!(metrics.reduction_bytes(), -390);
        assert_eq!(metrics.ratio_percent(), 0);
    }

    #[test]
    fn test_ratio_with_zero_input_is_zero() {
        let metrics = SizeMetrics {
            input_bytes: 0,
            output_bytes: 100,
        };
        assert_eq!(metrics.ratio_percent(), 0);
    }

    #[test]
    fn test_ratio_half_rounds_up() {
        let metrics = SizeMetrics {
            input_bytes: 200,
            output_bytes: 199,
        };
        // 0.5% rounds to 1
        assert_eq!(metrics.ratio_percent(), 1);
    }

    #[test]
    fn test_measure_counts_utf8_bytes() {
        let metrics = SizeMetrics::measure("é", "ab");
        assert_eq!(metrics.input_bytes, 2);
        assert_eq!(metrics.output_bytes, 2);
        assert_eq!(metrics.ratio_percent(), 0);
    }
}
