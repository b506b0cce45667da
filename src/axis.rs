//! Choice of the logarithmic base of the x-axis.

use std::fmt;

/// Logarithmic scale of the x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    /// Decades.
    Log10,
    /// Powers of two.
    Log2,
}

impl AxisScale {
    /// Dictionary sizes are usually powers of two, but older datasets use
    /// round decimal sizes. Base 10 is chosen only when every value is a
    /// multiple of 10.
    pub fn select(domain: &[u64]) -> AxisScale {
        let scale = match domain.iter().find(|&&size| size % 10 != 0) {
            Some(size) => {
                debug!("{} is not a multiple of 10", size);
                info!("Switching to log_2");
                AxisScale::Log2
            }
            None => AxisScale::Log10,
        };
        info!("Plotting with log base {}", scale);
        scale
    }

    /// Base of the logarithm.
    pub fn base(&self) -> f64 {
        match *self {
            AxisScale::Log10 => 10.0,
            AxisScale::Log2 => 2.0,
        }
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_sizes() {
        assert_eq!(AxisScale::select(&[10, 100, 1000]), AxisScale::Log10);
    }

    #[test]
    fn test_power_of_two_sizes() {
        assert_eq!(AxisScale::select(&[1, 2, 4, 8, 16]), AxisScale::Log2);
    }

    #[test]
    fn test_one_odd_value_switches() {
        assert_eq!(AxisScale::select(&[1, 10, 15]), AxisScale::Log2);
        assert_eq!(AxisScale::select(&[10, 20, 15]), AxisScale::Log2);
    }

    #[test]
    fn test_base() {
        assert_eq!(AxisScale::Log2.base(), 2.0);
        assert_eq!(format!("{}", AxisScale::Log10), "10");
    }
}
