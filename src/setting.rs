//! Chart style setting in TOML.
//!
//! ```toml
//! medium_font = 18
//! dpi = 80
//! ```

use errors::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use toml;

/// Font sizes and drawing parameters handed to the renderer. Missing keys
/// keep their default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChartStyle {
    /// Axis labels, tick labels and legends.
    pub medium_font: u32,

    /// Titles.
    pub bigger_font: u32,

    /// Pixels per inch of figure size.
    pub dpi: u32,

    /// Stroke width of series lines.
    pub line_width: u32,

    /// Radius of point markers.
    pub marker_size: u32,

    /// Space around the plotting area, in pixels.
    pub margin: u32,

    /// Space reserved for tick labels and axis descriptions.
    pub label_area: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            medium_font: 20,
            bigger_font: 25,
            dpi: 100,
            line_width: 2,
            marker_size: 5,
            margin: 20,
            label_area: 80,
        }
    }
}

impl ChartStyle {
    /// Reads overrides from a TOML file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<ChartStyle> {
        let path = path.as_ref();
        let mut file = File::open(path).chain_err(|| format!("no style file {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        ChartStyle::parse(&contents)
    }

    /// Parses overrides from a TOML document.
    pub fn parse(contents: &str) -> Result<ChartStyle> {
        Ok(toml::from_str(contents)?)
    }

    /// Pixel size of a figure given in inches.
    pub fn pixels(&self, figsize: (f64, f64)) -> (u32, u32) {
        let dpi = self.dpi as f64;
        ((figsize.0 * dpi).round() as u32, (figsize.1 * dpi).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let style = ChartStyle::parse("medium_font = 17\ndpi = 50\n").unwrap();
        assert_eq!(style.medium_font, 17);
        assert_eq!(style.dpi, 50);
        assert_eq!(style.bigger_font, ChartStyle::default().bigger_font);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(ChartStyle::parse("").unwrap(), ChartStyle::default());
    }

    #[test]
    fn test_bad_value() {
        assert!(ChartStyle::parse("dpi = \"high\"").is_err());
    }

    #[test]
    fn test_pixels() {
        assert_eq!(ChartStyle::default().pixels((12.0, 7.5)), (1200, 750));
    }
}
