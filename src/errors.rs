//! Error types for aadplot.

use record::Column;

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        /// No input file was given.
        NoInput {
            description("no input tables")
        }
        /// An input's header differs from the expected column set.
        SchemaMismatch(source: String, expected: String, found: String) {
            description("input tables have differing column sets")
            display("schema mismatch in {}: expected [{}], found [{}]", source, expected, found)
        }
        /// A series misses some x-values of the table.
        CoverageMismatch(series: String, len: usize, domain: usize) {
            description("series do not cover the same x-domain")
            display("series '{}' has {} points but the x-domain has {} values", series, len, domain)
        }
        /// Two rows of a series share an x-value.
        DuplicateKey(series: String, x: u64) {
            description("series has two points with the same x-value")
            display("series '{}' has more than one point at x = {}", series, x)
        }
        /// A column was used in a role it cannot play.
        InvalidColumn(column: Column, reason: &'static str) {
            description("column cannot be used in this role")
            display("column {}: {}", column, reason)
        }
        /// The output is not a `.png` file.
        InvalidOutputPath(path: String) {
            description("output path must be a .png file")
            display("Expected .png file as output, got {}", path)
        }
        /// The drawing backend failed.
        Render(msg: String) {
            description("error in rendering the chart")
            display("failed to render chart: {}", msg)
        }
    }

    foreign_links {
        Io(::std::io::Error) #[doc = "Reading inputs or writing the image."];
        Csv(::csv::Error) #[doc = "Malformed CSV."];
        Toml(::toml::de::Error) #[doc = "Malformed style file."];
    }
}
