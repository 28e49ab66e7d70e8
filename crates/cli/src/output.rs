use clap::ValueEnum;

/// Supported output formats for `sinktrace graph`.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Json,
    Dot,
}

impl From<GraphFormat> for reporters::Format {
    fn from(fmt: GraphFormat) -> Self {
        match fmt {
            GraphFormat::Text => reporters::Format::Text,
            GraphFormat::Json => reporters::Format::Json,
            GraphFormat::Dot => reporters::Format::Dot,
        }
    }
}
