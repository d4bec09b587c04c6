use clap::ValueEnum;

/// When to use colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    /// Never use colors
    Never,
    /// Always use colors
    Always,
    /// Use colors when the output is a terminal that supports them
    Auto,
}

impl Color {
    #[allow(missing_docs)]
    pub fn is_enabled(self) -> bool {
        match self {
            Color::Never => false,
            Color::Always => true,
            Color::Auto => supports_color::on(supports_color::Stream::Stderr).is_some(),
        }
    }
}

/// Installs the color-eyre panic and error report handlers, with a colorless theme when colors
/// are disabled.
pub fn install_color_eyre(color: Color) -> color_eyre::Result<()> {
    if color.is_enabled() {
        color_eyre::install()
    } else {
        color_eyre::config::HookBuilder::new()
            .theme(color_eyre::config::Theme::new())
            .install()
    }
}
