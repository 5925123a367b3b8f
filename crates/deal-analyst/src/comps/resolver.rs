use super::domain::CompsSource;

/// Caller preference for which source should answer first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderPreference {
    #[default]
    Auto,
    Attom,
    Estated,
    Demo,
}

impl ProviderPreference {
    /// Unknown tokens fall back to `Auto`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "attom" => Self::Attom,
            "estated" => Self::Estated,
            "demo" => Self::Demo,
            _ => Self::Auto,
        }
    }

    pub fn source_order(self) -> &'static [CompsSource] {
        match self {
            Self::Attom | Self::Auto => {
                &[CompsSource::Attom, CompsSource::Estated, CompsSource::Demo]
            }
            Self::Estated => &[CompsSource::Estated, CompsSource::Attom, CompsSource::Demo],
            Self::Demo => &[CompsSource::Demo],
        }
    }
}

pub fn resolve(preferred: &str) -> Vec<CompsSource> {
    ProviderPreference::parse(preferred).source_order().to_vec()
}
