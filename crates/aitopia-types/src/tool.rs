//! Tool catalog

use serde::{Deserialize, Serialize};

/// AI tools offered in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Art generation
    #[serde(rename = "Artisan AI")]
    ArtisanAi,
    /// Voice modulation
    VoiceCraft,
    /// Translation and subtitles
    LingoSync,
    /// Conversational assistant
    NeuroChat,
    /// Code generation
    CodeForge,
    /// Image analysis and background removal
    VisionX,
    /// Data extraction
    DataMiner,
    /// Compute-heavy model access
    QuantumCore,
    /// Text generation
    TextGenix,
    /// Image synthesis
    ImageSynth,
}

impl Tool {
    /// Every tool in catalog order
    pub const ALL: [Tool; 10] = [
        Self::ArtisanAi,
        Self::VoiceCraft,
        Self::LingoSync,
        Self::NeuroChat,
        Self::CodeForge,
        Self::VisionX,
        Self::DataMiner,
        Self::QuantumCore,
        Self::TextGenix,
        Self::ImageSynth,
    ];

    /// Catalog name (case-sensitive)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArtisanAi => "Artisan AI",
            Self::VoiceCraft => "VoiceCraft",
            Self::LingoSync => "LingoSync",
            Self::NeuroChat => "NeuroChat",
            Self::CodeForge => "CodeForge",
            Self::VisionX => "VisionX",
            Self::DataMiner => "DataMiner",
            Self::QuantumCore => "QuantumCore",
            Self::TextGenix => "TextGenix",
            Self::ImageSynth => "ImageSynth",
        }
    }

    /// Look up a tool by its exact catalog name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
