//! Text-to-speech options sent alongside a clone request.

use serde::{Deserialize, Serialize};
use strum::VariantArray;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
        }
    }

    pub fn label(self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn download_file_name(self) -> String {
        format!("tts-output.{}", self.as_str())
    }
}

impl TryFrom<&str> for OutputFormat {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| format!("Invalid output format: {value}. Valid options: mp3, wav, ogg"))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    #[serde(rename = "")]
    Unset,
    MaleHappy,
    MaleSad,
    MaleAngry,
    MaleFearful,
    FemaleHappy,
    FemaleSad,
    FemaleAngry,
    FemaleFearful,
}

impl Emotion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::MaleHappy => "male_happy",
            Self::MaleSad => "male_sad",
            Self::MaleAngry => "male_angry",
            Self::MaleFearful => "male_fearful",
            Self::FemaleHappy => "female_happy",
            Self::FemaleSad => "female_sad",
            Self::FemaleAngry => "female_angry",
            Self::FemaleFearful => "female_fearful",
        }
    }

    /// "male_happy" becomes "Male Happy".
    pub fn label(self) -> String {
        if self == Self::Unset {
            return "None".to_string();
        }
        self.as_str()
            .replacen('_', " ", 1)
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<&str> for Emotion {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|e| e.as_str() == lower)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::VARIANTS[1..].iter().map(|e| e.as_str()).collect();
                format!("Invalid emotion: {value}. Valid options: {}", valid.join(", "))
            })
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    #[serde(rename = "")]
    AutoDetect,
    English,
    Hindi,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Japanese,
    Chinese,
    Korean,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoDetect => "",
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Italian => "italian",
            Self::Portuguese => "portuguese",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
            Self::Korean => "korean",
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::AutoDetect => "Auto Detect".to_string(),
            other => capitalize(other.as_str()),
        }
    }
}

impl TryFrom<&str> for Language {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|l| l.as_str() == lower)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::VARIANTS[1..].iter().map(|l| l.as_str()).collect();
                format!("Invalid language: {value}. Valid options: {}", valid.join(", "))
            })
    }
}

/// Step to the next (or previous) variant, wrapping around. Drives the
/// option selectors.
pub fn cycle_variant<T>(current: T, forward: bool) -> T
where
    T: VariantArray + PartialEq + Copy,
{
    let variants = T::VARIANTS;
    let len = variants.len();
    let index = variants.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    variants[next]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TtsOptions {
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub emotion: Emotion,
    #[serde(default)]
    pub language: Language,
}

/// A single-field edit of [`TtsOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionChange {
    OutputFormat(OutputFormat),
    Emotion(Emotion),
    Language(Language),
}

impl TtsOptions {
    /// Merge one changed field, leaving the others untouched.
    pub fn with_change(self, change: OptionChange) -> Self {
        match change {
            OptionChange::OutputFormat(output_format) => Self {
                output_format,
                ..self
            },
            OptionChange::Emotion(emotion) => Self { emotion, ..self },
            OptionChange::Language(language) => Self { language, ..self },
        }
    }

    /// Form fields for the outbound request. Unset values are omitted.
    pub fn form_fields(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("output_format", self.output_format.as_str()),
            ("emotion", self.emotion.as_str()),
            ("language", self.language.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}
