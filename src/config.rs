use crate::anim::smooth::{DEFAULT_ALPHA, DEFAULT_EPSILON};
use crate::anim::Easing;
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub variant: Variant,

    #[serde(default = "default_viewport")]
    pub viewport: Size,

    #[serde(default = "default_fps_cap")]
    pub fps_cap: u32,

    /// Collapse every sequence into its end state.
    #[serde(default)]
    pub reduced_motion: bool,

    #[serde(default)]
    pub curtain: CurtainConfig,

    #[serde(default)]
    pub words: WordsConfig,

    #[serde(default)]
    pub sequence: SequenceConfig,

    #[serde(default)]
    pub title: TitleConfig,

    #[serde(default)]
    pub swirl: SwirlParams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Scroll lifts the curtain and reveals the words behind it.
    Curtain,
    /// Title fades in and docks to the corner on its own.
    TitleCard,
    /// Click spins the swirl up, fades, reveals and docks the title.
    #[default]
    Enter,
    /// Curtain and enter sequence on the same page.
    Gala,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainConfig {
    /// Section height in viewport heights.
    pub section_height_vh: f32,
    pub easing: Easing,
    pub smoothing: SmoothingConfig,
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self {
            section_height_vh: 2.0,
            easing: Easing::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub alpha: f32,
    pub epsilon: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    pub text: String,
    /// One per word; evenly spaced when absent.
    pub thresholds: Option<Vec<f32>>,
    pub ramp: f32,
    pub base_scale: f32,
    pub spread: f32,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            text: "the quick brown fox".to_string(),
            thresholds: None,
            ramp: 0.12,
            base_scale: 0.96,
            spread: 0.04,
        }
    }
}

impl WordsConfig {
    pub fn words(&self) -> Vec<String> {
        self.text.split_whitespace().map(str::to_string).collect()
    }

    pub fn resolved_thresholds(&self) -> Vec<f32> {
        match &self.thresholds {
            Some(thresholds) => thresholds.clone(),
            None => {
                let n = self.words().len();
                (0..n).map(|i| i as f32 / n as f32).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub ramp_ms: u64,
    pub hold_ms: u64,
    pub solid_delay_ms: u64,
    pub dock_delay_ms: u64,
    /// Trigger on its own if nobody clicks within this long.
    pub auto_trigger_ms: Option<u64>,
    pub target_speed: f32,
    pub route: Option<String>,
    pub navigate_delay_ms: u64,
    pub reduced_motion_nav_ms: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            ramp_ms: 1200,
            hold_ms: 150,
            solid_delay_ms: 200,
            dock_delay_ms: 1200,
            auto_trigger_ms: None,
            target_speed: 6.0,
            route: Some("/blank".to_string()),
            navigate_delay_ms: 800,
            reduced_motion_nav_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub text: String,
    pub show_delay_ms: u64,
    pub dock_delay_ms: u64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: "The Gala".to_string(),
            show_delay_ms: 150,
            dock_delay_ms: 1200,
        }
    }
}

/// Parameters handed to the swirl shader behind the enter sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwirlParams {
    pub colors: Vec<String>,
    pub color_back: String,
    pub band_count: u32,
    pub twist: f32,
    pub center: f32,
    pub proportion: f32,
    pub softness: f32,
    pub noise: f32,
    pub noise_frequency: f32,
    pub speed: f32,
}

impl Default for SwirlParams {
    fn default() -> Self {
        SwirlPreset::OxbloodParlor.params()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwirlPreset {
    OxbloodParlor,
    EmeraldParlor,
    IvorySalon,
}

impl SwirlPreset {
    pub const ALL: [SwirlPreset; 3] = [
        SwirlPreset::OxbloodParlor,
        SwirlPreset::EmeraldParlor,
        SwirlPreset::IvorySalon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SwirlPreset::OxbloodParlor => "OxbloodParlor",
            SwirlPreset::EmeraldParlor => "EmeraldParlor",
            SwirlPreset::IvorySalon => "IvorySalon",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn params(&self) -> SwirlParams {
        let colors = |c: [&str; 3]| -> Vec<String> { c.iter().map(|s| s.to_string()).collect() };
        match self {
            SwirlPreset::OxbloodParlor => SwirlParams {
                colors: colors(["#ffd1d1", "#ff8a8a", "#660000"]),
                color_back: "#330000".to_string(),
                band_count: 4,
                twist: 0.1,
                center: 0.2,
                proportion: 0.5,
                softness: 0.0,
                noise: 0.2,
                noise_frequency: 0.4,
                speed: 0.56,
            },
            SwirlPreset::EmeraldParlor => SwirlParams {
                colors: colors(["#d7ffd1", "#7bd389", "#0f3d2e"]),
                color_back: "#081e14".to_string(),
                band_count: 5,
                twist: 0.12,
                center: 0.25,
                proportion: 0.55,
                softness: 0.05,
                noise: 0.18,
                noise_frequency: 0.35,
                speed: 0.5,
            },
            SwirlPreset::IvorySalon => SwirlParams {
                colors: colors(["#fff7e6", "#e3d7b8", "#6b5b3a"]),
                color_back: "#221b11".to_string(),
                band_count: 3,
                twist: 0.08,
                center: 0.18,
                proportion: 0.48,
                softness: 0.04,
                noise: 0.15,
                noise_frequency: 0.3,
                speed: 0.45,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            viewport: default_viewport(),
            fps_cap: default_fps_cap(),
            reduced_motion: false,
            curtain: CurtainConfig::default(),
            words: WordsConfig::default(),
            sequence: SequenceConfig::default(),
            title: TitleConfig::default(),
            swirl: SwirlParams::default(),
        }
    }
}

fn default_viewport() -> Size {
    Size {
        width: 1280,
        height: 800,
    }
}

fn default_fps_cap() -> u32 {
    60
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let config_path = config_dir.join("gala").join("config.toml");

        if config_path.exists() {
            Self::from_path(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let config_dir = config_dir.join("gala");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        let Some(preset) = SwirlPreset::from_name(name) else {
            let known: Vec<_> = SwirlPreset::ALL.iter().map(|p| p.name()).collect();
            bail!("unknown swirl preset {name:?}, expected one of {}", known.join(", "));
        };
        self.swirl = preset.params();
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.viewport.height > 0, "viewport height must be positive");
        ensure!(self.fps_cap > 0, "fps_cap must be positive");
        ensure!(
            self.curtain.section_height_vh > 0.0,
            "curtain.section_height_vh must be positive"
        );

        if let Easing::Heavy { threshold, cap } = self.curtain.easing {
            ensure!(
                (0.0..1.0).contains(&threshold),
                "curtain.easing.threshold must be in [0, 1), got {threshold}"
            );
            ensure!(
                cap >= 1.0,
                "curtain.easing.cap must be at least 1 so the curtain fully lifts, got {cap}"
            );
        }

        let smoothing = &self.curtain.smoothing;
        ensure!(
            smoothing.alpha > 0.0 && smoothing.alpha <= 1.0,
            "curtain.smoothing.alpha must be in (0, 1], got {}",
            smoothing.alpha
        );
        ensure!(
            smoothing.epsilon > 0.0,
            "curtain.smoothing.epsilon must be positive"
        );

        ensure!(self.words.ramp > 0.0, "words.ramp must be positive");
        let words = self.words.words();
        let thresholds = self.words.resolved_thresholds();
        ensure!(
            words.len() == thresholds.len(),
            "{} words but {} thresholds",
            words.len(),
            thresholds.len()
        );
        for t in &thresholds {
            ensure!((0.0..=1.0).contains(t), "word threshold {t} outside [0, 1]");
        }
        for pair in thresholds.windows(2) {
            ensure!(
                pair[0] < pair[1],
                "word thresholds must be increasing ({} then {})",
                pair[0],
                pair[1]
            );
        }

        if let Some(route) = &self.sequence.route {
            ensure!(!route.is_empty(), "sequence.route must not be empty");
        }
        Ok(())
    }
}
