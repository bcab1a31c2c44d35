use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Optional overrides read from `config.toml`. Unset fields fall back to the
/// built-in defaults of each widget.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub boids: BoidsSettings,
    #[serde(default)]
    pub life: LifeSettings,
    #[serde(default)]
    pub mines: MinesSettings,
    #[serde(default)]
    pub snake: SnakeSettings,
    #[serde(default)]
    pub sort: SortSettings,
    #[serde(default)]
    pub noise: NoiseSettings,
    #[serde(default)]
    pub links: LinksSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoidsSettings {
    pub count: Option<usize>,
    pub separation: Option<f32>,
    pub alignment: Option<f32>,
    pub cohesion: Option<f32>,
    pub max_turn: Option<f32>,
    pub view_radius: Option<f32>,
    pub view_cone: Option<f32>,     // degrees; 360 or more sees all around
    pub variance: Option<f32>,      // per-agent trait spread, 0.0-1.0
    pub fps: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LifeSettings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed: Option<u32>,
    pub density: Option<f64>,       // fill ratio for random soups
}

#[derive(Debug, Default, Deserialize)]
pub struct MinesSettings {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub mines: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnakeSettings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SortSettings {
    pub bars: Option<usize>,
    pub tick_ms: Option<u64>,
    pub swaps_per_tick: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoiseSettings {
    pub seed: Option<String>,       // base 36
}

#[derive(Debug, Default, Deserialize)]
pub struct LinksSettings {
    pub file: Option<PathBuf>,      // JSON store location
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termplay")
            .join("config.toml")
    }

    /// Short-link file: settings value, else the data directory
    pub fn links_path(&self) -> PathBuf {
        self.links.file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("termplay")
                .join("links.json")
        })
    }

    pub fn log_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("termplay")
            .join("termplay.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let s = Settings::parse("").expect("empty toml parses");
        assert!(s.boids.count.is_none());
        assert!(s.snake.tick_ms.is_none());
    }

    #[test]
    fn sections_are_independent() {
        let s = Settings::parse(
            r#"
            [mines]
            rows = 16
            mines = 40

            [life]
            speed = 4
            "#,
        )
        .expect("valid toml");
        assert_eq!(s.mines.rows, Some(16));
        assert_eq!(s.mines.cols, None);
        assert_eq!(s.mines.mines, Some(40));
        assert_eq!(s.life.speed, Some(4));
        assert!(s.boids.fps.is_none());
    }

    #[test]
    fn links_file_override() {
        let s = Settings::parse("[links]\nfile = \"/tmp/l.json\"\n").expect("valid toml");
        assert_eq!(s.links_path(), PathBuf::from("/tmp/l.json"));
    }

    #[test]
    fn nan_parses_and_is_left_to_the_merge() {
        let s = Settings::parse("[boids]\nvariance = nan\n[life]\ndensity = nan\n").expect("valid toml");
        assert!(s.boids.variance.is_some_and(f32::is_nan));
        assert!(s.life.density.is_some_and(f64::is_nan));
    }

    #[test]
    fn bad_types_are_errors() {
        assert!(Settings::parse("[snake]\nwidth = \"wide\"\n").is_err());
    }
}
