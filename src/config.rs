use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

fn default_phrases_file() -> String {
    "phrases.json".to_string()
}

fn default_preferred_language() -> String {
    "el-GR".to_string()
}

fn default_speech_rate() -> f32 {
    0.9
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_phrases_file")]
    pub phrases_file: String,
    /// Language tag used for voice selection and as the utterance default
    /// when a phrase carries no `lang` of its own.
    #[serde(default = "default_preferred_language")]
    pub preferred_language: String,
    /// Default speaking rate relative to the engine's normal rate.
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            phrases_file: default_phrases_file(),
            preferred_language: default_preferred_language(),
            speech_rate: default_speech_rate(),
        }
    }
}

impl Config {
    /// Primary subtag of the preferred language, used as the last-resort
    /// voice match ("el" for "el-GR").
    pub fn language_code(&self) -> &str {
        self.preferred_language
            .split('-')
            .next()
            .unwrap_or(&self.preferred_language)
    }
}

pub fn load_config_from_file(file_path: &str) -> Result<Config, String> {
    match fs::read_to_string(file_path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(loaded_config) => {
                let path = PathBuf::from(&loaded_config.phrases_file);
                if !path.is_file() {
                    return Err(format!(
                        "Error: phrases_file specified in {} ('{}') does not exist.",
                        file_path, loaded_config.phrases_file
                    ));
                }
                if !(0.25..=4.0).contains(&loaded_config.speech_rate) {
                    return Err(format!(
                        "Error: speech_rate specified in {} ({}) must be between 0.25 and 4.0.",
                        file_path, loaded_config.speech_rate
                    ));
                }
                Ok(loaded_config)
            }
            Err(e) => Err(format!("Failed to parse {}: {}", file_path, e)),
        },
        Err(e) => Err(format!(
            "Failed to read {}: {}. Please ensure it exists.",
            file_path, e
        )),
    }
}
