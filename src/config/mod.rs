mod drum_config;

pub use drum_config::{
    ConfigError, DEFAULT_EASY_MISS_FACTOR, DEFAULT_MISS_LIMIT, DEFAULT_TEMPO_BPM, DrumConfig,
};
