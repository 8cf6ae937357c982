use chrono::Utc;
use colored::{Color, Colorize};
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::default);

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_timestamps: bool,
    pub show_target: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            min_level: LevelFilter::Info,
            show_timestamps: true,
            show_target: false,
        }
    }
}

impl LoggerConfig {
    pub fn development() -> Self {
        LoggerConfig {
            min_level: LevelFilter::Debug,
            show_timestamps: true,
            show_target: true,
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }
}

#[derive(Default)]
struct ConsoleLogger {
    config: Mutex<LoggerConfig>,
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let config = self.config.lock().unwrap();

        let mut line = String::new();
        if config.show_timestamps {
            line.push_str(&format!(
                "{} ",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed()
            ));
        }
        line.push_str(&format!(
            "{:5} ",
            record.level().to_string().color(level_color(record.level())).bold()
        ));
        if config.show_target {
            line.push_str(&format!("{} ", record.target().dimmed()));
        }
        line.push_str(&record.args().to_string());

        if record.level() <= Level::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn flush(&self) {}
}

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let min_level = config.min_level;
    *LOGGER.config.lock().unwrap() = config;

    log::set_logger(&*LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(min_level);
    Ok(())
}
