//! Question-set settings: `settings.toml`, environment overrides, and CLI flags.
//!
//! Precedence is CLI, then environment, then file, then defaults. Values that
//! fail to parse are skipped so the next layer down applies.

use directories::ProjectDirs;
use ladder_core::questions::{DEFAULT_QUESTION_COUNT, QuestionsRequest};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub const MIN_QUESTION_COUNT: usize = 1;
pub const MAX_QUESTION_COUNT: usize = 50;
pub const QUESTION_COUNT_ENV: &str = "LADDER_QUESTION_COUNT";
pub const CATEGORIES_ENV: &str = "LADDER_CATEGORIES";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFile {
    pub question_count: Option<usize>,
    pub categories: Option<Vec<String>>,
}

impl SettingsFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.config_dir().to_path_buf();
            path.push("settings.toml");
            path
        })
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Settings that reproduce `request` on the next run.
    pub fn from_request(request: &QuestionsRequest) -> Self {
        Self {
            question_count: Some(request.count),
            categories: (!request.categories.is_empty()).then(|| request.categories.clone()),
        }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let content = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

/// Raw environment values, captured once so resolution stays testable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub question_count: Option<String>,
    pub categories: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            question_count: env::var(QUESTION_COUNT_ENV).ok(),
            categories: env::var(CATEGORIES_ENV).ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub question_count: Option<usize>,
    pub categories: Vec<String>,
}

pub fn clamp_question_count(count: usize) -> usize {
    count.clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT)
}

/// Splits a comma separated category list, dropping blanks.
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn resolve_questions_request(
    file: Option<&SettingsFile>,
    env: &EnvOverrides,
    cli: &CliOverrides,
) -> QuestionsRequest {
    let env_count = env.question_count.as_deref().and_then(|raw| raw.trim().parse::<usize>().ok());
    let count = cli
        .question_count
        .or(env_count)
        .or_else(|| file.and_then(|settings| settings.question_count))
        .map_or(DEFAULT_QUESTION_COUNT, clamp_question_count);

    let env_categories =
        env.categories.as_deref().map(parse_categories).filter(|list| !list.is_empty());
    let categories = if cli.categories.is_empty() {
        env_categories
            .or_else(|| file.and_then(|settings| settings.categories.clone()))
            .unwrap_or_default()
    } else {
        cli.categories.clone()
    };

    QuestionsRequest { categories, count }
}
