//! Settings - ボードの実行時設定
//!
//! 読み込み（ファイル・環境変数）は呼び出し側の責務です。
//! ここでは値の形とデフォルト、実行時部品への変換だけを持ちます。

use serde::{Deserialize, Serialize};

use crate::domain::FormRules;
use crate::impls::InMemoryProjectStore;
use crate::ports::{SequentialIdGenerator, SystemClock, UlidGenerator};

/// ID の採番方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    #[default]
    Ulid,
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub id_scheme: IdScheme,
    pub people_min: u32,
    pub people_max: u32,
    pub log_level: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        let rules = FormRules::default();
        Self {
            id_scheme: IdScheme::default(),
            people_min: rules.people_min,
            people_max: rules.people_max,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("people_min ({min}) must not exceed people_max ({max})")]
    InvertedPeopleRange { min: u32, max: u32 },
}

impl BoardSettings {
    /// 起動時検証（Fail-fast）
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.people_min > self.people_max {
            return Err(SettingsError::InvertedPeopleRange {
                min: self.people_min,
                max: self.people_max,
            });
        }
        Ok(())
    }

    pub fn form_rules(&self) -> FormRules {
        FormRules {
            people_min: self.people_min,
            people_max: self.people_max,
        }
    }

    pub fn build_store(&self) -> InMemoryProjectStore {
        match self.id_scheme {
            IdScheme::Ulid => InMemoryProjectStore::new(UlidGenerator::new(SystemClock)),
            IdScheme::Sequential => InMemoryProjectStore::new(SequentialIdGenerator::new()),
        }
    }
}
