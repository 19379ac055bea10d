//! Default value functions used by serde for config deserialization.

use super::BackendKind;

pub fn default_name() -> String {
    "reacjilator".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_backend() -> BackendKind {
    BackendKind::Deepl
}

pub fn default_aws_region() -> String {
    "ap-northeast-1".to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    3000
}

pub fn default_shortcut_callback() -> String {
    "deepl-translation".to_string()
}
