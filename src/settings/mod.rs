//! Typed settings registry.
//!
//! `settings.toml` itself is parsed by an external collaborator (a TOML
//! loader is a configuration-parsing concern, out of scope for this crate);
//! what lives here is the descriptor/registry pattern that validates and
//! applies the parsed key=value pairs against a concrete `Settings` struct,
//! one descriptor per recognised key from the `ssh`, `typesetting`,
//! `layout`, `general`, `env` and `alias` sections.

mod descriptor;

pub use descriptor::{SettingDescriptor, SettingError, SettingType, SettingValue};

use std::collections::HashMap;
use std::time::Duration;

/// Concrete, typed settings applied after validation. `Default` mirrors the
/// editor's out-of-the-box behaviour when no `settings.toml` exists.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ssh_shell: String,
    pub ssh_close_stdin: bool,
    pub ssh_cachesize: usize,
    pub ssh_conn_timeout: Duration,
    pub typesetting_replace_cr_with_tofu: bool,
    pub layout_editor_tag: String,
    pub layout_column_tag: String,
    pub layout_window_tag_user_area: String,
    pub general_exec: Vec<String>,
    pub env: HashMap<String, String>,
    pub alias: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssh_shell: "sh".to_string(),
            ssh_close_stdin: false,
            ssh_cachesize: 8,
            ssh_conn_timeout: Duration::from_secs(10),
            typesetting_replace_cr_with_tofu: true,
            layout_editor_tag: String::new(),
            layout_column_tag: String::new(),
            layout_window_tag_user_area: String::new(),
            general_exec: Vec::new(),
            env: HashMap::new(),
            alias: HashMap::new(),
        }
    }
}

fn set_ssh_shell(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Str(v) => {
            s.ssh_shell = v;
            Ok(())
        }
        _ => Err(SettingError::Validation("expected string".into())),
    }
}

fn set_ssh_close_stdin(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Bool(b) => {
            s.ssh_close_stdin = b;
            Ok(())
        }
        _ => Err(SettingError::Validation("expected bool".into())),
    }
}

fn set_ssh_cachesize(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Integer(n) if n > 0 => {
            s.ssh_cachesize = n as usize;
            Ok(())
        }
        SettingValue::Integer(_) => {
            Err(SettingError::Validation("cachesize must be > 0".into()))
        }
        _ => Err(SettingError::Validation("expected integer".into())),
    }
}

fn set_ssh_conn_timeout(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Integer(n) => {
            s.ssh_conn_timeout = Duration::from_secs(n as u64);
            Ok(())
        }
        _ => Err(SettingError::Validation("expected integer seconds".into())),
    }
}

fn set_replace_cr(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Bool(b) => {
            s.typesetting_replace_cr_with_tofu = b;
            Ok(())
        }
        _ => Err(SettingError::Validation("expected bool".into())),
    }
}

fn set_editor_tag(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Str(v) => {
            s.layout_editor_tag = v;
            Ok(())
        }
        _ => Err(SettingError::Validation("expected string".into())),
    }
}

fn set_column_tag(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Str(v) => {
            s.layout_column_tag = v;
            Ok(())
        }
        _ => Err(SettingError::Validation("expected string".into())),
    }
}

fn set_window_tag_user_area(s: &mut Settings, v: SettingValue) -> Result<(), SettingError> {
    match v {
        SettingValue::Str(v) => {
            s.layout_window_tag_user_area = v;
            Ok(())
        }
        _ => Err(SettingError::Validation("expected string".into())),
    }
}

/// Static registry of every recognised `settings.toml` key. External loaders
/// walk the parsed document and call `execute` for each leaf key=value pair.
pub const REGISTRY: &[SettingDescriptor] = &[
    SettingDescriptor {
        name: "ssh.shell",
        ty: SettingType::Str,
        set: set_ssh_shell,
    },
    SettingDescriptor {
        name: "ssh.close-stdin",
        ty: SettingType::Boolean,
        set: set_ssh_close_stdin,
    },
    SettingDescriptor {
        name: "ssh.cachesize",
        ty: SettingType::Integer { min: Some(1), max: None },
        set: set_ssh_cachesize,
    },
    SettingDescriptor {
        name: "ssh.conn-timeout",
        ty: SettingType::Integer { min: Some(1), max: None },
        set: set_ssh_conn_timeout,
    },
    SettingDescriptor {
        name: "typesetting.replace-cr-with-tofu",
        ty: SettingType::Boolean,
        set: set_replace_cr,
    },
    SettingDescriptor {
        name: "layout.editor-tag",
        ty: SettingType::Str,
        set: set_editor_tag,
    },
    SettingDescriptor {
        name: "layout.column-tag",
        ty: SettingType::Str,
        set: set_column_tag,
    },
    SettingDescriptor {
        name: "layout.window-tag-user-area",
        ty: SettingType::Str,
        set: set_window_tag_user_area,
    },
];

/// Resolve one parsed key against `REGISTRY` and apply it to `settings`.
/// `general.exec`, `env.*` and `alias.*` are structural (list/map) sections
/// handled directly by the caller rather than through a scalar descriptor,
/// since they don't fit the single-value setter shape.
pub fn apply(settings: &mut Settings, key: &str, value: SettingValue) -> Result<(), SettingError> {
    if let Some(rest) = key.strip_prefix("env.") {
        if let SettingValue::Str(v) = value {
            settings.env.insert(rest.to_string(), v);
            return Ok(());
        }
        return Err(SettingError::Validation("expected string".into()));
    }
    if let Some(rest) = key.strip_prefix("alias.") {
        if let SettingValue::Str(v) = value {
            settings.alias.insert(rest.to_string(), v);
            return Ok(());
        }
        return Err(SettingError::Validation("expected string".into()));
    }
    if key == "general.exec" {
        if let SettingValue::List(items) = value {
            settings.general_exec = items;
            return Ok(());
        }
        return Err(SettingError::Validation("expected list of strings".into()));
    }

    let desc = REGISTRY
        .iter()
        .find(|d| d.name == key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let typed = descriptor::parse_value(&desc.ty, &value)?;
    (desc.set)(settings, typed)
}
