//! List command implementation

use std::path::PathBuf;

use conda_invoke::{ListRequest, list};
use serde_json::{Value, json};

use crate::error::Result;

/// List packages in `env`; reports `{"changed": false, "output": [...], "rc": 0}`.
pub fn run_list(env: String, regex: Option<String>, executable: Option<PathBuf>) -> Result<Value> {
    let request = ListRequest {
        env_name: env,
        regex,
        executable,
    };

    let records = list(&request)?;
    Ok(json!({
        "changed": false,
        "output": serde_json::to_value(&records)?,
        "rc": 0,
    }))
}
