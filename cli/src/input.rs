// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::Path};

use recur_ical::unfold;
use tokio::{fs, io::AsyncReadExt};

/// Gather the rules to process.
///
/// Rules given on the command line come first, followed by the lines of
/// `file`. Stdin is read only when neither is given.
pub async fn read_rules(
    mut rules: Vec<String>,
    file: Option<&Path>,
) -> Result<Vec<String>, Box<dyn Error>> {
    if let Some(path) = file {
        tracing::debug!(path = %path.display(), "reading rules from file...");
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read rules from {}: {}", path.display(), e))?;
        rules.extend(split_rules(&content));
    } else if rules.is_empty() {
        tracing::debug!("reading rules from stdin...");
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        rules.extend(split_rules(&content));
    }
    Ok(rules)
}

/// Split text into rule lines, joining folded lines and skipping blank ones.
pub fn split_rules(content: &str) -> Vec<String> {
    unfold(content)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}
