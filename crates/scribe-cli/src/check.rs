//! Level rule validation

use anyhow::{Context, Result};
use scribe_core::{DEFAULT_LOG_LEVELS_VAR, LevelRules, LogConfig, OutputKind};

/// Check command implementation
pub fn run(rules: Option<String>, program: Option<String>, names: &[String]) -> Result<()> {
    let rules = match rules {
        Some(rules) => rules,
        None => std::env::var(DEFAULT_LOG_LEVELS_VAR)
            .with_context(|| format!("No rules given and {DEFAULT_LOG_LEVELS_VAR} is not set"))?,
    };

    println!("Checking level rules: {rules}");

    let parsed = LevelRules::parse(&rules);
    for line in describe(&parsed, program.as_deref(), names) {
        println!("{line}");
    }

    if parsed.has_problems() {
        anyhow::bail!("{} malformed rule entr(y/ies)", parsed.problems.len());
    }

    println!("\nLevel rules are valid!");
    Ok(())
}

/// Report lines for parsed rules: outputs, name rules, resolutions, problems
pub fn describe(rules: &LevelRules, program: Option<&str>, names: &[String]) -> Vec<String> {
    let mut lines = vec!["Outputs:".to_string()];
    for kind in OutputKind::ALL {
        let token = kind.to_string();
        let line = match rules.output_level(kind) {
            Some(level) => format!("  {token:<16} {level}"),
            None => format!("  {token:<16} {} (default)", kind.default_level()),
        };
        lines.push(line);
    }

    lines.push("Name rules (first match wins):".to_string());
    if rules.names.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (index, rule) in rules.names.iter().enumerate() {
        lines.push(format!("  {}. {} -> {}", index + 1, rule.pattern.as_str(), rule.level));
    }

    if !names.is_empty() {
        lines.push("Resolved:".to_string());
        for name in names {
            // Qualify exactly like the registry does.
            let qualified = match program {
                Some(program) => LogConfig::new(program).qualify(name),
                None => name.clone(),
            };
            let line = match rules.resolve(&qualified) {
                Some(level) => format!("  {qualified} -> {level}"),
                None => format!("  {qualified} -> lowest enabled output level"),
            };
            lines.push(line);
        }
    }

    if rules.has_problems() {
        lines.push("Problems:".to_string());
        for problem in &rules.problems {
            lines.push(format!("  ✗ {problem}"));
        }
    }

    lines
}

#[cfg(test)]
#[path = "check/check_tests.rs"]
mod check_tests;
