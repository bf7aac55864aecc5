//! Text rendering of drift reports.
//!
//! Every renderer returns a `String` so commands decide where it goes, and
//! takes [`ReportOptions`] explicitly.

use std::fmt::Write as _;

use envquack_checker::{ComposeDiff, DockerfileDiff, EnvDiff};
use envquack_common::config::ReportOptions;
use envquack_common::error::Result;
use serde::Serialize;

use crate::duck;

const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Severity of a report section, used to pick its color.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Error,
    Warning,
    Info,
}

impl Tone {
    const fn color(self) -> &'static str {
        match self {
            Self::Error => RED,
            Self::Warning => YELLOW,
            Self::Info => CYAN,
        }
    }
}

/// A titled list of names; skipped entirely when empty.
struct Section<'a> {
    fancy: &'a str,
    plain: &'a str,
    tone: Tone,
    items: &'a [String],
}

impl Section<'_> {
    fn render(&self, out: &mut String, opts: ReportOptions) {
        if self.items.is_empty() {
            return;
        }
        if opts.colorize {
            let _ = writeln!(out, "{}{BOLD}{}{RESET}", self.tone.color(), self.fancy);
        } else {
            let _ = writeln!(out, "{}", self.plain);
        }
        for item in self.items {
            let _ = writeln!(out, "  - {item}");
        }
        out.push('\n');
    }
}

/// Renders the `.env` vs `.env.example` report.
#[must_use]
pub fn env_report(diff: &EnvDiff, opts: ReportOptions) -> String {
    let mut out = String::new();
    if !diff.has_issues() {
        aligned(&mut out, "✅ All envs aligned.", "(Your duck is calm and happy.)", opts);
        return out;
    }

    issues_header(&mut out, "Environment issues detected:", opts);
    Section {
        fancy: "🔴 Missing variables (present in .env.example but not in .env):",
        plain: "Missing variables:",
        tone: Tone::Error,
        items: &diff.missing,
    }
    .render(&mut out, opts);
    Section {
        fancy: "🟡 Extra variables (present in .env but not in .env.example):",
        plain: "Extra variables:",
        tone: Tone::Warning,
        items: &diff.extra,
    }
    .render(&mut out, opts);
    footer(&mut out, "(Your duck is angry. Fix your .env!)", opts);
    out
}

/// Renders the compose report.
#[must_use]
pub fn compose_report(diff: &ComposeDiff, opts: ReportOptions) -> String {
    let mut out = String::new();
    if !diff.has_issues() {
        aligned(
            &mut out,
            "✅ Docker Compose environment is aligned.",
            "(Your duck approves of your container setup!)",
            opts,
        );
        return out;
    }

    issues_header(&mut out, "Docker Compose environment issues detected:", opts);
    Section {
        fancy: "💥 Missing env_files referenced in compose:",
        plain: "Missing env_files:",
        tone: Tone::Error,
        items: &diff.missing_env_files,
    }
    .render(&mut out, opts);
    Section {
        fancy: "🔴 Variables required by compose but missing in env files:",
        plain: "Missing variables:",
        tone: Tone::Error,
        items: &diff.missing_in_env,
    }
    .render(&mut out, opts);

    if opts.verbose && !diff.service_breakdown.is_empty() {
        out.push_str(if opts.colorize {
            "📋 Service breakdown:\n"
        } else {
            "Service breakdown:\n"
        });
        for (service, missing) in &diff.service_breakdown {
            let _ = writeln!(out, "  {service}:");
            for name in missing {
                let _ = writeln!(out, "    - {name}");
            }
        }
        out.push('\n');
    }

    Section {
        fancy: "🟡 Variables in env files but not used in compose:",
        plain: "Unused variables:",
        tone: Tone::Warning,
        items: &diff.extra_in_env,
    }
    .render(&mut out, opts);
    footer(&mut out, "(Your duck is confused by your container setup!)", opts);
    out
}

/// Renders the Dockerfile report.
///
/// Hardcoded `ENV` values and `ARG`s without defaults are informational and
/// only shown when `verbose` is set.
#[must_use]
pub fn dockerfile_report(diff: &DockerfileDiff, opts: ReportOptions) -> String {
    let mut out = String::new();
    if !diff.has_issues() {
        aligned(
            &mut out,
            "✅ Dockerfile environment is aligned.",
            "(Your duck approves of your containerized setup!)",
            opts,
        );
        return out;
    }

    issues_header(&mut out, "Dockerfile environment issues detected:", opts);
    Section {
        fancy: "🔴 Variables required by Dockerfile but missing in env files:",
        plain: "Missing variables:",
        tone: Tone::Error,
        items: &diff.missing_in_env,
    }
    .render(&mut out, opts);
    Section {
        fancy: "🟠 ARG variables declared but never used:",
        plain: "Unused ARG variables:",
        tone: Tone::Warning,
        items: &diff.unused_args,
    }
    .render(&mut out, opts);
    if opts.verbose {
        Section {
            fancy: "🟡 ENV variables with hardcoded values (consider making configurable):",
            plain: "Hardcoded ENV variables:",
            tone: Tone::Warning,
            items: &diff.hardcoded_envs,
        }
        .render(&mut out, opts);
        Section {
            fancy: "⚠️  ARG variables without default values:",
            plain: "ARG variables without defaults:",
            tone: Tone::Warning,
            items: &diff.missing_arg_defaults,
        }
        .render(&mut out, opts);
    }
    Section {
        fancy: "🔵 Variables in env files but not used in Dockerfile:",
        plain: "Unused variables:",
        tone: Tone::Info,
        items: &diff.extra_in_env,
    }
    .render(&mut out, opts);
    footer(&mut out, "(Your duck is confused by your Dockerfile setup!)", opts);
    out
}

/// A bold green line when colors are on, the bare text otherwise.
#[must_use]
pub fn success(text: &str, opts: ReportOptions) -> String {
    if opts.colorize {
        format!("{GREEN}{BOLD}{text}{RESET}")
    } else {
        text.to_owned()
    }
}

/// Renders any result as pretty-printed JSON.
///
/// # Errors
///
/// Returns a serialization error if `value` has no JSON form.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Prefixes every non-empty line with two spaces.
#[must_use]
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn aligned(out: &mut String, headline: &str, mood: &str, opts: ReportOptions) {
    let _ = writeln!(out, "{}", success(headline, opts));
    if opts.show_duck {
        let _ = writeln!(out, "{mood}");
    }
}

fn issues_header(out: &mut String, headline: &str, opts: ReportOptions) {
    if opts.show_duck {
        let _ = writeln!(out, "{}", duck::ANGRY);
        let _ = writeln!(out, "QUACK! 🦆 {headline}\n");
    }
}

fn footer(out: &mut String, mood: &str, opts: ReportOptions) {
    if opts.show_duck {
        let _ = writeln!(out, "{mood}");
    }
}
