//! Sub-build status table.

use crate::subbuild::{SubBuild, phase_names};
use crate::ui::icons;
use chainbuild_common::BuildResult;
use console::style;

/// Render sub-builds grouped by phase, phases in first-seen order.
pub fn render_sub_builds(sub_builds: &[SubBuild]) -> String {
    if sub_builds.is_empty() {
        return "No sub-builds registered.\n".to_string();
    }

    let mut out = String::new();
    for phase in phase_names(sub_builds) {
        out.push_str(&format!("{}{}\n", icons::PHASE, style(phase).bold()));
        out.push_str(&format!(
            "  {:<24} {:<8} {:<10} {:<20} {:<16} URL\n",
            "Job", "Build", "Result", "Started", "Duration"
        ));
        for sub_build in sub_builds.iter().filter(|s| s.phase_name() == phase) {
            out.push_str(&format!(
                "  {:<24} {:<8} {}{:<10} {:<20} {:<16} {}\n",
                sub_build.job_name(),
                format!("#{}", sub_build.build_number()),
                icons::for_result(sub_build.result()),
                result_label(sub_build.result()),
                sub_build.start_time().unwrap_or("-"),
                sub_build.duration().unwrap_or("-"),
                sub_build.url().unwrap_or("-"),
            ));
        }
        out.push('\n');
    }
    out
}

fn result_label(result: Option<BuildResult>) -> String {
    match result {
        Some(BuildResult::Success) => style("SUCCESS").green().to_string(),
        Some(BuildResult::Unstable) => style("UNSTABLE").yellow().to_string(),
        Some(BuildResult::Failure) => style("FAILURE").red().to_string(),
        Some(BuildResult::Aborted) => style("ABORTED").dim().to_string(),
        None => style("-").dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        assert_eq!(render_sub_builds(&[]), "No sub-builds registered.\n");
    }

    #[test]
    fn test_groups_by_phase_in_first_seen_order() {
        let mut compile = SubBuild::new("pipeline", 1, "build-x", 7, "compile");
        compile.set_result(Some(BuildResult::Failure));
        compile.set_url(Some("job/build-x/7/".to_string()));
        let lint = SubBuild::new("pipeline", 1, "lint", 2, "check");
        let docs = SubBuild::new("pipeline", 1, "docs", 4, "compile");

        let out = console::strip_ansi_codes(&render_sub_builds(&[compile, lint, docs])).to_string();
        let compile_pos = out.find("compile").unwrap();
        let check_pos = out.find("check").unwrap();
        assert!(compile_pos < check_pos);
        assert!(out.find("docs").unwrap() < check_pos);
        assert!(out.contains("#7"));
        assert!(out.contains("FAILURE"));
        assert!(out.contains("job/build-x/7/"));
    }
}
