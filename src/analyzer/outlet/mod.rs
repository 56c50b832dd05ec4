//! 分析结果导出 - 文本报告与JSON数据两种出口
//!
//! 单个出口失败只记录日志，不会让已完成的分析付诸东流。

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::types::{CourseSummary, ScheduleAnalysis};

/// 导出分析结果到配置指定的两个路径
pub fn save(config: &Config, analysis: &ScheduleAnalysis) -> Result<()> {
    if let Err(e) = save_report(&config.output_path, analysis) {
        eprintln!("⚠️ 导出文本报告失败：{}", e);
    } else {
        println!("📄 文本报告已导出：{}", config.output_path.display());
    }

    if let Err(e) = save_json(&config.json_path, analysis) {
        eprintln!("⚠️ 导出JSON数据失败：{}", e);
    } else {
        println!("📄 JSON数据已导出：{}", config.json_path.display());
    }

    Ok(())
}

/// 写出人类可读的文本报告
fn save_report(path: &Path, analysis: &ScheduleAnalysis) -> Result<()> {
    let report = render_report(analysis);
    std::fs::write(path, report)
        .context(format!("Failed to write report file: {:?}", path))?;
    Ok(())
}

/// 写出结构化JSON数据
fn save_json(path: &Path, analysis: &ScheduleAnalysis) -> Result<()> {
    let json = serde_json::to_string_pretty(analysis).context("Failed to serialize analysis")?;
    std::fs::write(path, json).context(format!("Failed to write JSON file: {:?}", path))?;
    Ok(())
}

/// 渲染文本报告
fn render_report(analysis: &ScheduleAnalysis) -> String {
    let separator = "=".repeat(50);
    let mut out = String::new();

    let _ = writeln!(out, "UMD SCHEDULE ANALYSIS");
    let _ = writeln!(out, "Generated: {}\n", analysis.generated);
    let _ = writeln!(out, "OVERALL SCHEDULE ANALYSIS\n{}\n", separator);
    if analysis.overall_analysis.is_empty() {
        out.push_str("Overall summary generation failed.");
    } else {
        out.push_str(&analysis.overall_analysis);
    }
    let _ = write!(
        out,
        "\n\n{}\n\nINDIVIDUAL COURSE ANALYSES\n{}\n\n",
        separator, separator
    );

    if analysis.courses.is_empty() {
        out.push_str("No individual course analyses were generated.\n");
    }
    for (idx, summary) in analysis.courses.iter().enumerate() {
        render_course(&mut out, idx + 1, summary);
    }

    out
}

/// 渲染单门课程的小节
fn render_course(out: &mut String, index: usize, summary: &CourseSummary) {
    let _ = writeln!(
        out,
        "COURSE {}: {} - {}",
        index,
        or_na(&summary.course_id),
        or_na(&summary.course_title)
    );
    let _ = writeln!(out, "Section: {}", or_na(&summary.section_id));
    let _ = writeln!(out, "Professor: {}", or_na(&summary.professor));
    let _ = writeln!(out, "Schedule: {}", or_na(&summary.schedule));
    let _ = writeln!(
        out,
        "Average Rating: {:.2}/5 ({} reviews)",
        summary.avg_rating, summary.review_count
    );

    if let Some(stats) = &summary.research_stats {
        let _ = writeln!(
            out,
            "Research Depth: {} direct, {} prof-other, {} course-other",
            stats.direct_reviews.len(),
            stats.professor_other_reviews.len(),
            stats.course_other_reviews.len()
        );
        if !stats.professor_other_courses.is_empty() {
            let _ = writeln!(
                out,
                "                Professor teaches {} other courses",
                stats.professor_other_courses.len()
            );
        }
        if !stats.course_other_professors.is_empty() {
            let _ = writeln!(
                out,
                "                Course is taught by {} other professors",
                stats.course_other_professors.len()
            );
        }
    }

    let _ = writeln!(out, "\nANALYSIS:");
    if summary.summary.is_empty() {
        out.push_str("Summary generation failed.");
    } else {
        out.push_str(&summary.summary);
    }
    let _ = write!(out, "\n\n{}\n\n", "-".repeat(50));
}

fn or_na(text: &str) -> &str {
    if text.is_empty() { "N/A" } else { text }
}

// Include tests
#[cfg(test)]
mod tests;
