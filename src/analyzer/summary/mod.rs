//! AI分析生成器 - 将调研材料包转化为自然语言分析
//!
//! summarize绝不失败：模型调用的任何内部错误都被收敛为
//! 结构完整、summary字段为错误说明的CourseSummary，
//! 下游聚合不会被单次失败的调用破坏。

use std::sync::Arc;

use regex::Regex;

use crate::llm::CompletionModel;
use crate::types::{CourseSummary, ResearchBundle, ReviewRecord};

/// 每类评价在prompt中引用的条数上限
const EXCERPTS_PER_CATEGORY: usize = 10;

const SYSTEM_PROMPT: &str = "You are an experienced academic advisor. You analyze university \
courses and professors based strictly on the student review data provided by the user.";

/// AI分析生成器
#[derive(Clone)]
pub struct SummaryGenerator {
    model: Arc<dyn CompletionModel>,
}

impl SummaryGenerator {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// 为单门课程生成AI分析
    pub async fn summarize(&self, bundle: &ResearchBundle) -> CourseSummary {
        println!(
            "🤖 正在生成 {}（{}）的AI分析...",
            bundle.course_id, bundle.professor
        );

        let prompt = build_course_prompt(bundle);
        let summary = match self.model.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(text) if response_usable(&text) => {
                println!("✅ {} 分析完成", bundle.course_id);
                text
            }
            Ok(_) => {
                eprintln!("⚠️ {} 的模型响应为空或标记为错误", bundle.course_id);
                "Error generating AI summary: model returned empty or error response."
                    .to_string()
            }
            Err(e) => {
                eprintln!("⚠️ 生成 {} 的AI分析失败：{}", bundle.course_id, e);
                format!("Error generating AI summary: {}", e)
            }
        };

        CourseSummary {
            course_id: bundle.course_id.clone(),
            course_title: bundle.course_title.clone(),
            section_id: bundle.section_id.clone(),
            professor: bundle.professor.clone(),
            schedule: bundle.schedule.clone(),
            avg_rating: bundle.avg_rating,
            review_count: bundle.review_count,
            summary,
            research_stats: Some(bundle.clone()),
        }
    }

    /// 生成日程级总评
    ///
    /// 要求模型以 `Overall Schedule Grade: XX/100` 这一行开头，
    /// 调用方依赖该解析契约提取总分。失败时返回错误说明文本。
    pub async fn summarize_schedule(&self, summaries: &[CourseSummary]) -> String {
        println!("🤖 正在生成日程整体分析...");

        let prompt = build_schedule_prompt(summaries);
        match self.model.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(text) if response_usable(&text) => {
                println!("✅ 日程整体分析完成");
                text
            }
            Ok(_) => {
                eprintln!("⚠️ 日程总评的模型响应为空或标记为错误");
                "Error generating overall schedule analysis: model returned empty or error \
                 response."
                    .to_string()
            }
            Err(e) => {
                eprintln!("⚠️ 生成日程总评失败：{}", e);
                format!("Error generating overall schedule analysis: {}", e)
            }
        }
    }
}

/// 模型响应校验：空响应或明确带错误标记的响应视为失败
fn response_usable(text: &str) -> bool {
    !text.trim().is_empty() && !text.to_lowercase().contains("error")
}

/// 从总评文本解析总分
///
/// 锚定模式不做范围校验："150/100" 会解析为150；
/// 任何不匹配的格式返回None，不是错误。
pub fn parse_overall_grade(text: &str) -> Option<u32> {
    let re = Regex::new(r"Overall Schedule Grade:\s*(\d{1,3})\s*/\s*100").unwrap();
    re.captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// 构建单门课程的分析prompt
fn build_course_prompt(bundle: &ResearchBundle) -> String {
    let direct_text = format_excerpts(&bundle.direct_reviews, |r| {
        format!("DIRECT REVIEW (Rating: {}/5): {}", rating_str(r), r.review)
    });
    let prof_other_text = format_excerpts(&bundle.professor_other_reviews, |r| {
        format!(
            "PROF OTHER COURSE REVIEW ({} - Rating: {}/5): {}",
            r.course.as_deref().unwrap_or("Unknown"),
            rating_str(r),
            r.review
        )
    });
    let course_other_text = format_excerpts(&bundle.course_other_reviews, |r| {
        format!(
            "COURSE OTHER PROF REVIEW (Rating: {}/5): {}",
            rating_str(r),
            r.review
        )
    });

    format!(
        r#"Analyze UMD course {course_id} ({course_title}) taught by Professor {professor}. Schedule: {schedule}

Key Information:
- Direct Reviews ({review_count} total, avg rating {avg_rating:.2}/5): {direct}
- Professor Context (also teaches {other_courses}): {prof_other}
- Course Context (other profs include {other_profs}): {course_other}

Instructions:
Provide a balanced analysis based *only* on the information above. For each category below, give a score (out of 100) and a concise explanation, citing evidence (e.g., "direct reviews mention...", "reviews for other courses suggest..."). If information is insufficient, state that clearly and assign a neutral score (e.g., 50/100) or indicate N/A.
1.  **Teaching Quality:** (Clarity, engagement, effectiveness)
2.  **Course Difficulty:** (Challenging concepts, exams, assignments)
3.  **Workload:** (Time commitment, amount of homework/reading)
4.  **Grading Fairness:** (Lenient/strict, clear criteria, curves)
5.  **Organization/Structure:** (Pacing, syllabus clarity, flow)
6.  **Professor Approachability:** (Helpfulness, responsiveness, demeanor)
7.  **Overall Value:** (Learning experience, relevance, recommendation)

Finally, write a 1-2 paragraph **General Summary** synthesizing the key points for a student considering this specific course/professor combination. Focus on being helpful and objective. Use Markdown for formatting (like **bold** scores)."#,
        course_id = bundle.course_id,
        course_title = bundle.course_title,
        professor = bundle.professor,
        schedule = bundle.schedule,
        review_count = bundle.review_count,
        avg_rating = bundle.avg_rating,
        direct = or_none(&direct_text),
        other_courses = or_na(&bundle.professor_other_courses.join(", ")),
        prof_other = or_none(&prof_other_text),
        other_profs = or_na(
            &bundle
                .course_other_professors
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ),
        course_other = or_none(&course_other_text),
    )
}

/// 构建日程级总评prompt
fn build_schedule_prompt(summaries: &[CourseSummary]) -> String {
    let mut courses_text = String::new();
    for (idx, summary) in summaries.iter().enumerate() {
        courses_text.push_str(&format!(
            "\n{}. {} ({}) - Prof: {} ({:.1}/5, {} rev) - Sched: {}",
            idx + 1,
            summary.course_id,
            or_na(&summary.course_title),
            summary.professor,
            summary.avg_rating,
            summary.review_count,
            or_na(&summary.schedule),
        ));
    }

    format!(
        r#"Analyze the following UMD schedule consisting of {count} course(s):
{courses}

Instructions:
1.  **VERY IMPORTANT:** Start the entire response *immediately* with a single line formatted exactly like this: `Overall Schedule Grade: XX/100` where XX is your calculated overall score. Do not add any text before this line.
2.  After the grade line, provide a comprehensive analysis with scores (out of 100) and detailed paragraph explanations for the following categories:
    *   **Overall Workload:** (Consider course levels, number of courses, known demands)
    *   **Professor Quality:** (Based on average ratings and review counts provided)
    *   **Schedule Balance:** (Timing, back-to-back classes, day distribution)
    *   **Subject Synergy:** (How well course topics might complement or conflict)
    *   **Difficulty Management:** (Combined challenge, potential bottlenecks)
    *   **Overall Schedule Quality:** (Synthesize pros/cons, offer advice/strategies - this is separate from the grade line at the start)

Base your analysis *only* on the information provided about the courses in the list. Use Markdown for formatting (like **bold** scores within the category explanations)."#,
        count = summaries.len(),
        courses = courses_text,
    )
}

/// 每类至多引用EXCERPTS_PER_CATEGORY条非空评价
fn format_excerpts<F>(reviews: &[ReviewRecord], formatter: F) -> String
where
    F: Fn(&ReviewRecord) -> String,
{
    reviews
        .iter()
        .filter(|r| !r.review.trim().is_empty())
        .take(EXCERPTS_PER_CATEGORY)
        .map(|r| formatter(r))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn rating_str(review: &ReviewRecord) -> String {
    review
        .rating
        .map(|r| format!("{}", r))
        .unwrap_or_else(|| "N/A".to_string())
}

fn or_none(text: &str) -> &str {
    if text.is_empty() { "None available." } else { text }
}

fn or_na(text: &str) -> &str {
    if text.is_empty() { "N/A" } else { text }
}
