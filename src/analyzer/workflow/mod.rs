//! 日程分析工作流 - 严格有序的阶段编排
//!
//! 去重 → 顺序解析+调研（数据依赖，且刻意串行以免压垮被抓取的站点）
//! → 并发生成各课程分析（唯一的并发区域，全量屏障）
//! → 日程级总评 → 导出。

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::analyzer::context::AnalyzerContext;
use crate::analyzer::outlet;
use crate::analyzer::research::ResearchAggregator;
use crate::analyzer::summary::{SummaryGenerator, parse_overall_grade};
use crate::config::Config;
use crate::llm::LLMClient;
use crate::sources::{PlanetTerpClient, TestudoClient};
use crate::types::{CourseRef, CourseSummary, ResearchBundle, ScheduleAnalysis, SectionInfo};

/// 调研阶段对单门课程的产物
///
/// 教师无法确定的课程直接得到占位结果，完全绕过并发分析阶段。
enum ResearchOutcome {
    Bundle(ResearchBundle),
    Placeholder(CourseSummary),
}

/// 日程分析器
pub struct ScheduleAnalyzer {
    context: AnalyzerContext,
}

impl ScheduleAnalyzer {
    pub fn new(context: AnalyzerContext) -> Self {
        Self { context }
    }

    /// 执行完整分析流程，返回终态产物
    pub async fn execute(&self) -> Result<ScheduleAnalysis> {
        // 阶段1：去重
        let courses = dedup_courses(&self.context.config);
        if courses.is_empty() {
            println!("⚠️ 没有可分析的课程");
            return Ok(ScheduleAnalysis {
                generated: now_string(),
                course_count: 0,
                overall_grade: None,
                overall_analysis: "No courses found.".to_string(),
                courses: Vec::new(),
            });
        }
        println!("📋 待分析课程 {} 门：", courses.len());
        for (i, course) in courses.iter().enumerate() {
            println!("{}. {}", i + 1, course);
        }

        // 阶段2+3：顺序解析与调研（教师身份是解析阶段的产物，两步耦合）
        let aggregator = ResearchAggregator::new(Arc::clone(&self.context.reviews));
        let mut outcomes = Vec::with_capacity(courses.len());
        for (i, course) in courses.iter().enumerate() {
            println!(
                "\n{} 调研课程 {}/{}：{} {}",
                "=".repeat(20),
                i + 1,
                courses.len(),
                course,
                "=".repeat(20)
            );
            outcomes.push(self.research_course(&aggregator, course).await);
        }

        // 阶段4：并发生成各课程分析
        // 所有任务一次性启动，全部完成后才继续；结果顺序即输入顺序，
        // 与各任务的完成先后无关。
        println!("\n🚀 并发生成 {} 门课程的AI分析...", outcomes.len());
        let generator = SummaryGenerator::new(Arc::clone(&self.context.model));
        let tasks: Vec<BoxFuture<'_, CourseSummary>> = outcomes
            .iter()
            .map(|outcome| match outcome {
                ResearchOutcome::Bundle(bundle) => {
                    let generator = generator.clone();
                    async move { generator.summarize(bundle).await }.boxed()
                }
                // 占位结果无需外部调用，立即完成
                ResearchOutcome::Placeholder(summary) => {
                    let summary = summary.clone();
                    async move { summary }.boxed()
                }
            })
            .collect();
        let course_summaries = futures::future::join_all(tasks).await;

        // 阶段5：日程级总评（依赖阶段4的完整结果列表）
        println!("\n📊 生成日程整体分析...");
        let overall_analysis = generator.summarize_schedule(&course_summaries).await;
        let overall_grade = parse_overall_grade(&overall_analysis);
        match overall_grade {
            Some(grade) => println!("✅ 解析到总分：{}/100", grade),
            None => println!("⚠️ 总评文本中未找到符合格式的总分行"),
        }

        Ok(ScheduleAnalysis {
            generated: now_string(),
            course_count: course_summaries.len(),
            overall_grade,
            overall_analysis,
            courses: course_summaries,
        })
    }

    /// 解析单门课程并构建调研材料
    async fn research_course(
        &self,
        aggregator: &ResearchAggregator,
        course: &CourseRef,
    ) -> ResearchOutcome {
        // 目录检索失败或未找到时使用占位信息，继续走评价API兜底
        let section_info = match self.context.catalog.lookup_section(course).await {
            Ok(Some(info)) => info,
            Ok(None) => {
                println!("⚠️ 目录中未找到 {}，使用占位信息", course);
                SectionInfo::placeholder(course)
            }
            Err(e) => {
                println!("⚠️ 目录检索 {} 失败：{}，使用占位信息", course, e);
                SectionInfo::placeholder(course)
            }
        };

        let professor = self.resolve_professor(course, &section_info).await;
        if professor == "Unknown" {
            println!("⚠️ 无法确定 {} 的授课教师，生成占位结果", course);
            return ResearchOutcome::Placeholder(CourseSummary::placeholder(
                &course.course_id,
                &section_info.course_title,
                &course.section_id,
            ));
        }

        let bundle = aggregator
            .aggregate(&professor, &course.course_id, Some(&section_info))
            .await;
        if self.context.config.verbose {
            println!(
                "   调研材料：直接 {} 条 / 教师其它课程 {} 条 / 其它教师 {} 条",
                bundle.direct_reviews.len(),
                bundle.professor_other_reviews.len(),
                bundle.course_other_reviews.len()
            );
        }
        ResearchOutcome::Bundle(bundle)
    }

    /// 确定要分析的教师
    ///
    /// 取目录列出的第一位教师；目录无果时向评价API查询该课程的
    /// 教师名单并取第一位；仍无果则为Unknown。
    /// 注：偏向列表首位是沿袭下来的启发式选择，并非经过验证的策略。
    async fn resolve_professor(&self, course: &CourseRef, section_info: &SectionInfo) -> String {
        if let Some(first) = section_info.instructors.first()
            && first != "Unknown"
            && !first.is_empty()
        {
            return first.clone();
        }

        println!("🔎 目录未给出教师，向评价API查询 {} 的教师名单...", course.course_id);
        match self.context.reviews.course_professors(&course.course_id).await {
            Ok(professors) if !professors.is_empty() => {
                let professor = professors[0].clone();
                println!("   通过评价API找到候选教师：{}", professor);
                professor
            }
            Ok(_) => "Unknown".to_string(),
            Err(e) => {
                println!("⚠️ 查询教师名单失败：{}", e);
                "Unknown".to_string()
            }
        }
    }
}

/// 按规范化标识键去重输入课程，重复项记录日志后丢弃
fn dedup_courses(config: &Config) -> Vec<CourseRef> {
    let mut seen = HashSet::new();
    let mut courses = Vec::new();
    for input in &config.courses {
        let course = input.normalize();
        if seen.insert(course.key()) {
            courses.push(course);
        } else {
            println!("⚠️ 跳过重复输入：{}", course);
        }
    }
    courses
}

fn now_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 启动日程分析工作流
pub async fn launch(config: &Config) -> Result<()> {
    let llm_client = LLMClient::new(config.llm.clone())?;

    // 启动时检查模型连接
    llm_client.check_connection().await?;

    let context = AnalyzerContext::new(
        config.clone(),
        Arc::new(llm_client),
        Arc::new(TestudoClient::new(config.catalog.clone())?),
        Arc::new(PlanetTerpClient::new(config.reviews.clone())?),
    );

    let analyzer = ScheduleAnalyzer::new(context);
    let analysis = analyzer.execute().await?;

    outlet::save(config, &analysis)?;

    println!("\n✅ 日程分析完成！");
    println!("   文本报告：{}", config.output_path.display());
    println!("   JSON数据：{}", config.json_path.display());
    Ok(())
}

// Include tests
#[cfg(test)]
mod tests;
