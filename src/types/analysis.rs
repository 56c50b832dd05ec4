use serde::{Deserialize, Serialize};

use super::ResearchBundle;

/// 单门课程的AI分析结果
///
/// 每个去重后的输入课程恰好对应一份，输出顺序与输入顺序一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course_id: String,
    pub course_title: String,
    pub section_id: String,
    pub professor: String,
    pub schedule: String,
    pub avg_rating: f64,
    pub review_count: usize,
    /// AI分析文本；模型调用失败时为错误说明文本，绝不为空
    pub summary: String,
    /// 完整调研材料（占位路径下为None）
    pub research_stats: Option<ResearchBundle>,
}

impl CourseSummary {
    /// 教师信息不可用时的占位结果，跳过AI分析
    pub fn placeholder(
        course_id: &str,
        course_title: &str,
        section_id: &str,
    ) -> Self {
        Self {
            course_id: course_id.to_string(),
            course_title: course_title.to_string(),
            section_id: section_id.to_string(),
            professor: "Unknown".to_string(),
            schedule: "N/A".to_string(),
            avg_rating: 0.0,
            review_count: 0,
            summary: "Professor information unavailable. Cannot perform detailed analysis."
                .to_string(),
            research_stats: None,
        }
    }
}

/// 日程分析终态产物
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAnalysis {
    /// 生成时间
    pub generated: String,
    /// 课程数量
    pub course_count: usize,
    /// 从总评文本解析出的总分（0-100，格式不匹配时缺失）
    pub overall_grade: Option<u32>,
    /// 日程级总评文本
    pub overall_analysis: String,
    /// 按去重后输入顺序排列的各课程分析
    pub courses: Vec<CourseSummary>,
}
