use serde::{Deserialize, Serialize};

/// 单条评价记录 - 来自评价API的原始数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// 评价所属课程（可能缺失）
    #[serde(default)]
    pub course: Option<String>,
    /// 评分（1-5，可能缺失；平均值计算必须排除缺失评分）
    #[serde(default)]
    pub rating: Option<f64>,
    /// 预期成绩
    #[serde(default, alias = "expected_grade")]
    pub grade: Option<String>,
    /// 评价正文
    #[serde(default)]
    pub review: String,
    /// 创建时间（ISO字符串）
    #[serde(default)]
    pub created: Option<String>,
}

impl ReviewRecord {
    /// 创建日期（截取前10位，"YYYY-MM-DD"）
    pub fn date(&self) -> String {
        self.created
            .as_deref()
            .map(|c| c.chars().take(10).collect())
            .unwrap_or_default()
    }
}

/// 从评价集合计算平均评分与有效评分数
///
/// 缺失评分的记录不参与计算；空集合返回 (0.0, 0)，这不是错误。
pub fn average_rating(reviews: &[ReviewRecord]) -> (f64, usize) {
    let ratings: Vec<f64> = reviews.iter().filter_map(|r| r.rating).collect();
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let avg = ratings.iter().sum::<f64>() / ratings.len() as f64;
    (avg, ratings.len())
}

/// 调研材料包 - 针对一个教师-课程组合聚合的评价与上下文数据
///
/// 每门课程构建一次，构建后不再变更。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchBundle {
    pub course_id: String,
    pub professor: String,
    pub course_title: String,
    pub section_id: String,
    /// 日程字符串（"days time"）
    pub schedule: String,
    /// 直接评价：同时命中目标教师与目标课程
    pub direct_reviews: Vec<ReviewRecord>,
    /// 直接评价的平均评分（无有效评分时为0）
    pub avg_rating: f64,
    /// 参与平均值计算的评分数
    pub review_count: usize,
    /// 该教师其它课程的评价（要求课程ID存在）
    pub professor_other_reviews: Vec<ReviewRecord>,
    /// 该教师教过的其它课程（去重、排序）
    pub professor_other_courses: Vec<String>,
    /// 其它教师对该课程的抽样评价（至多3位教师、每位至多5条）
    pub course_other_reviews: Vec<ReviewRecord>,
    /// 教过该课程的其它教师（排除目标教师，排序）
    pub course_other_professors: Vec<String>,
}

impl ResearchBundle {
    /// 仅含上下文信息的空材料包，后续调研步骤在其上填充
    pub fn empty(professor: &str, course_id: &str, section_info: Option<&super::SectionInfo>) -> Self {
        Self {
            course_id: course_id.to_string(),
            professor: professor.to_string(),
            course_title: section_info
                .map(|s| s.course_title.clone())
                .unwrap_or_default(),
            section_id: section_info
                .map(|s| s.section_id.clone())
                .unwrap_or_default(),
            schedule: section_info
                .map(|s| s.schedule_string())
                .unwrap_or_default(),
            direct_reviews: Vec::new(),
            avg_rating: 0.0,
            review_count: 0,
            professor_other_reviews: Vec::new(),
            professor_other_courses: Vec::new(),
            course_other_reviews: Vec::new(),
            course_other_professors: Vec::new(),
        }
    }
}
