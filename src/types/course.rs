use serde::{Deserialize, Serialize};

/// 课程引用 - 一次分析运行中课程的唯一标识
///
/// 标识键为 (course_id, section_id)，输入批次在任何网络请求之前
/// 先按该键去重。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseRef {
    /// 课程ID（统一为大写，例如 "CMSC132"）
    pub course_id: String,
    /// 小节ID（补零到4位定宽，例如 "0201"）
    pub section_id: String,
}

impl CourseRef {
    /// 规范化构造：课程ID转大写，小节ID去除空白后补零到4位
    pub fn new(course_id: &str, section_id: &str) -> Self {
        Self {
            course_id: course_id.trim().to_uppercase(),
            section_id: format!("{:0>4}", section_id.trim()),
        }
    }

    /// 标识键，用于输入去重
    pub fn key(&self) -> (String, String) {
        (self.course_id.clone(), self.section_id.clone())
    }
}

impl std::fmt::Display for CourseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.course_id, self.section_id)
    }
}

/// 原始课程输入 - 来自 --courses-json 参数的未规范化条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInput {
    pub course_id: String,
    pub section: String,
}

impl CourseInput {
    pub fn normalize(&self) -> CourseRef {
        CourseRef::new(&self.course_id, &self.section)
    }
}

/// 课程小节信息 - 目录检索的产物
///
/// "未找到"与"找到但教师为TBA"是两种不同的结果，调用方需要分别处理。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionInfo {
    pub course_id: String,
    pub course_title: String,
    pub section_id: String,
    /// 有序的教师列表（已过滤TBA条目）
    pub instructors: Vec<String>,
    /// 上课日（例如 "MWF"）
    pub days: String,
    /// 上课时间（例如 "10:00am - 10:50am"）
    pub time: String,
}

impl SectionInfo {
    /// 合成日程字符串（"days time"，两端去空白）
    pub fn schedule_string(&self) -> String {
        format!("{} {}", self.days, self.time).trim().to_string()
    }

    /// 目录检索失败时的占位信息，教师标记为Unknown
    pub fn placeholder(course: &CourseRef) -> Self {
        Self {
            course_id: course.course_id.clone(),
            course_title: String::new(),
            section_id: course.section_id.clone(),
            instructors: vec!["Unknown".to_string()],
            days: String::new(),
            time: String::new(),
        }
    }
}
