//! 外部数据源客户端 - 课程目录检索与教师评价API

use async_trait::async_trait;

use crate::types::{CourseRef, ReviewRecord, SectionInfo};

pub mod catalog;
pub mod reviews;

pub use catalog::TestudoClient;
pub use reviews::PlanetTerpClient;

/// 外部调用的失败原因
///
/// 调研流程中的每次外部调用只尝试一次，失败由调用方降级为"无数据"，
/// 不会中断整个流程。
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 课程目录数据源
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// 按课程+小节检索小节信息；"未找到"返回 Ok(None)，不是错误
    async fn lookup_section(
        &self,
        course: &CourseRef,
    ) -> Result<Option<SectionInfo>, SourceError>;
}

/// 教师评价数据源
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// 获取某位教师的评价，可按课程过滤
    async fn professor_reviews(
        &self,
        professor: &str,
        course_filter: Option<&str>,
    ) -> Result<Vec<ReviewRecord>, SourceError>;

    /// 获取教过某门课程的教师名单
    async fn course_professors(&self, course_id: &str) -> Result<Vec<String>, SourceError>;
}
