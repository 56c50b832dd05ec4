//! PlanetTerp评价API客户端

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ReviewConfig;
use crate::sources::{ReviewSource, SourceError};
use crate::types::ReviewRecord;

/// 教师查询的响应体（reviews=true时附带评价列表）
#[derive(Debug, Deserialize)]
struct ProfessorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    reviews: Vec<ReviewRecord>,
}

/// 课程查询的响应体
#[derive(Debug, Deserialize)]
struct CourseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    professors: Vec<String>,
}

/// PlanetTerp客户端
///
/// 非200响应或响应体中的error字段视为"无数据"，返回空列表而不是错误；
/// 网络失败与格式错误的响应体作为SourceError返回，由调用方降级处理。
#[derive(Clone)]
pub struct PlanetTerpClient {
    config: ReviewConfig,
    http: reqwest::Client,
}

impl PlanetTerpClient {
    pub fn new(config: ReviewConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent("terpwise-rs")
            .build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl ReviewSource for PlanetTerpClient {
    async fn professor_reviews(
        &self,
        professor: &str,
        course_filter: Option<&str>,
    ) -> Result<Vec<ReviewRecord>, SourceError> {
        if professor.is_empty() {
            return Ok(Vec::new());
        }
        match course_filter {
            Some(course) => println!("📖 正在获取 {} 讲授 {} 的评价...", professor, course),
            None => println!("📖 正在获取 {} 的全部评价...", professor),
        }

        let url = format!("{}/professor", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("name", professor), ("reviews", "true")])
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?;

        if !response.status().is_success() {
            println!("   评价API返回状态 {}，按无数据处理", response.status());
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let parsed: ProfessorResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error {
            println!("   评价API返回错误：{}，按无数据处理", error);
            return Ok(Vec::new());
        }

        let reviews = match course_filter {
            Some(course) => parsed
                .reviews
                .into_iter()
                .filter(|r| r.course.as_deref() == Some(course))
                .collect(),
            None => parsed.reviews,
        };
        println!("   获取到 {} 条评价", reviews.len());
        Ok(reviews)
    }

    async fn course_professors(&self, course_id: &str) -> Result<Vec<String>, SourceError> {
        if course_id.is_empty() {
            return Ok(Vec::new());
        }
        println!("🔎 正在查询教过 {} 的教师名单...", course_id);

        let url = format!("{}/course", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("name", course_id)])
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?;

        if !response.status().is_success() {
            println!("   评价API返回状态 {}，按无数据处理", response.status());
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let parsed: CourseResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error {
            println!("   评价API返回错误：{}，按无数据处理", error);
            return Ok(Vec::new());
        }

        Ok(parsed.professors)
    }
}
