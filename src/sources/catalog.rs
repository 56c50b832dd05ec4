//! Testudo课程目录客户端
//!
//! 目录站点没有结构化API，返回的是课程检索结果页面，
//! 本模块用一组字段抽取正则在页面文本中定位标题、教师与上课时间。

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::config::CatalogConfig;
use crate::sources::{CatalogSource, SourceError};
use crate::types::{CourseRef, SectionInfo};

/// Testudo目录客户端
#[derive(Clone)]
pub struct TestudoClient {
    config: CatalogConfig,
    http: reqwest::Client,
}

impl TestudoClient {
    pub fn new(config: CatalogConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent("terpwise-rs")
            .build()?;
        Ok(Self { config, http })
    }

    /// 构建课程检索URL（附带站点要求的全部过滤参数）
    fn build_search_url(&self, course: &CourseRef) -> String {
        let filters = [
            "creditCompare=",
            "credits=",
            "courseLevelFilter=ALL",
            "instructor=",
            "_facetoface=on",
            "_blended=on",
            "_online=on",
            "courseStartCompare=",
            "courseStartHour=",
            "courseStartMin=",
            "courseStartAM=",
            "courseEndHour=",
            "courseEndMin=",
            "courseEndAM=",
            "teachingCenter=ALL",
            "_classDay1=on",
            "_classDay2=on",
            "_classDay3=on",
            "_classDay4=on",
            "_classDay5=on",
        ];
        format!(
            "{}?courseId={}&sectionId={}&termId={}&{}",
            self.config.base_url,
            course.course_id,
            course.section_id,
            self.config.term_id,
            filters.join("&")
        )
    }
}

#[async_trait]
impl CatalogSource for TestudoClient {
    async fn lookup_section(
        &self,
        course: &CourseRef,
    ) -> Result<Option<SectionInfo>, SourceError> {
        println!(
            "🔍 正在检索目录：{} 小节 {}（学期 {}）",
            course.course_id, course.section_id, self.config.term_id
        );

        let url = self.build_search_url(course);
        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        Ok(extract_section(&body, course))
    }
}

/// 在检索结果页面中定位目标小节的结构化字段
fn extract_section(body: &str, course: &CourseRef) -> Option<SectionInfo> {
    if !body.contains("class=\"course\"") {
        println!("   目录中未找到匹配课程");
        return None;
    }

    let title_re =
        Regex::new(r#"<span[^>]*class="[^"]*course-title[^"]*"[^>]*>([^<]*)</span>"#).unwrap();
    let course_title = title_re
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    // 按section-id标记切分页面，逐段匹配目标小节
    let section_id_re =
        Regex::new(r#"class="[^"]*section-id[^"]*"[^>]*>\s*([0-9A-Za-z]+)\s*<"#).unwrap();
    let marks: Vec<(usize, String)> = section_id_re
        .captures_iter(body)
        .map(|c| (c.get(0).unwrap().start(), c[1].trim().to_string()))
        .collect();
    if marks.is_empty() {
        println!("   找到课程，但页面中没有小节条目");
        return None;
    }

    for (i, (start, section_id)) in marks.iter().enumerate() {
        if *section_id != course.section_id {
            continue;
        }
        let end = marks.get(i + 1).map(|(s, _)| *s).unwrap_or(body.len());
        let chunk = &body[*start..end];

        return Some(SectionInfo {
            course_id: course.course_id.clone(),
            course_title,
            section_id: section_id.clone(),
            instructors: extract_instructors(chunk),
            days: extract_field(chunk, "section-days"),
            time: extract_time(chunk),
        });
    }

    println!("   课程页面中未找到小节 {} 的详情", course.section_id);
    None
}

/// 抽取小节片段中的教师名单（跳过TBA，剥离"Instructor:"标签前缀）
fn extract_instructors(chunk: &str) -> Vec<String> {
    let instructor_re =
        Regex::new(r#"class="[^"]*section-instructors?[^"]*"[^>]*>\s*([^<]+?)\s*<"#).unwrap();
    let label_re = Regex::new(r"(?i)Instructors?:\s*(.*)").unwrap();

    let mut instructors = Vec::new();
    for caps in instructor_re.captures_iter(chunk) {
        let name = caps[1].trim().to_string();
        if name.is_empty() || name.contains("TBA") {
            continue;
        }
        let name = label_re
            .captures(&name)
            .map(|c| c[1].trim().to_string())
            .unwrap_or(name);
        instructors.push(name);
    }
    instructors
}

/// 抽取单个class标记的文本字段
fn extract_field(chunk: &str, class_name: &str) -> String {
    let re = Regex::new(&format!(
        r#"class="[^"]*{}[^"]*"[^>]*>\s*([^<]*?)\s*<"#,
        class_name
    ))
    .unwrap();
    re.captures(chunk)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default()
}

/// 起止时间拼接为 "start - end"，任一缺失时返回空
fn extract_time(chunk: &str) -> String {
    let start = extract_field(chunk, "class-start-time");
    let end = extract_field(chunk, "class-end-time");
    if start.is_empty() || end.is_empty() {
        return String::new();
    }
    format!("{} - {}", start, end)
}
