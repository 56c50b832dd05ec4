#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::analyzer::context::AnalyzerContext;
    use crate::analyzer::workflow::ScheduleAnalyzer;
    use crate::config::Config;
    use crate::llm::CompletionModel;
    use crate::sources::{CatalogSource, ReviewSource, SourceError};
    use crate::types::{CourseInput, CourseRef, ReviewRecord, SectionInfo};

    /// 目录桩：为已知课程返回小节信息
    struct MockCatalog {
        known: Vec<String>,
    }

    #[async_trait]
    impl CatalogSource for MockCatalog {
        async fn lookup_section(
            &self,
            course: &CourseRef,
        ) -> Result<Option<SectionInfo>, SourceError> {
            if !self.known.contains(&course.course_id) {
                return Ok(None);
            }
            Ok(Some(SectionInfo {
                course_id: course.course_id.clone(),
                course_title: format!("{} Title", course.course_id),
                section_id: course.section_id.clone(),
                instructors: vec![format!("Prof {}", course.course_id)],
                days: "MWF".to_string(),
                time: "10:00am - 10:50am".to_string(),
            }))
        }
    }

    /// 评价桩：每位教师返回足够的直接评价以触发提前退出
    struct MockReviews;

    #[async_trait]
    impl ReviewSource for MockReviews {
        async fn professor_reviews(
            &self,
            _professor: &str,
            course_filter: Option<&str>,
        ) -> Result<Vec<ReviewRecord>, SourceError> {
            Ok((0..5)
                .map(|i| ReviewRecord {
                    course: course_filter.map(|c| c.to_string()),
                    rating: Some(4.0),
                    grade: None,
                    review: format!("review {}", i),
                    created: None,
                })
                .collect())
        }

        async fn course_professors(&self, _course_id: &str) -> Result<Vec<String>, SourceError> {
            Ok(Vec::new())
        }
    }

    /// 模型桩：课程分析带固定延迟，日程总评即时返回带总分的文本
    struct SlowModel {
        latency: Duration,
    }

    #[async_trait]
    impl CompletionModel for SlowModel {
        async fn complete(&self, _system: &str, user_prompt: &str) -> Result<String> {
            if user_prompt.contains("Overall Schedule Grade: XX/100") {
                return Ok("Overall Schedule Grade: 85/100\nBalanced schedule.".to_string());
            }
            tokio::time::sleep(self.latency).await;
            Ok("Detailed course analysis.".to_string())
        }
    }

    fn context(courses: Vec<CourseInput>, known: Vec<&str>, latency: Duration) -> AnalyzerContext {
        let config = Config {
            courses,
            ..Config::default()
        };
        AnalyzerContext::new(
            config,
            Arc::new(SlowModel { latency }),
            Arc::new(MockCatalog {
                known: known.into_iter().map(|c| c.to_string()).collect(),
            }),
            Arc::new(MockReviews),
        )
    }

    fn input(course_id: &str, section: &str) -> CourseInput {
        CourseInput {
            course_id: course_id.to_string(),
            section: section.to_string(),
        }
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        let courses = vec![
            input("CMSC132", "0201"),
            input("MATH141", "0301"),
            input("ENGL101", "0101"),
        ];
        let ctx = context(
            courses,
            vec!["CMSC132", "MATH141", "ENGL101"],
            Duration::from_millis(10),
        );
        let analyzer = ScheduleAnalyzer::new(ctx);

        let analysis = analyzer.execute().await.unwrap();

        let order: Vec<&str> = analysis
            .courses
            .iter()
            .map(|c| c.course_id.as_str())
            .collect();
        assert_eq!(order, vec!["CMSC132", "MATH141", "ENGL101"]);
        assert_eq!(analysis.course_count, 3);
        assert_eq!(analysis.overall_grade, Some(85));
    }

    #[tokio::test]
    async fn test_analysis_phase_fans_out() {
        let courses = vec![
            input("CMSC132", "0201"),
            input("MATH141", "0301"),
            input("ENGL101", "0101"),
        ];
        let latency = Duration::from_millis(100);
        let ctx = context(courses, vec!["CMSC132", "MATH141", "ENGL101"], latency);
        let analyzer = ScheduleAnalyzer::new(ctx);

        let start = Instant::now();
        let analysis = analyzer.execute().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(analysis.course_count, 3);
        // 三个模型调用并发执行：总耗时接近单次延迟而非三倍
        assert!(
            elapsed < latency * 3,
            "analysis phase ran serially: {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_duplicate_inputs_are_dropped() {
        // 规范化后前两条指向同一课程小节
        let courses = vec![
            input("CMSC132", "0201"),
            input("cmsc132", "201"),
            input("MATH141", "0301"),
        ];
        let ctx = context(
            courses,
            vec!["CMSC132", "MATH141"],
            Duration::from_millis(1),
        );
        let analyzer = ScheduleAnalyzer::new(ctx);

        let analysis = analyzer.execute().await.unwrap();

        assert_eq!(analysis.course_count, 2);
        assert_eq!(analysis.courses[0].course_id, "CMSC132");
        assert_eq!(analysis.courses[0].section_id, "0201");
        assert_eq!(analysis.courses[1].course_id, "MATH141");
    }

    #[tokio::test]
    async fn test_unknown_professor_yields_placeholder() {
        // 目录不认识该课程，评价API也给不出教师名单
        let courses = vec![input("XXXX999", "0101")];
        let ctx = context(courses, vec![], Duration::from_millis(1));
        let analyzer = ScheduleAnalyzer::new(ctx);

        let analysis = analyzer.execute().await.unwrap();

        assert_eq!(analysis.course_count, 1);
        let placeholder = &analysis.courses[0];
        assert_eq!(placeholder.professor, "Unknown");
        assert_eq!(placeholder.schedule, "N/A");
        assert!(placeholder.summary.contains("Professor information unavailable"));
        assert!(placeholder.research_stats.is_none());
    }

    #[tokio::test]
    async fn test_empty_input_graceful() {
        let ctx = context(vec![], vec![], Duration::from_millis(1));
        let analyzer = ScheduleAnalyzer::new(ctx);

        let analysis = analyzer.execute().await.unwrap();

        assert_eq!(analysis.course_count, 0);
        assert!(analysis.courses.is_empty());
        assert_eq!(analysis.overall_analysis, "No courses found.");
        assert_eq!(analysis.overall_grade, None);
    }
}
