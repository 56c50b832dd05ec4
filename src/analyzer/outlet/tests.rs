#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::analyzer::outlet::save;
    use crate::config::Config;
    use crate::types::{CourseSummary, ResearchBundle, ScheduleAnalysis};

    fn analysis() -> ScheduleAnalysis {
        let mut bundle = ResearchBundle::empty("Nelson Padua-Perez", "CMSC132", None);
        bundle.professor_other_courses = vec!["CMSC131".to_string(), "CMSC216".to_string()];
        bundle.course_other_professors = vec!["Fawzi Emad".to_string()];

        let course = CourseSummary {
            course_id: "CMSC132".to_string(),
            course_title: "Object-Oriented Programming II".to_string(),
            section_id: "0201".to_string(),
            professor: "Nelson Padua-Perez".to_string(),
            schedule: "TuTh 11:00am - 12:15pm".to_string(),
            avg_rating: 4.25,
            review_count: 8,
            summary: "Strong course overall.".to_string(),
            research_stats: Some(bundle),
        };

        ScheduleAnalysis {
            generated: "2025-08-20 10:00:00".to_string(),
            course_count: 1,
            overall_grade: Some(85),
            overall_analysis: "Overall Schedule Grade: 85/100\nBalanced.".to_string(),
            courses: vec![course],
        }
    }

    #[test]
    fn test_save_writes_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            output_path: temp_dir.path().join("report.txt"),
            json_path: temp_dir.path().join("data.json"),
            ..Config::default()
        };

        save(&config, &analysis()).unwrap();

        let report = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(report.starts_with("UMD SCHEDULE ANALYSIS"));
        assert!(report.contains("Generated: 2025-08-20 10:00:00"));
        assert!(report.contains("OVERALL SCHEDULE ANALYSIS"));
        assert!(report.contains("COURSE 1: CMSC132 - Object-Oriented Programming II"));
        assert!(report.contains("Professor: Nelson Padua-Perez"));
        assert!(report.contains("Average Rating: 4.25/5 (8 reviews)"));
        assert!(report.contains("Research Depth: 0 direct, 0 prof-other, 0 course-other"));
        assert!(report.contains("Professor teaches 2 other courses"));
        assert!(report.contains("Course is taught by 1 other professors"));
        assert!(report.contains("ANALYSIS:\nStrong course overall."));

        let json = std::fs::read_to_string(&config.json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["course_count"], 1);
        assert_eq!(value["overall_grade"], 85);
        assert_eq!(value["courses"][0]["course_id"], "CMSC132");
        assert!(value["courses"][0]["research_stats"].is_object());
    }

    #[test]
    fn test_save_with_empty_analysis() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            output_path: temp_dir.path().join("report.txt"),
            json_path: temp_dir.path().join("data.json"),
            ..Config::default()
        };
        let empty = ScheduleAnalysis {
            generated: "2025-08-20 10:00:00".to_string(),
            course_count: 0,
            overall_grade: None,
            overall_analysis: "No courses found.".to_string(),
            courses: Vec::new(),
        };

        save(&config, &empty).unwrap();

        let report = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(report.contains("No individual course analyses were generated."));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config.json_path).unwrap()).unwrap();
        assert!(value["overall_grade"].is_null());
        assert_eq!(value["courses"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_one_failed_outlet_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            // 不存在的目录导致文本报告失败
            output_path: temp_dir.path().join("missing").join("report.txt"),
            json_path: temp_dir.path().join("data.json"),
            ..Config::default()
        };

        // 失败只记录日志，JSON出口照常工作
        save(&config, &analysis()).unwrap();
        assert!(config.json_path.exists());
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_placeholder_course_renders_na_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            output_path: temp_dir.path().join("report.txt"),
            json_path: temp_dir.path().join("data.json"),
            ..Config::default()
        };
        let mut data = analysis();
        data.courses = vec![CourseSummary::placeholder("XXXX999", "", "0101")];

        save(&config, &data).unwrap();

        let report = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(report.contains("COURSE 1: XXXX999 - N/A"));
        assert!(report.contains("Schedule: N/A"));
        // 占位结果没有调研材料，不输出深度信息
        assert!(!report.contains("Research Depth:"));
    }
}
