#[cfg(test)]
mod tests {
    use crate::types::course::CourseInput;
    use crate::types::review::average_rating;
    use crate::types::{CourseRef, ReviewRecord, SectionInfo};

    fn review(rating: Option<f64>) -> ReviewRecord {
        ReviewRecord {
            course: Some("CMSC132".to_string()),
            rating,
            grade: None,
            review: "ok".to_string(),
            created: Some("2024-09-01T12:00:00".to_string()),
        }
    }

    #[test]
    fn test_course_ref_normalization() {
        let a = CourseRef::new("cmsc132", "201");
        assert_eq!(a.course_id, "CMSC132");
        assert_eq!(a.section_id, "0201");

        let b = CourseRef::new("CMSC132", " 0201 ");
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_course_ref_display() {
        let c = CourseRef::new("math141", "301");
        assert_eq!(c.to_string(), "MATH141-0301");
    }

    #[test]
    fn test_course_input_normalize() {
        let input = CourseInput {
            course_id: "cmsc132".to_string(),
            section: "201".to_string(),
        };
        assert_eq!(input.normalize(), CourseRef::new("CMSC132", "0201"));
    }

    #[test]
    fn test_average_rating_excludes_missing() {
        let reviews = vec![review(Some(4.0)), review(None), review(Some(2.0))];
        let (avg, count) = average_rating(&reviews);
        assert_eq!(avg, 3.0);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_average_rating_empty_is_zero() {
        let (avg, count) = average_rating(&[]);
        assert_eq!(avg, 0.0);
        assert_eq!(count, 0);

        // 仅有缺失评分的记录也视为空集合
        let (avg, count) = average_rating(&[review(None)]);
        assert_eq!(avg, 0.0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_schedule_string() {
        let mut info = SectionInfo::placeholder(&CourseRef::new("CMSC132", "0201"));
        assert_eq!(info.schedule_string(), "");

        info.days = "MWF".to_string();
        info.time = "10:00am - 10:50am".to_string();
        assert_eq!(info.schedule_string(), "MWF 10:00am - 10:50am");
    }

    #[test]
    fn test_review_date_truncation() {
        let r = review(Some(5.0));
        assert_eq!(r.date(), "2024-09-01");

        let r = ReviewRecord {
            course: None,
            rating: None,
            grade: None,
            review: String::new(),
            created: None,
        };
        assert_eq!(r.date(), "");
    }

    #[test]
    fn test_review_record_deserialize_planetterp_shape() {
        let json = r#"{
            "professor": "Nelson Padua-Perez",
            "course": "CMSC132",
            "rating": 5,
            "expected_grade": "A",
            "review": "Great professor.",
            "created": "2023-05-11T09:30:00"
        }"#;
        let r: ReviewRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.course.as_deref(), Some("CMSC132"));
        assert_eq!(r.rating, Some(5.0));
        assert_eq!(r.grade.as_deref(), Some("A"));
        assert_eq!(r.date(), "2023-05-11");
    }
}
