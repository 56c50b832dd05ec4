//! 调研聚合器 - 为一个教师-课程组合收集评价与上下文数据
//!
//! 关键设计是提前退出策略：直接评价足够多时立即返回，
//! 省掉后续所有外部调用的成本与延迟。

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::sources::ReviewSource;
use crate::types::review::average_rating;
use crate::types::{ResearchBundle, ReviewRecord, SectionInfo};

/// 提前退出阈值：直接评价达到该数量即认为证据充分
const DIRECT_REVIEW_CUTOFF: usize = 5;

/// 其它教师的抽样上限
const OTHER_PROFESSOR_SAMPLE: usize = 3;

/// 每位其它教师保留的评价上限
const REVIEWS_PER_OTHER_PROFESSOR: usize = 5;

/// 调研聚合器
#[derive(Clone)]
pub struct ResearchAggregator {
    reviews: Arc<dyn ReviewSource>,
}

impl ResearchAggregator {
    pub fn new(reviews: Arc<dyn ReviewSource>) -> Self {
        Self { reviews }
    }

    /// 为一个教师-课程组合构建调研材料包
    ///
    /// 任何外部调用失败都降级为该次调用"无数据"，继续执行后续步骤；
    /// 材料不完整是可接受的，空材料包也不是错误。
    pub async fn aggregate(
        &self,
        professor: &str,
        course_id: &str,
        section_info: Option<&SectionInfo>,
    ) -> ResearchBundle {
        let mut bundle = ResearchBundle::empty(professor, course_id, section_info);

        // 步骤1：直接评价
        println!("📚 调研步骤1：{} 讲授 {} 的直接评价", professor, course_id);
        bundle.direct_reviews = self
            .fetch_reviews(professor, Some(course_id))
            .await;
        let (avg_rating, review_count) = average_rating(&bundle.direct_reviews);
        bundle.avg_rating = avg_rating;
        bundle.review_count = review_count;
        println!(
            "   找到 {} 条直接评价（{} 条带评分，平均 {:.2}/5）",
            bundle.direct_reviews.len(),
            review_count,
            avg_rating
        );

        // 直接证据充分时提前退出，跳过其余调研步骤
        if bundle.direct_reviews.len() >= DIRECT_REVIEW_CUTOFF {
            println!(
                "   直接评价已足够（{} 条），跳过补充调研",
                bundle.direct_reviews.len()
            );
            return bundle;
        }

        // 步骤2：该教师的其它课程评价
        println!("📚 调研步骤2：{} 讲授的其它课程", professor);
        let all_professor_reviews = self.fetch_reviews(professor, None).await;
        bundle.professor_other_reviews = all_professor_reviews
            .into_iter()
            .filter(|r| r.course.is_some() && r.course.as_deref() != Some(course_id))
            .collect();
        bundle.professor_other_courses = bundle
            .professor_other_reviews
            .iter()
            .filter_map(|r| r.course.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        println!(
            "   找到 {} 条其它课程评价，涉及 {} 门课程",
            bundle.professor_other_reviews.len(),
            bundle.professor_other_courses.len()
        );

        // 步骤3：教过该课程的其它教师及抽样评价
        println!("📚 调研步骤3：教过 {} 的其它教师", course_id);
        let all_professors = match self.reviews.course_professors(course_id).await {
            Ok(professors) => professors,
            Err(e) => {
                println!("⚠️ 获取教师名单失败：{}，按无数据继续", e);
                Vec::new()
            }
        };
        let mut other_professors: Vec<String> = all_professors
            .into_iter()
            .filter(|p| p != professor)
            .collect();
        other_professors.sort();
        other_professors.dedup();
        bundle.course_other_professors = other_professors;
        println!(
            "   找到 {} 位其它教师",
            bundle.course_other_professors.len()
        );

        // 抽样顺序取排序后的前几位，结果是确定性的
        for other in bundle
            .course_other_professors
            .iter()
            .take(OTHER_PROFESSOR_SAMPLE)
        {
            println!("   抽样 {} 讲授 {} 的评价", other, course_id);
            let reviews = self.fetch_reviews(other, Some(course_id)).await;
            bundle
                .course_other_reviews
                .extend(reviews.into_iter().take(REVIEWS_PER_OTHER_PROFESSOR));
        }
        println!(
            "   共收集 {} 条其它教师的抽样评价",
            bundle.course_other_reviews.len()
        );

        bundle
    }

    /// 获取评价，失败降级为空列表
    async fn fetch_reviews(
        &self,
        professor: &str,
        course_filter: Option<&str>,
    ) -> Vec<ReviewRecord> {
        match self.reviews.professor_reviews(professor, course_filter).await {
            Ok(reviews) => reviews,
            Err(e) => {
                println!("⚠️ 获取评价失败：{}，按无数据继续", e);
                Vec::new()
            }
        }
    }
}
