use std::sync::Arc;

use crate::config::Config;
use crate::llm::CompletionModel;
use crate::sources::{CatalogSource, ReviewSource};

/// 分析器上下文
///
/// 汇集配置与三个外部协作者（目录、评价API、生成模型），
/// 构造一次后按引用传入各阶段；测试中注入mock实现。
#[derive(Clone)]
pub struct AnalyzerContext {
    /// 配置
    pub config: Config,
    /// 生成模型，用于AI分析
    pub model: Arc<dyn CompletionModel>,
    /// 课程目录数据源
    pub catalog: Arc<dyn CatalogSource>,
    /// 教师评价数据源
    pub reviews: Arc<dyn ReviewSource>,
}

impl AnalyzerContext {
    /// 创建新的分析器上下文
    pub fn new(
        config: Config,
        model: Arc<dyn CompletionModel>,
        catalog: Arc<dyn CatalogSource>,
        reviews: Arc<dyn ReviewSource>,
    ) -> Self {
        Self {
            config,
            model,
            catalog,
            reviews,
        }
    }
}
