use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, LLMProvider};
use crate::types::CourseInput;

/// TerpWise - UMD选课表智能分析引擎
#[derive(Parser, Debug)]
#[command(name = "terpwise")]
#[command(
    about = "AI-based schedule analyzer for UMD courses. It looks up sections in the course catalog, researches professor reviews, and generates per-course and schedule-level analyses."
)]
#[command(version)]
pub struct Args {
    /// 待分析课程的JSON数组，例如 '[{"course_id":"CMSC132","section":"0201"}]'
    #[arg(long)]
    pub courses_json: Option<String>,

    /// 学期ID（例如 202508）
    #[arg(long)]
    pub term: Option<String>,

    /// 文本报告输出路径
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON数据输出路径
    #[arg(short, long)]
    pub json: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM API KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// LLM Provider (openai, moonshot, deepseek, mistral, openrouter, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 分析所用的模型
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 单次模型调用的超时时间（秒）
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    ///
    /// 课程JSON格式错误会直接失败，这是唯一在任何网络请求之前
    /// 就中止运行的输入错误。
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)?
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("terpwise.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path)?
            } else {
                Config::default()
            }
        };

        // 课程列表：CLI参数优先于配置文件
        if let Some(courses_json) = &self.courses_json {
            config.courses = parse_courses_json(courses_json)?;
        }
        if config.courses.is_empty() {
            bail!("没有指定任何课程，请通过 --courses-json 或配置文件提供课程列表");
        }

        // 覆盖输出路径
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(json) = self.json {
            config.json_path = json;
        }
        if let Some(term) = self.term {
            config.catalog.term_id = term;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(api_key) = self.api_key {
            config.llm.api_key = api_key;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.llm.timeout_seconds = timeout_seconds;
        }
        config.verbose = self.verbose;

        Ok(config)
    }
}

/// 解析 --courses-json 参数
fn parse_courses_json(raw: &str) -> Result<Vec<CourseInput>> {
    serde_json::from_str(raw).context(
        "Failed to parse --courses-json, expected a JSON array like \
         [{\"course_id\":\"CMSC132\",\"section\":\"0201\"}]",
    )
}
