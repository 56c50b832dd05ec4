use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::types::course::CourseInput;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "moonshot")]
    Moonshot,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Moonshot => write!(f, "moonshot"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Mistral => write!(f, "mistral"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "moonshot" => Ok(LLMProvider::Moonshot),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "mistral" => Ok(LLMProvider::Mistral),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
///
/// 显式构造一次并按引用传入各协作组件，不存在任何全局可变状态。
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 待分析的课程列表（通常来自CLI参数，配置文件中一般不配置）
    #[serde(default)]
    pub courses: Vec<CourseInput>,

    /// 文本报告输出路径
    pub output_path: PathBuf,

    /// JSON数据输出路径
    pub json_path: PathBuf,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 课程目录数据源配置
    pub catalog: CatalogConfig,

    /// 评价API数据源配置
    pub reviews: ReviewConfig,

    /// 是否启用详细日志
    #[serde(default)]
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 分析所用的模型
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 单次调用的超时时间（秒），这是模型调用唯一的时效约束
    pub timeout_seconds: u64,
}

/// 课程目录数据源配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    /// 目录检索基地址
    pub base_url: String,

    /// 学期ID（例如 202508）
    pub term_id: String,

    /// 单次请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 评价API数据源配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReviewConfig {
    /// 评价API基地址
    pub base_url: String,

    /// 单次请求超时时间（秒）
    pub timeout_seconds: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            courses: Vec::new(),
            output_path: PathBuf::from("./enhanced_schedule_analysis.txt"),
            json_path: PathBuf::from("./schedule_data.json"),
            llm: LLMConfig::default(),
            catalog: CatalogConfig::default(),
            reviews: ReviewConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("TERPWISE_LLM_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or_default(),
            api_base_url: String::from("https://generativelanguage.googleapis.com/v1beta"),
            model: String::from("gemini-2.0-flash"),
            max_tokens: 8192,
            temperature: 0.1,
            timeout_seconds: 120,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://app.testudo.umd.edu/soc/search"),
            term_id: String::from("202508"),
            timeout_seconds: 10,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://api.planetterp.com/v1"),
            timeout_seconds: 15,
        }
    }
}
