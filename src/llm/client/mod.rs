//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::LLMConfig;

mod providers;

use providers::ProviderClient;

/// 生成模型的统一调用接口
///
/// 分析流程只依赖这一接口，测试中以mock实现替换真实Provider。
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// 单轮补全：system提示 + user提示 -> 文本
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// LLM客户端 - 提供统一的LLM服务接口
///
/// 每次调用只尝试一次，超时是唯一的时效约束；失败的恢复策略
/// 由调用方决定（分析流程将失败降级为错误说明文本）。
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        // 使用一个简单的prompt来测试连接
        match self
            .complete("System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CompletionModel for LLMClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let agent = self
            .client
            .create_agent(&self.config.model, system_prompt, &self.config);

        let timeout = Duration::from_secs(self.config.timeout_seconds);
        match tokio::time::timeout(timeout, agent.prompt(user_prompt)).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!(
                "模型调用超时（{}秒）",
                self.config.timeout_seconds
            )),
        }
    }
}
