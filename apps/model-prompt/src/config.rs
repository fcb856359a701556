//! # Model Prompt 設定

use edgar_domain::prompt::PromptRequest;

const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";
const DEFAULT_QUESTION: &str = "what is the best car?";
const DEFAULT_MAX_TOKENS: u32 = 256;

/// Model Prompt の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// モデル ID（推論プロファイル ID）
    pub model_id:   String,
    pub question:   String,
    pub max_tokens: u32,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            model_id:   DEFAULT_MODEL_ID.to_string(),
            question:   DEFAULT_QUESTION.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl PromptConfig {
    /// 任意のキー検索関数から設定を読み込む
    ///
    /// `PROMPT_MAX_TOKENS` が正の整数でない場合は既定値にフォールバックし、
    /// stderr に警告を出力する。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_id:   lookup("BEDROCK_MODEL_ID").unwrap_or(defaults.model_id),
            question:   lookup("PROMPT_QUESTION").unwrap_or(defaults.question),
            max_tokens: lookup("PROMPT_MAX_TOKENS")
                .map(|value| parse_max_tokens(&value))
                .unwrap_or(defaults.max_tokens),
        }
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// プロンプトを組み立てる
    pub fn to_request(&self) -> PromptRequest {
        PromptRequest {
            model_id:   self.model_id.clone(),
            question:   self.question.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

fn parse_max_tokens(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!(
                "WARNING: invalid PROMPT_MAX_TOKENS={value:?}, falling back to {DEFAULT_MAX_TOKENS}"
            );
            DEFAULT_MAX_TOKENS
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_未設定なら既定値を使う() {
        let config = PromptConfig::from_lookup(|_| None);

        assert_eq!(config.model_id, "us.anthropic.claude-3-7-sonnet-20250219-v1:0");
        assert_eq!(config.question, "what is the best car?");
        assert_eq!(config.max_tokens, 256);
    }

    #[test]
    fn test_環境変数で上書きできる() {
        let env = HashMap::from([
            ("BEDROCK_MODEL_ID", "other-model"),
            ("PROMPT_QUESTION", "what is the fastest car?"),
            ("PROMPT_MAX_TOKENS", "512"),
        ]);

        let config = PromptConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(
            config.to_request(),
            PromptRequest {
                model_id:   "other-model".to_string(),
                question:   "what is the fastest car?".to_string(),
                max_tokens: 512,
            }
        );
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("many")]
    fn test_不正なmax_tokensは既定値にフォールバックする(#[case] raw: &str) {
        let config = PromptConfig::from_lookup(|key| {
            (key == "PROMPT_MAX_TOKENS").then(|| raw.to_string())
        });

        assert_eq!(config.max_tokens, 256);
    }
}
